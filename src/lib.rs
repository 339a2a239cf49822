//! # containment-search
//!
//! A library for finding genomes in metagenomes using scaled k-mer sketches.
//!
//! Given a genome ("query") sketch and one or more metagenome ("subject")
//! sketches, `containment-search` reports how much of the genome is contained
//! in each metagenome. When a metagenome was sketched with abundance tracking,
//! it also reports how much of the metagenome's sequencing depth lands on the
//! genome.
//!
//! ## Features
//!
//! - **Containment**: fraction of genome hashes found in the metagenome, and vice versa
//! - **ANI estimates**: average nucleotide identity derived from containment
//! - **Weighted containment**: abundance-weighted fraction of the metagenome explained by the genome
//! - **Abundance summaries**: mean, median and standard deviation of abundances on shared hashes
//! - **One load per metagenome**: many genomes can be searched while reading each metagenome once
//!
//! ## Example
//!
//! ```rust,no_run
//! use containment_search::core::SearchOptions;
//! use containment_search::matching::many_query_sweep;
//! use containment_search::parsing::SignatureLoader;
//! use std::path::PathBuf;
//!
//! let options = SearchOptions::default();
//! let queries = vec![PathBuf::from("genome1.sig"), PathBuf::from("genome2.sig")];
//! let subjects = vec![PathBuf::from("SRR606249.sig")];
//!
//! let sweep = many_query_sweep(&SignatureLoader, &queries, &subjects, &options).unwrap();
//! for result in sweep {
//!     let result = result.unwrap();
//!     match &result.weighted {
//!         Some(w) => println!("{}: {:.1}% ({:.1}% of metagenome)",
//!             result.query_name, result.f_query * 100.0, w.f_weighted * 100.0),
//!         None => println!("{}: {:.1}%", result.query_name, result.f_query * 100.0),
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Sketches, sample records and search options
//! - [`parsing`]: Loading sketches from signature files
//! - [`matching`]: Pairwise comparison and batch sweeps
//! - [`output`]: CSV and console rendering of results
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod output;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::sample::SampleRecord;
pub use crate::core::sketch::Sketch;
pub use crate::core::types::*;
pub use crate::matching::engine::{compare, ComparisonResult, WeightedStats};
pub use crate::matching::{many_query_sweep, single_query_sweep, SearchError};
