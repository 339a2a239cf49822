//! Containment search: pairwise comparison and batch sweeps.
//!
//! This module provides the core search functionality:
//!
//! - [`compare`]: Compare one query against one subject
//! - [`single_query_sweep`] / [`many_query_sweep`]: Lazily compare queries
//!   against a list of subject files, loading each subject once
//! - [`ComparisonResult`]: Everything measured for one (query, subject) pair
//!
//! ## Statistics
//!
//! For each pair the comparison reports:
//!
//! - **Containment**: fraction of the query found in the subject and vice versa
//! - **Jaccard**: shared hashes over the union
//! - **ANI**: point estimates from each containment direction, their mean, and
//!   the max-containment estimate
//! - **Weighted containment**: when the subject tracks abundance, the fraction
//!   of the subject's total abundance that falls on hashes shared with the
//!   query, plus mean/median/std of those abundances
//!
//! ## Example
//!
//! ```rust,no_run
//! use containment_search::core::SearchOptions;
//! use containment_search::matching::single_query_sweep;
//! use containment_search::parsing::SignatureLoader;
//! use std::path::{Path, PathBuf};
//!
//! let options = SearchOptions::default();
//! let subjects = vec![PathBuf::from("SRR606249.sig")];
//! let sweep = single_query_sweep(&SignatureLoader, Path::new("genome.sig"), &subjects, &options)
//!     .unwrap();
//!
//! for result in sweep {
//!     let result = result.unwrap();
//!     println!("{}: {:.1}%", result.match_name, result.f_query * 100.0);
//! }
//! ```

use thiserror::Error;

use crate::core::types::Moltype;
use crate::parsing::LoadError;

pub mod ani;
pub mod engine;
pub mod intersect;
pub mod stats;
pub mod sweep;

pub use engine::{compare, ComparisonResult, WeightedStats};
pub use sweep::{many_query_sweep, single_query_sweep, Sweep};

#[derive(Error, Debug)]
pub enum SearchError {
    #[error(
        "expected exactly one sketch at ksize={ksize}/moltype={moltype} in '{path}'; found {count}"
    )]
    Resolution {
        path: String,
        count: usize,
        ksize: u32,
        moltype: Moltype,
    },

    #[error("sketch in '{path}' must have abundance information")]
    AbundanceRequired { path: String },

    #[error("cannot find any query sketches at ksize={ksize}/moltype={moltype}")]
    NoQueries { ksize: u32, moltype: Moltype },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("sketch operation failed: {0}")]
    Sketch(#[from] sourmash::Error),
}
