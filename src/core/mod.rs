//! Core data types for sketch containment search.
//!
//! - [`Sketch`]: a sourmash scaled MinHash with optional abundances
//! - [`SampleRecord`]: one sketch plus its name, filename and checksum
//! - [`Moltype`], [`SearchOptions`]: comparison parameters
//!
//! ## Scaled sketches
//!
//! A scaled sketch keeps the hashes below `u64::MAX / scaled`. Two sketches
//! built at the same ksize and alphabet can be compared by downsampling both
//! to the larger scale factor; each shared hash then stands in for `scaled`
//! shared k-mers.

pub mod sample;
pub mod sketch;
pub mod types;

pub use sample::SampleRecord;
pub use sketch::Sketch;
pub use types::{Moltype, SearchOptions};
