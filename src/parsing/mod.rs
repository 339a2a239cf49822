//! Loading sample sketches from disk.
//!
//! Sketches are read from sourmash signature files, optionally
//! gzip-compressed. Loading goes through the [`SampleLoader`] trait so that
//! sweeps can be driven by any source of [`SampleRecord`]s.
//!
//! ## Example
//!
//! ```rust,no_run
//! use containment_search::core::Moltype;
//! use containment_search::parsing::signature::load_signature_file;
//! use std::path::Path;
//!
//! let records = load_signature_file(Path::new("genome.sig"), 31, Moltype::Dna).unwrap();
//! for rec in &records {
//!     println!("{}: {} hashes", rec.name, rec.sketch.len());
//! }
//! ```

use std::path::Path;

use crate::core::sample::SampleRecord;
use crate::core::types::Moltype;

pub mod signature;

pub use signature::{LoadError, SignatureLoader};

/// Source of sample records
pub trait SampleLoader {
    /// Load every sample in `path` with a sketch at `ksize`/`moltype`.
    ///
    /// A file may yield zero, one or many records.
    ///
    /// # Errors
    ///
    /// Returns a `LoadError` if the file cannot be read or is malformed.
    fn load_samples(
        &self,
        path: &Path,
        ksize: u32,
        moltype: Moltype,
    ) -> Result<Vec<SampleRecord>, LoadError>;
}
