//! Loader for sourmash signature files.
//!
//! A signature file holds a JSON array of signatures. Each signature names a
//! sample and lists one sketch per ksize/alphabet:
//!
//! ```text
//! [{"name": "SRR606249", "filename": "SRR606249.fq.gz", "hash_function": "0.murmur64",
//!   "signatures": [{"ksize": 31, "molecule": "DNA", "max_hash": 184467440737095,
//!                   "mins": [...], "abundances": [...], "md5sum": "..."}]}]
//! ```
//!
//! Decoding, including gzip detection, is done by the `sourmash` crate; this
//! module selects sketches by ksize and alphabet and rejects the ones a
//! containment search cannot use.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use sourmash::signature::Signature;
use sourmash::sketch::Sketch as SourmashSketch;
use thiserror::Error;
use tracing::debug;

use crate::core::sample::SampleRecord;
use crate::core::sketch::Sketch;
use crate::core::types::Moltype;
use crate::parsing::SampleLoader;
use crate::utils::validation::{check_hash_limit, check_scaled_limit};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid signature file '{path}': {source}")]
    Signature {
        path: String,
        #[source]
        source: sourmash::Error,
    },

    #[error("invalid sketch in '{path}': {reason}")]
    InvalidSketch { path: String, reason: String },
}

/// Reads signature files from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureLoader;

impl SampleLoader for SignatureLoader {
    fn load_samples(
        &self,
        path: &Path,
        ksize: u32,
        moltype: Moltype,
    ) -> Result<Vec<SampleRecord>, LoadError> {
        load_signature_file(path, ksize, moltype)
    }
}

/// Load every sketch in a signature file matching `ksize` and `moltype`
///
/// `ksize` is in the sketch's alphabet, so a protein k=10 sketch (stored
/// with ksize 30) is selected by `ksize = 10`.
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be opened,
/// `LoadError::Signature` if it is not a signature file, or
/// `LoadError::InvalidSketch` if a selected sketch is unusable.
pub fn load_signature_file(
    path: &Path,
    ksize: u32,
    moltype: Moltype,
) -> Result<Vec<SampleRecord>, LoadError> {
    let location = path.display().to_string();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: location.clone(),
        source,
    })?;

    load_signatures(BufReader::new(file), &location, ksize, moltype)
}

/// Read signatures from `reader`, keeping the sketches matching `ksize` and
/// `moltype`. Plain and gzip-compressed input are both accepted.
///
/// `location` is recorded on each returned sample and used in error messages.
///
/// # Errors
///
/// Returns `LoadError::Signature` for undecodable input or
/// `LoadError::InvalidSketch` for an unusable sketch.
pub fn load_signatures<R: Read>(
    reader: R,
    location: &str,
    ksize: u32,
    moltype: Moltype,
) -> Result<Vec<SampleRecord>, LoadError> {
    let signatures = Signature::from_reader(reader).map_err(|source| LoadError::Signature {
        path: location.to_string(),
        source,
    })?;

    let invalid = |reason: String| LoadError::InvalidSketch {
        path: location.to_string(),
        reason,
    };

    let mut records = Vec::new();
    for sig in &signatures {
        let name = sig.name();
        let filename = Some(sig.filename())
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| location.to_string());

        for raw in sig.sketches() {
            let SourmashSketch::MinHash(mh) = raw else {
                continue;
            };
            let Some(sketch) = Sketch::from_minhash(mh) else {
                debug!("Skipping sketch with unsupported hash function in {location}");
                continue;
            };
            if sketch.ksize() != ksize || sketch.moltype() != moltype {
                continue;
            }

            check_usable(&sketch).map_err(invalid)?;
            debug!(
                "Loaded sketch '{}' from {}: {} hashes, scaled={}",
                name,
                location,
                sketch.len(),
                sketch.scaled()
            );

            records.push(
                SampleRecord::new(location, name.clone(), sketch).with_filename(filename.clone()),
            );
        }
    }

    Ok(records)
}

fn check_usable(sketch: &Sketch) -> Result<(), String> {
    if sketch.scaled() == 0 {
        return Err(format!(
            "num={} sketches are not supported; use scaled sketches",
            sketch.minhash().num()
        ));
    }
    if let Some(msg) = check_hash_limit(sketch.len()) {
        return Err(msg);
    }
    if let Some(msg) = check_scaled_limit(sketch.len(), sketch.scaled()) {
        return Err(msg);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use sourmash::sketch::minhash::KmerMinHash;

    fn sig_json(name: &str, sketches: &[Sketch]) -> String {
        let sketches: Vec<serde_json::Value> = sketches
            .iter()
            .map(|s| serde_json::to_value(s.minhash()).unwrap())
            .collect();
        wrap(name, sketches)
    }

    fn wrap(name: &str, sketches: Vec<serde_json::Value>) -> String {
        serde_json::json!([{
            "class": "sourmash_signature",
            "email": "",
            "hash_function": "0.murmur64",
            "license": "CC0",
            "name": name,
            "filename": "reads.fq.gz",
            "signatures": sketches,
            "version": 0.4
        }])
        .to_string()
    }

    fn parse(
        text: String,
        location: &str,
        ksize: u32,
        moltype: Moltype,
    ) -> Result<Vec<SampleRecord>, LoadError> {
        load_signatures(Cursor::new(text.into_bytes()), location, ksize, moltype)
    }

    #[test]
    fn test_parse_single_sketch() {
        let text = sig_json("genome", &[Sketch::new(31, Moltype::Dna, 1000, [3, 1, 2])]);
        let records = parse(text, "g.sig", 31, Moltype::Dna).unwrap();

        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.name, "genome");
        assert_eq!(rec.location, "g.sig");
        assert_eq!(rec.filename, "reads.fq.gz");
        assert_eq!(rec.sketch.hashes(), vec![1, 2, 3]);
        assert_eq!(rec.sketch.scaled(), 1000);
        assert!(!rec.sketch.track_abundance());
        assert_eq!(rec.md5, rec.sketch.md5sum());
    }

    #[test]
    fn test_parse_with_abundances() {
        let sketch = Sketch::with_abundances(31, Moltype::Dna, 1000, [(5, 10), (7, 20)]);
        let records = parse(sig_json("metag", &[sketch]), "m.sig", 31, Moltype::Dna).unwrap();
        assert_eq!(records[0].sketch.sum_abundances(), Some(30));
        assert_eq!(records[0].sketch.abundances_of(&[7]), Some(vec![20]));
    }

    #[test]
    fn test_parse_filters_ksize_and_moltype() {
        let text = sig_json(
            "genome",
            &[
                Sketch::new(21, Moltype::Dna, 1000, [1]),
                Sketch::new(31, Moltype::Dna, 1000, [1, 2]),
                Sketch::new(10, Moltype::Protein, 1000, [1, 2, 3]),
            ],
        );

        let dna = parse(text.clone(), "g.sig", 31, Moltype::Dna).unwrap();
        assert_eq!(dna.len(), 1);
        assert_eq!(dna[0].sketch.len(), 2);

        assert!(parse(text, "g.sig", 51, Moltype::Dna).unwrap().is_empty());
    }

    #[test]
    fn test_protein_sketch_selected_by_amino_acid_ksize() {
        let sketch = Sketch::new(10, Moltype::Protein, 100, [4, 5, 6]);
        let json = serde_json::to_value(sketch.minhash()).unwrap();
        assert_eq!(json["ksize"], 30);
        assert_eq!(json["molecule"], "protein");

        let text = sig_json("prot", &[sketch]);
        let records = parse(text.clone(), "p.sig", 10, Moltype::Protein).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sketch.ksize(), 10);
        assert_eq!(records[0].sketch.moltype(), Moltype::Protein);

        assert!(parse(text.clone(), "p.sig", 30, Moltype::Protein).unwrap().is_empty());
        assert!(parse(text, "p.sig", 10, Moltype::Dna).unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_num_sketch() {
        let mh = KmerMinHash::builder()
            .num(500)
            .ksize(31)
            .max_hash(0)
            .mins(vec![1])
            .build();
        let text = wrap("num", vec![serde_json::to_value(&mh).unwrap()]);

        let err = parse(text, "num.sig", 31, Moltype::Dna).unwrap_err();
        assert!(matches!(err, LoadError::InvalidSketch { .. }));
        assert!(err.to_string().contains("not supported"));
    }

    #[test]
    fn test_parse_rejects_scale_too_large_for_sketch() {
        // max_hash 1 encodes a scale factor near u64::MAX
        let sketch = Sketch::with_abundances(31, Moltype::Dna, u64::MAX, [(0, 3), (1, 4)]);
        assert_eq!(sketch.max_hash(), 1);

        let err = parse(sig_json("tiny", &[sketch]), "tiny.sig", 31, Moltype::Dna).unwrap_err();
        assert!(matches!(err, LoadError::InvalidSketch { .. }));
        assert!(err.to_string().contains("tiny.sig"));
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse("not json".to_string(), "x.sig", 31, Moltype::Dna).unwrap_err();
        assert!(matches!(err, LoadError::Signature { .. }));
        assert!(err.to_string().contains("x.sig"));
    }

    #[test]
    fn test_load_gzipped_file() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g.sig.gz");

        let text = sig_json("gz", &[Sketch::new(31, Moltype::Dna, 1000, [1, 2])]);
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        std::fs::write(&path, encoder.finish().unwrap()).unwrap();

        let records = SignatureLoader.load_samples(&path, 31, Moltype::Dna).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "gz");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_signature_file(Path::new("/nonexistent/x.sig"), 31, Moltype::Dna)
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
