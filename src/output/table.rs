use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::matching::engine::ComparisonResult;
use crate::output::OutputError;

/// Column order of the results table
pub const COLUMNS: [&str; 26] = [
    "intersect_bp",
    "match_filename",
    "match_name",
    "match_md5",
    "query_filename",
    "query_name",
    "query_md5",
    "ksize",
    "moltype",
    "scaled",
    "f_query",
    "f_match",
    "f_match_weighted",
    "sum_weighted_found",
    "average_abund",
    "median_abund",
    "std_abund",
    "query_n_hashes",
    "match_n_hashes",
    "match_n_weighted_hashes",
    "jaccard",
    "genome_containment_ani",
    "match_containment_ani",
    "average_containment_ani",
    "max_containment_ani",
    "potential_false_negative",
];

/// One table row; field order must match [`COLUMNS`]
#[derive(Serialize)]
struct CsvRow<'a> {
    intersect_bp: u64,
    match_filename: &'a str,
    match_name: &'a str,
    match_md5: &'a str,
    query_filename: &'a str,
    query_name: &'a str,
    query_md5: &'a str,
    ksize: u32,
    moltype: &'static str,
    scaled: u64,
    f_query: f64,
    f_match: f64,
    f_match_weighted: Option<f64>,
    sum_weighted_found: Option<u64>,
    average_abund: Option<f64>,
    median_abund: Option<f64>,
    std_abund: Option<f64>,
    query_n_hashes: usize,
    match_n_hashes: usize,
    match_n_weighted_hashes: Option<u64>,
    jaccard: f64,
    genome_containment_ani: f64,
    match_containment_ani: f64,
    average_containment_ani: f64,
    max_containment_ani: f64,
    potential_false_negative: bool,
}

impl<'a> From<&'a ComparisonResult> for CsvRow<'a> {
    fn from(r: &'a ComparisonResult) -> Self {
        let weighted = r.weighted.as_ref();

        Self {
            intersect_bp: r.intersect_bp,
            match_filename: &r.match_filename,
            match_name: &r.match_name,
            match_md5: &r.match_md5,
            query_filename: &r.query_filename,
            query_name: &r.query_name,
            query_md5: &r.query_md5,
            ksize: r.ksize,
            moltype: r.moltype.as_str(),
            scaled: r.scaled,
            f_query: r.f_query,
            f_match: r.f_match,
            f_match_weighted: weighted.map(|w| w.f_weighted),
            sum_weighted_found: weighted.map(|w| w.found_abundance),
            average_abund: weighted.map(|w| w.summary.mean),
            median_abund: weighted.map(|w| w.summary.median),
            std_abund: weighted.map(|w| w.summary.std),
            query_n_hashes: r.query_n_hashes,
            match_n_hashes: r.match_n_hashes,
            match_n_weighted_hashes: weighted.map(|w| w.total_abundance),
            jaccard: r.jaccard,
            genome_containment_ani: r.genome_containment_ani,
            match_containment_ani: r.match_containment_ani,
            average_containment_ani: r.average_containment_ani,
            max_containment_ani: r.max_containment_ani,
            potential_false_negative: r.potential_false_negative,
        }
    }
}

/// Writes comparison results as CSV, one row per result.
///
/// The header is written on construction, so an empty sweep still produces it.
pub struct CsvReport<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvReport<File> {
    /// Create (or truncate) a CSV file at `path`
    ///
    /// # Errors
    ///
    /// Returns `OutputError::Csv` if the file cannot be created or written.
    pub fn create(path: &Path) -> Result<Self, OutputError> {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        Self::from_writer(writer)
    }
}

impl<W: Write> CsvReport<W> {
    /// # Errors
    ///
    /// Returns `OutputError::Csv` if the header cannot be written.
    pub fn new(inner: W) -> Result<Self, OutputError> {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        Self::from_writer(writer)
    }

    fn from_writer(mut writer: csv::Writer<W>) -> Result<Self, OutputError> {
        writer.write_record(COLUMNS)?;
        Ok(Self { writer })
    }

    /// # Errors
    ///
    /// Returns `OutputError::Csv` if the row cannot be written.
    pub fn write(&mut self, result: &ComparisonResult) -> Result<(), OutputError> {
        self.writer.serialize(CsvRow::from(result))?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `OutputError::Io` if buffered rows cannot be flushed.
    pub fn flush(&mut self) -> Result<(), OutputError> {
        self.writer.flush()?;
        Ok(())
    }
}
