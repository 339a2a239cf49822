//! Rendering of comparison results.
//!
//! Results go to two places:
//!
//! - [`CsvReport`]: a fixed 26-column CSV table for durable output; weighted
//!   columns are left empty when the subject has no abundance information
//! - [`ConsoleReport`]: one condensed line per result for the terminal,
//!   showing query containment, mean abundance and weighted containment
//!
//! [`ResultSink`] feeds both and remembers whether any subject lacked
//! abundance, so that a single note can be printed when the sweep ends.

use std::io::Write;

use thiserror::Error;

use crate::matching::engine::ComparisonResult;

pub mod console;
pub mod table;

pub use console::{ConsoleReport, Layout};
pub use table::{CsvReport, COLUMNS};

/// Printed after a sweep in which some subject had no abundance information
pub const MISSING_ABUNDANCE_NOTE: &str =
    "** Note: N/A in column values indicate metagenomes w/o abundance tracking.";

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// What a finished sweep produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Number of results written
    pub rows: usize,

    /// At least one subject had no abundance information
    pub missing_abundance: bool,
}

impl SweepSummary {
    /// Advisory note to show the user, if any
    pub fn note(&self) -> Option<&'static str> {
        self.missing_abundance.then_some(MISSING_ABUNDANCE_NOTE)
    }
}

/// Sends each result to the optional CSV table and to the console
pub struct ResultSink<C: Write, W: Write> {
    csv: Option<CsvReport<C>>,
    console: ConsoleReport<W>,
    summary: SweepSummary,
}

impl<C: Write, W: Write> ResultSink<C, W> {
    pub fn new(csv: Option<CsvReport<C>>, console: ConsoleReport<W>) -> Self {
        Self {
            csv,
            console,
            summary: SweepSummary::default(),
        }
    }

    /// # Errors
    ///
    /// Returns an `OutputError` if either output cannot be written.
    pub fn record(&mut self, result: &ComparisonResult) -> Result<(), OutputError> {
        if let Some(csv) = &mut self.csv {
            csv.write(result)?;
        }
        self.console.write(result)?;

        self.summary.rows += 1;
        self.summary.missing_abundance |= !result.has_abundance();
        Ok(())
    }

    /// Flush both outputs and report what was written
    ///
    /// # Errors
    ///
    /// Returns an `OutputError` if buffered output cannot be flushed.
    pub fn finish(mut self) -> Result<SweepSummary, OutputError> {
        if let Some(csv) = &mut self.csv {
            csv.flush()?;
        }
        self.console.flush()?;
        Ok(self.summary)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::engine::WeightedStats;
    use crate::matching::stats::AbundanceSummary;
    use super::test_support::sample_result;

    fn weighted() -> WeightedStats {
        WeightedStats {
            total_abundance: 5,
            found_abundance: 5,
            f_weighted: 1.0,
            summary: AbundanceSummary {
                mean: 5.0,
                median: 5.0,
                std: 0.0,
            },
        }
    }

    #[test]
    fn test_sink_tracks_missing_abundance() {
        let mut table = Vec::new();
        let mut screen = Vec::new();
        let summary = {
            let csv = CsvReport::new(&mut table).unwrap();
            let console = ConsoleReport::new(&mut screen, Layout::SingleQuery, 80);
            let mut sink = ResultSink::new(Some(csv), console);
            sink.record(&sample_result(Some(weighted()))).unwrap();
            sink.record(&sample_result(None)).unwrap();
            sink.finish().unwrap()
        };

        assert_eq!(summary.rows, 2);
        assert!(summary.missing_abundance);
        assert_eq!(summary.note(), Some(MISSING_ABUNDANCE_NOTE));
        assert_eq!(String::from_utf8(table).unwrap().lines().count(), 3);
        assert!(String::from_utf8(screen).unwrap().contains("N/A"));
    }

    #[test]
    fn test_sink_no_note_when_all_have_abundance() {
        let mut screen = Vec::new();
        let console = ConsoleReport::new(&mut screen, Layout::ManyQuery, 80);
        let mut sink: ResultSink<Vec<u8>, _> = ResultSink::new(None, console);
        sink.record(&sample_result(Some(weighted()))).unwrap();

        let summary = sink.finish().unwrap();
        assert_eq!(summary.rows, 1);
        assert_eq!(summary.note(), None);
    }

    #[test]
    fn test_sink_empty_sweep() {
        let mut screen = Vec::new();
        let console = ConsoleReport::new(&mut screen, Layout::SingleQuery, 80);
        let sink: ResultSink<Vec<u8>, _> = ResultSink::new(None, console);

        assert_eq!(sink.finish().unwrap(), SweepSummary::default());
        assert!(screen.is_empty());
    }
}
