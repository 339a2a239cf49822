use std::io::Write;

use crate::core::sample::display_name;
use crate::matching::engine::ComparisonResult;

/// Width the query column takes in many-query output
const QUERY_NAME_WIDTH: usize = 17;

/// Columns before the subject name in single-query output
const SINGLE_PREFIX_WIDTH: usize = 41;

/// Columns before the subject name in many-query output
const MANY_PREFIX_WIDTH: usize = 21;

/// Which sweep the lines belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One query: the query column is omitted
    SingleQuery,
    /// Several queries: each line starts with the query name
    ManyQuery,
}

/// Condensed one-line-per-result display for the terminal
pub struct ConsoleReport<W: Write> {
    out: W,
    layout: Layout,
    width: usize,
    header_written: bool,
}

impl<W: Write> ConsoleReport<W> {
    /// `width` is the terminal width used to size the subject name column
    pub fn new(out: W, layout: Layout, width: usize) -> Self {
        Self {
            out,
            layout,
            width,
            header_written: false,
        }
    }

    fn write_header(&mut self) -> std::io::Result<()> {
        writeln!(self.out)?;
        match self.layout {
            Layout::SingleQuery => {
                writeln!(self.out, "p_genome avg_abund   p_metag   metagenome name")?;
                writeln!(self.out, "-------- ---------   -------   ---------------")?;
            }
            Layout::ManyQuery => {
                writeln!(
                    self.out,
                    "query             p_genome avg_abund   p_metag   metagenome name"
                )?;
                writeln!(
                    self.out,
                    "--------          -------- ---------   -------   ---------------"
                )?;
            }
        }
        Ok(())
    }

    /// Print one result, preceded by the column header on the first call
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the output cannot be written.
    pub fn write(&mut self, result: &ComparisonResult) -> std::io::Result<()> {
        if !self.header_written {
            self.write_header()?;
            self.header_written = true;
        }

        let pct_genome = format!("{:.1}", result.f_query * 100.0);
        let (avg_abund, pct_metag) = match &result.weighted {
            Some(w) => (
                format!("{:.1}", w.summary.mean),
                format!("{:.1}%", w.f_weighted * 100.0),
            ),
            None => ("N/A".to_string(), "N/A".to_string()),
        };

        let prefix_width = match self.layout {
            Layout::SingleQuery => SINGLE_PREFIX_WIDTH,
            Layout::ManyQuery => MANY_PREFIX_WIDTH,
        };
        let name = display_name(
            &result.match_name,
            &result.match_filename,
            &result.match_md5,
            self.width.saturating_sub(prefix_width),
        );

        if self.layout == Layout::ManyQuery {
            let query_name = display_name(
                &result.query_name,
                &result.query_filename,
                &result.query_md5,
                QUERY_NAME_WIDTH,
            );
            write!(self.out, "{query_name:<width$} ", width = QUERY_NAME_WIDTH)?;
        }

        writeln!(
            self.out,
            "{pct_genome:>6}%  {avg_abund:>6}     {pct_metag:>6}     {name}"
        )
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::engine::WeightedStats;
    use crate::matching::stats::AbundanceSummary;
    use crate::output::test_support::sample_result;

    fn podar_result() -> ComparisonResult {
        let mut result = sample_result(Some(WeightedStats {
            total_abundance: 73489,
            found_abundance: 2276,
            f_weighted: 2276.0 / 73489.0,
            summary: AbundanceSummary {
                mean: 54.19,
                median: 53.0,
                std: 14.844,
            },
        }));
        result.f_query = 1.0;
        result.match_name = "SRR606249".to_string();
        result.query_name = "CP001472.1 Acidobacterium capsulatum ATCC 51196".to_string();
        result
    }

    fn render(layout: Layout, width: usize, results: &[ComparisonResult]) -> String {
        let mut buf = Vec::new();
        {
            let mut report = ConsoleReport::new(&mut buf, layout, width);
            for r in results {
                report.write(r).unwrap();
            }
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_single_query_line() {
        let out = render(Layout::SingleQuery, 80, &[podar_result()]);
        assert!(out.contains("p_genome avg_abund   p_metag   metagenome name"));
        assert!(out.contains("100.0%    54.2       3.1%     SRR606249"));
    }

    #[test]
    fn test_many_query_line() {
        let out = render(Layout::ManyQuery, 80, &[podar_result()]);
        assert!(out.starts_with("\nquery             p_genome"));
        assert!(out.contains("CP001472.1 Aci...  100.0%    54.2       3.1%     SRR606249"));
    }

    #[test]
    fn test_missing_abundance_shows_na() {
        let mut result = sample_result(None);
        result.f_query = 0.5;
        let out = render(Layout::SingleQuery, 80, &[result]);
        assert!(out.contains("  50.0%     N/A        N/A     metag"));
    }

    #[test]
    fn test_header_printed_once() {
        let out = render(Layout::SingleQuery, 80, &[podar_result(), podar_result()]);
        assert_eq!(out.matches("p_genome").count(), 1);
        assert_eq!(out.lines().filter(|l| l.contains("SRR606249")).count(), 2);
    }

    #[test]
    fn test_no_header_without_rows() {
        assert!(render(Layout::SingleQuery, 80, &[]).is_empty());
    }

    #[test]
    fn test_name_truncated_to_width() {
        let mut result = podar_result();
        result.match_name = "x".repeat(100);
        let out = render(Layout::SingleQuery, 51, &[result]);
        let line = out.lines().last().unwrap();
        assert!(line.ends_with(&format!("{}...", "x".repeat(7))));
    }
}
