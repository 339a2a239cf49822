//! Command-line interface for containment-search.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **search**: Search for one genome sketch in many metagenome sketches
//! - **manysearch**: Search for many genome sketches, loading each metagenome once
//!
//! ## Usage
//!
//! ```text
//! # Search for a genome in two metagenomes
//! containment-search search genome.sig metag1.sig metag2.sig
//!
//! # Save the full table
//! containment-search search genome.sig metag1.sig -o results.csv
//!
//! # Many genomes, each metagenome loaded once
//! containment-search manysearch --queries g1.sig g2.sig --against metag1.sig metag2.sig
//!
//! # Fail if any metagenome was sketched without abundance
//! containment-search search genome.sig metag1.sig --require-abundance
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::core::types::{Moltype, SearchOptions, DEFAULT_KSIZE, DEFAULT_SCALED};
use crate::matching::Sweep;
use crate::output::{ConsoleReport, CsvReport, Layout, ResultSink};
use crate::parsing::SampleLoader;

pub mod manysearch;
pub mod search;

#[derive(Parser)]
#[command(name = "containment-search")]
#[command(version)]
#[command(about = "Search for genomes in metagenomes using scaled sketches")]
#[command(
    long_about = "containment-search reports how much of a genome sketch is contained in each of a set of metagenome sketches.\n\nFor every genome/metagenome pair it reports:\n- Containment of the genome in the metagenome, and vice versa\n- ANI estimates from containment\n- Abundance-weighted containment, when the metagenome tracks abundance"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search for a genome in metagenomes
    #[command(alias = "mgsearch")]
    Search(search::SearchArgs),

    /// Search for many genomes in metagenomes, loading each metagenome once
    #[command(alias = "mgmanysearch")]
    Manysearch(manysearch::ManySearchArgs),
}

/// Sketch selection and output options shared by both searches
#[derive(clap::Args, Debug, Clone)]
pub struct SketchArgs {
    /// K-mer size to select
    #[arg(short, long, default_value_t = DEFAULT_KSIZE)]
    pub ksize: u32,

    /// Molecule type to select
    #[arg(long, value_enum, default_value = "dna")]
    pub moltype: Moltype,

    /// Scale factor to downsample queries to
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_SCALED,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub scaled: u64,

    /// Output CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Require that metagenomes be sketched with abundance
    #[arg(long)]
    pub require_abundance: bool,

    /// Terminal width used to size name columns
    #[arg(long, env = "COLUMNS", default_value_t = 80)]
    pub display_width: usize,
}

impl SketchArgs {
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            ksize: self.ksize,
            moltype: self.moltype,
            scaled: self.scaled,
            require_abundance: self.require_abundance,
        }
    }
}

/// Drain a sweep into the console and, if requested, a CSV file
fn run_sweep<L: SampleLoader + ?Sized>(
    sweep: Sweep<'_, L>,
    layout: Layout,
    args: &SketchArgs,
) -> anyhow::Result<()> {
    let csv = match &args.output {
        Some(path) => Some(
            CsvReport::create(path)
                .with_context(|| format!("cannot create output file '{}'", path.display()))?,
        ),
        None => None,
    };

    let console = ConsoleReport::new(std::io::stdout().lock(), layout, args.display_width);
    let mut sink = ResultSink::new(csv, console);

    for result in sweep {
        sink.record(&result?)?;
    }

    let summary = sink.finish()?;
    info!("Wrote {} results", summary.rows);
    if let Some(path) = &args.output {
        info!("Results saved to {}", path.display());
    }

    if let Some(note) = summary.note() {
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr)?;
        writeln!(stderr, "{note}")?;
    }

    Ok(())
}
