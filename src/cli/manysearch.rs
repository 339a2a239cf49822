use std::path::PathBuf;

use clap::Args;

use crate::cli::{run_sweep, SketchArgs};
use crate::matching::many_query_sweep;
use crate::output::Layout;
use crate::parsing::SignatureLoader;

#[derive(Args)]
pub struct ManySearchArgs {
    /// Sketches to look for (a file may hold several)
    #[arg(long, visible_alias = "query", num_args = 1.., required = true)]
    pub queries: Vec<PathBuf>,

    /// Metagenome sketches to search
    #[arg(
        long,
        visible_aliases = ["db", "metagenomes"],
        num_args = 1..,
        required = true
    )]
    pub against: Vec<PathBuf>,

    #[command(flatten)]
    pub sketch: SketchArgs,
}

/// Execute manysearch subcommand
///
/// # Errors
///
/// Returns an error if no query sketch is found, a metagenome cannot be
/// loaded or lacks required abundance, or output fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ManySearchArgs, verbose: bool) -> anyhow::Result<()> {
    let options = args.sketch.options();
    let sweep = many_query_sweep(&SignatureLoader, &args.queries, &args.against, &options)?;

    println!("Loaded {} query signatures.", sweep.queries().len());

    if verbose {
        eprintln!(
            "Searching {} metagenomes for {} queries",
            args.against.len(),
            sweep.queries().len()
        );
    }

    run_sweep(sweep, Layout::ManyQuery, &args.sketch)
}
