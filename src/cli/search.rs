use std::path::PathBuf;

use clap::Args;

use crate::cli::{run_sweep, SketchArgs};
use crate::matching::single_query_sweep;
use crate::output::Layout;
use crate::parsing::SignatureLoader;

/// Columns reserved around the query name in the "Loaded" line
const LOADED_PREFIX_WIDTH: usize = 25;

#[derive(Args)]
pub struct SearchArgs {
    /// Sketch to look for (must hold exactly one sketch at the selected ksize/moltype)
    #[arg(required = true)]
    pub query_genome: PathBuf,

    /// Metagenome sketches to search
    #[arg(required = true)]
    pub metagenomes: Vec<PathBuf>,

    #[command(flatten)]
    pub sketch: SketchArgs,
}

/// Execute search subcommand
///
/// # Errors
///
/// Returns an error if the query does not resolve to exactly one sketch, a
/// metagenome cannot be loaded or lacks required abundance, or output fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SearchArgs, verbose: bool) -> anyhow::Result<()> {
    let options = args.sketch.options();
    let sweep = single_query_sweep(&SignatureLoader, &args.query_genome, &args.metagenomes, &options)?;

    let query = &sweep.queries()[0];
    println!(
        "Loaded query signature: {}",
        query.display_name(args.sketch.display_width.saturating_sub(LOADED_PREFIX_WIDTH))
    );

    if verbose {
        eprintln!(
            "Query has {} hashes at scaled={}; searching {} metagenomes",
            query.sketch.len(),
            query.sketch.scaled(),
            args.metagenomes.len()
        );
    }

    run_sweep(sweep, Layout::SingleQuery, &args.sketch)
}
