use clap::Parser;
use tracing_subscriber::EnvFilter;

use containment_search::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("containment_search=debug,info")
    } else {
        EnvFilter::new("containment_search=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Search(args) => {
            cli::search::run(args, cli.verbose)?;
        }
        cli::Commands::Manysearch(args) => {
            cli::manysearch::run(args, cli.verbose)?;
        }
    }

    Ok(())
}
