use clap::Parser;
use tracing_subscriber::EnvFilter;

use seqrepo::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("seqrepo=debug,info")
    } else {
        EnvFilter::new("seqrepo=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Inspect(args) => {
            cli::inspect::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Mutate(args) => {
            cli::mutate::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Query(args) => {
            cli::query::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Alphabets => {
            cli::alphabets::run(cli.format)?;
        }
    }

    Ok(())
}
