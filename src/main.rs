use clap::Parser;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod core;
mod export;
mod matching;
mod parsing;
mod utils;
mod web;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("chip_xref=debug,info")
    } else {
        EnvFilter::new("chip_xref=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let engine = cli.engine.build_engine();

    match cli.command {
        cli::Commands::Search(args) => {
            cli::search::run(args, &engine, cli.format, cli.verbose)?;
        }
        cli::Commands::Suggest(args) => {
            cli::suggest::run(args, &engine, cli.format, cli.verbose)?;
        }
        cli::Commands::Catalog(args) => {
            cli::catalog::run(args, &engine, cli.format, cli.verbose)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args, engine)?;
        }
    }

    Ok(())
}
