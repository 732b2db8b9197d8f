use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::core::types::ReplaceType;
use crate::export::table::write_records;
use crate::matching::engine::MatchEngine;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all records in the catalog
    List {
        /// Only show records of this replacement type
        #[arg(long, value_enum)]
        replace_type: Option<ReplaceTypeArg>,

        /// Only show records whose original brand contains this text
        #[arg(long)]
        brand: Option<String>,
    },

    /// Show record counts per replacement type
    Stats,

    /// Export the loaded catalog as JSON
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,
    },
}

/// Replacement type argument for CLI
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ReplaceTypeArg {
    P2p,
    Functional,
}

impl From<ReplaceTypeArg> for ReplaceType {
    fn from(arg: ReplaceTypeArg) -> Self {
        match arg {
            ReplaceTypeArg::P2p => Self::PinToPin,
            ReplaceTypeArg::Functional => Self::FunctionalEquivalent,
        }
    }
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: CatalogArgs,
    engine: &MatchEngine,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = engine.catalog();

    if verbose {
        eprintln!("Catalog source: {}", catalog.origin());
    }

    match args.command {
        CatalogCommands::List {
            replace_type,
            brand,
        } => {
            let replace_type = replace_type.map(ReplaceType::from);
            let brand = brand.map(|b| b.to_lowercase());
            let records: Vec<_> = catalog
                .records()
                .iter()
                .filter(|r| replace_type.map_or(true, |t| r.replace_type == t))
                .filter(|r| {
                    brand
                        .as_deref()
                        .map_or(true, |b| r.original_brand.to_lowercase().contains(b))
                })
                .cloned()
                .collect();

            match format {
                OutputFormat::Text => {
                    for record in &records {
                        println!("{record}");
                    }
                    println!("\n{} record(s)", records.len());
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&records)?);
                }
                OutputFormat::Tsv => {
                    write_records(&records, std::io::stdout().lock(), b'\t')?;
                }
            }
        }

        CatalogCommands::Stats => {
            let stats = catalog.stats();
            match format {
                OutputFormat::Text => {
                    println!("Source:     {}", catalog.origin());
                    println!("Records:    {}", stats.total);
                    println!("P2P:        {}", stats.pin_to_pin);
                    println!("Functional: {}", stats.functional);
                }
                OutputFormat::Json => {
                    let output = serde_json::json!({
                        "source": catalog.origin(),
                        "stats": stats,
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Tsv => {
                    println!("total\tpin_to_pin\tfunctional");
                    println!(
                        "{}\t{}\t{}",
                        stats.total, stats.pin_to_pin, stats.functional
                    );
                }
            }
        }

        CatalogCommands::Export { output } => {
            let json = catalog.to_json()?;
            std::fs::write(&output, json)?;
            eprintln!(
                "Exported {} record(s) to {}",
                catalog.len(),
                output.display()
            );
        }
    }

    Ok(())
}
