use clap::Args;

use crate::cli::OutputFormat;
use crate::matching::engine::MatchEngine;
use crate::utils::validation::clean_queries;

#[derive(Args)]
pub struct SuggestArgs {
    /// Part number to find similar catalog entries for
    #[arg(required = true)]
    pub query: String,

    /// Maximum number of suggestions (defaults to --suggestion-limit)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Execute suggest subcommand
///
/// # Errors
///
/// Returns an error if the query is blank or output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: SuggestArgs,
    engine: &MatchEngine,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let query = clean_queries([&args.query])?.remove(0);
    let limit = args.limit.unwrap_or(engine.config().suggestion_limit);

    let mut suggestions = engine.suggest(&query);
    if verbose {
        eprintln!(
            "{} catalog record(s) above {:.0}% similarity",
            suggestions.len(),
            engine.config().similarity_threshold * 100.0
        );
    }
    suggestions.truncate(limit);

    match format {
        OutputFormat::Text => {
            if suggestions.is_empty() {
                println!("No similar part numbers found.");
            }
            for (i, s) in suggestions.iter().enumerate() {
                println!(
                    "{}. {} ({:.0}% similar)",
                    i + 1,
                    s.record,
                    s.similarity * 100.0
                );
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "query": query,
                "suggestions": suggestions,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("original_model\treplacement_model\tsimilarity");
            for s in &suggestions {
                println!(
                    "{}\t{}\t{:.4}",
                    s.record.original_model, s.record.replacement_model, s.similarity
                );
            }
        }
    }

    Ok(())
}
