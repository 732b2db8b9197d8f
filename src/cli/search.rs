use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::export::table::{timestamped_file_name, write_records};
use crate::matching::engine::{MatchEngine, MatchResult};
use crate::matching::Suggestion;
use crate::parsing::tabular::detect_delimiter;
use crate::utils::validation::{clean_queries, split_batch_input};

/// File name stem for exports without an explicit path
const EXPORT_FILE_STEM: &str = "chip_xref_results";

#[derive(Args)]
pub struct SearchArgs {
    /// Part numbers to look up. Use '-' to read a batch from stdin
    /// (separated by commas, whitespace, or newlines)
    #[arg(required = true)]
    pub queries: Vec<String>,

    /// Also write the results to a CSV or TSV file. Without a path the
    /// results go to a timestamped CSV in the current directory
    #[arg(long, value_name = "PATH")]
    #[allow(clippy::option_option)] // absent / flag only / flag with path
    pub export: Option<Option<PathBuf>>,

    /// Do not show suggestions when nothing matches
    #[arg(long)]
    pub no_suggestions: bool,
}

/// Execute search subcommand
///
/// # Errors
///
/// Returns an error if the queries are invalid, stdin cannot be read, or
/// output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: SearchArgs,
    engine: &MatchEngine,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let queries = collect_queries(&args.queries)?;

    if verbose {
        eprintln!(
            "Searching {} part number(s) against {} catalog records",
            queries.len(),
            engine.catalog().len()
        );
    }

    let matches = engine.find_matches(&queries);

    let suggestions = if matches.is_empty() && queries.len() == 1 && !args.no_suggestions {
        let mut suggestions = engine.suggest(&queries[0]);
        suggestions.truncate(engine.config().suggestion_limit);
        suggestions
    } else {
        Vec::new()
    };

    match format {
        OutputFormat::Text => print_text_results(&matches, &suggestions, verbose),
        OutputFormat::Json => print_json_results(&queries, &matches, &suggestions)?,
        OutputFormat::Tsv => print_tsv_results(&matches)?,
    }

    if let Some(path) = &args.export {
        let path = path
            .clone()
            .unwrap_or_else(|| PathBuf::from(timestamped_file_name(EXPORT_FILE_STEM, "csv")));
        let path = path.as_path();
        let records: Vec<_> = matches.iter().map(|m| m.record.clone()).collect();
        let file = std::fs::File::create(path)?;
        write_records(&records, file, detect_delimiter(path))?;
        eprintln!("Exported {} record(s) to {}", records.len(), path.display());
    }

    Ok(())
}

/// Expand '-' into stdin contents and validate the batch
fn collect_queries(raw: &[String]) -> anyhow::Result<Vec<String>> {
    use std::io::{self, Read};

    let mut queries = Vec::new();
    for query in raw {
        if query == "-" {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            queries.extend(split_batch_input(&buffer));
        } else {
            queries.push(query.clone());
        }
    }

    Ok(clean_queries(queries)?)
}

fn print_text_results(matches: &[MatchResult], suggestions: &[Suggestion], verbose: bool) {
    if matches.is_empty() {
        println!("No matching replacements found.");
        if !suggestions.is_empty() {
            println!("\nDid you mean:");
            for s in suggestions {
                println!(
                    "  {} ({:.0}% similar)",
                    s.record.original_model,
                    s.similarity * 100.0
                );
            }
        }
        return;
    }

    println!("Found {} replacement(s)\n", matches.len());
    for (i, m) in matches.iter().enumerate() {
        let record = &m.record;
        println!("{}. {}", i + 1, record);
        println!("   Function: {}", record.function);
        if verbose {
            println!("   Matched '{}' via {}", m.query, m.tier);
        }
    }

    let pin_to_pin = matches
        .iter()
        .filter(|m| m.record.replace_type.is_pin_to_pin())
        .count();
    println!(
        "\n{} P2P, {} functional",
        pin_to_pin,
        matches.len() - pin_to_pin
    );
}

fn print_json_results(
    queries: &[String],
    matches: &[MatchResult],
    suggestions: &[Suggestion],
) -> anyhow::Result<()> {
    let results: Vec<serde_json::Value> = matches
        .iter()
        .map(|m| {
            serde_json::json!({
                "query": m.query,
                "tier": m.tier.label(),
                "record": m.record,
            })
        })
        .collect();

    let output = serde_json::json!({
        "queries": queries,
        "matches": results,
        "suggestions": suggestions,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(matches: &[MatchResult]) -> anyhow::Result<()> {
    let records: Vec<_> = matches.iter().map(|m| m.record.clone()).collect();
    write_records(&records, std::io::stdout().lock(), b'\t')?;
    Ok(())
}
