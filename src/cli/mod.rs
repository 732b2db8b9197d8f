//! Command-line interface for chip-xref.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **search**: Find replacements for one or more part numbers
//! - **suggest**: Show catalogued parts resembling a part number
//! - **catalog**: List, summarize, or export the loaded catalog
//! - **serve**: Start the HTTP lookup service
//!
//! ## Usage
//!
//! ```text
//! # Look up a single part
//! chip-xref search STM32F103C8T6
//!
//! # Batch lookup from a BOM column
//! cut -d, -f3 bom.csv | chip-xref search -
//!
//! # Use a cross-reference table instead of the built-in seed data
//! chip-xref --catalog database/cross_reference.csv search TLV73333
//!
//! # JSON output for scripting
//! chip-xref search LM4050 --format json
//!
//! # Start the service
//! chip-xref serve --port 8080
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::catalog::source::load_json_or_seed;
use crate::matching::engine::{
    MatchEngine, MatchingConfig, DEFAULT_MIN_CONTAINS_LEN, DEFAULT_MIN_PREFIX_LEN,
    DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_SUGGESTION_LIMIT,
};
use crate::parsing::tabular::TabularFileSource;

pub mod catalog;
pub mod search;
pub mod suggest;

#[derive(Parser)]
#[command(name = "chip-xref")]
#[command(version)]
#[command(about = "Find pin-to-pin and functional replacements for chip part numbers")]
#[command(
    long_about = "chip-xref looks up electronic component part numbers in a cross-reference catalog.\n\nFor each part it lists catalogued replacements and whether each one is:\n- P2P: same footprint and pinout, a drop-in replacement\n- 功能替代: functionally equivalent, may need board changes\n\nWhen nothing matches, similar catalogued part numbers are suggested."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find replacements for part numbers
    Search(search::SearchArgs),

    /// Suggest catalogued parts similar to a part number
    Suggest(suggest::SuggestArgs),

    /// Inspect the loaded catalog
    Catalog(catalog::CatalogArgs),

    /// Start the web server
    Serve(ServeArgs),
}

/// Catalog source and matching thresholds, shared by all commands
#[derive(clap::Args, Debug, Clone)]
pub struct EngineArgs {
    /// Cross-reference table (.csv, .tsv) or exported catalog (.json).
    /// The built-in seed catalog is used when omitted or unreadable.
    #[arg(long, global = true, env = "CHIP_XREF_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Table to read if the primary cross-reference table cannot be read
    #[arg(long, global = true)]
    pub backup_catalog: Option<PathBuf>,

    /// Field delimiter of the cross-reference table (default: from the
    /// file extension, tab for .tsv/.tab/.txt, comma otherwise)
    #[arg(long, global = true, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// Minimum length for substring matches
    #[arg(long, global = true, default_value_t = DEFAULT_MIN_CONTAINS_LEN)]
    pub min_contains_len: usize,

    /// Minimum query length for prefix matches
    #[arg(long, global = true, default_value_t = DEFAULT_MIN_PREFIX_LEN)]
    pub min_prefix_len: usize,

    /// Similarity a suggestion must exceed (0.0-1.0)
    #[arg(long, global = true, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    pub similarity_threshold: f64,

    /// Number of suggestions to show when nothing matches
    #[arg(long, global = true, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
    pub suggestion_limit: usize,
}

impl EngineArgs {
    #[must_use]
    pub fn matching_config(&self) -> MatchingConfig {
        MatchingConfig {
            min_contains_len: self.min_contains_len,
            min_prefix_len: self.min_prefix_len,
            similarity_threshold: self.similarity_threshold,
            suggestion_limit: self.suggestion_limit,
        }
    }

    /// Build the engine for the configured catalog.
    ///
    /// JSON catalogs are loaded eagerly, tabular sources lazily on first
    /// use. Either falls back to the seed catalog when it cannot be loaded.
    #[must_use]
    pub fn build_engine(&self) -> MatchEngine {
        let config = self.matching_config();

        let Some(path) = &self.catalog else {
            return MatchEngine::new(config);
        };

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            return MatchEngine::from_catalog(load_json_or_seed(path), config);
        }

        let mut source = TabularFileSource::new(path);
        if let Some(backup) = &self.backup_catalog {
            source = source.with_backup(backup);
        }
        if let Some(delimiter) = self.delimiter {
            source = source.with_delimiter(delimiter);
        }
        MatchEngine::with_source(config, source)
    }
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" => Ok(b'\t'),
        _ => match value.as_bytes() {
            [byte] => Ok(*byte),
            _ => Err(format!("expected a single ASCII character or 'tab', got '{value}'")),
        },
    }
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
