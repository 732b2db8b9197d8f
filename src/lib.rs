//! # chip-xref
//!
//! A library for finding replacement parts for electronic components.
//!
//! Given one or more original chip part numbers, `chip-xref` looks them up in
//! a cross-reference catalog and returns the catalogued replacements, each
//! classified as pin-to-pin compatible ("P2P") or a functional equivalent.
//!
//! Part numbers arrive in every imaginable spelling (`tlv 733-33`,
//! `TLV73333PDBVR`, `73333`), so lookup is not a plain key match:
//!
//! - **Normalization**: case, separators and punctuation are discarded
//! - **Tiered matching**: exact, substring in either direction, prefix, and
//!   series rules for well-known part families
//! - **Batch deduplication**: one row per original/replacement pair
//! - **Suggestions**: edit-distance ranking when nothing matches
//!
//! ## Example
//!
//! ```rust
//! use chip_xref::{MatchEngine, MatchingConfig};
//!
//! // Without a catalog source the engine uses the embedded seed catalog
//! let engine = MatchEngine::new(MatchingConfig::default());
//!
//! let records = engine.search(&["LM2903"]);
//! for record in &records {
//!     println!("{record}");
//! }
//!
//! if records.is_empty() {
//!     for suggestion in engine.suggest("LM2930") {
//!         println!("{} ({:.2})", suggestion.record.original_model, suggestion.similarity);
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Catalog storage, row ingestion, and replacement classification
//! - [`core`]: Cross-reference record types
//! - [`matching`]: Normalization, tiered matching, and suggestions
//! - [`parsing`]: CSV/TSV readers for the cross-reference table
//! - [`export`]: Writing search results to CSV/TSV
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: JSON HTTP service

pub mod catalog;
pub mod cli;
pub mod core;
pub mod export;
pub mod matching;
pub mod parsing;
pub mod utils;
pub mod web;

pub use catalog::store::PartCatalog;
pub use core::record::CrossReferenceRecord;
pub use core::types::ReplaceType;
pub use matching::engine::{MatchEngine, MatchResult, MatchingConfig};
pub use matching::normalize::normalize;
pub use matching::Suggestion;
