//! Part-number matching engine.
//!
//! This module provides the core lookup functionality:
//!
//! - [`MatchEngine`](engine::MatchEngine): Owns the catalog and answers queries
//! - [`normalize`](normalize::normalize): Canonical form used for all comparisons
//! - [`TieredMatcher`](tiers::TieredMatcher): Ordered match tiers and series rules
//! - [`Suggestion`]: "Did you mean" candidates ranked by edit distance
//!
//! ## Matching Algorithm
//!
//! Every query is normalized and compared against the normalized original
//! model of each catalog record. A record matches when any tier accepts it:
//!
//! 1. **Exact**: identical normalized strings
//! 2. **Containment**: either string contains the other, with a length floor
//! 3. **Prefix**: the record starts with the query, with a stricter floor
//! 4. **Series rules**: family-specific rules for short or numeric queries
//!
//! Results from a batch of queries are concatenated in query order and
//! deduplicated by (original model, replacement model).
//!
//! ## Suggestions
//!
//! When a query matches nothing, [`MatchEngine::suggest`](engine::MatchEngine::suggest)
//! ranks records by `(max_len - levenshtein) / max_len` and keeps those above
//! the configured threshold.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chip_xref::{MatchEngine, MatchingConfig};
//!
//! let engine = MatchEngine::new(MatchingConfig::default());
//!
//! let results = engine.search(&["STM32F103C8T6", "TLV73333PDBVR"]);
//! for record in &results {
//!     println!("{record}");
//! }
//!
//! if results.is_empty() {
//!     for s in engine.suggest("TLV7333PDBVR").iter().take(3) {
//!         println!("did you mean {} ({:.0}%)", s.record.original_model, s.similarity * 100.0);
//!     }
//! }
//! ```

pub mod engine;
pub mod normalize;
pub mod scoring;
pub mod tiers;

pub use scoring::Suggestion;
