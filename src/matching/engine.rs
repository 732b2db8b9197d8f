use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::catalog::builder::ColumnMap;
use crate::catalog::source::{load_or_seed, RowSource};
use crate::catalog::store::PartCatalog;
use crate::core::record::CrossReferenceRecord;
use crate::matching::normalize::normalize;
use crate::matching::scoring::{rank_suggestions, similarity, Suggestion};
use crate::matching::tiers::{MatchTier, TieredMatcher};

/// Default minimum length of the contained string for substring matches
pub const DEFAULT_MIN_CONTAINS_LEN: usize = 4;

/// Default minimum query length for prefix matches
pub const DEFAULT_MIN_PREFIX_LEN: usize = 5;

/// Default similarity a suggestion must exceed
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.6;

/// Default number of suggestions shown to users
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Configuration for the matching engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum length of the contained string for substring tiers
    pub min_contains_len: usize,
    /// Minimum query length for the prefix tier
    pub min_prefix_len: usize,
    /// Suggestions must score strictly above this similarity
    pub similarity_threshold: f64,
    /// How many suggestions callers should display
    pub suggestion_limit: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_contains_len: DEFAULT_MIN_CONTAINS_LEN,
            min_prefix_len: DEFAULT_MIN_PREFIX_LEN,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

/// A catalog record matched by a query
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// The query (as given) that first produced this record
    pub query: String,

    /// The matched record
    pub record: CrossReferenceRecord,

    /// The tier that accepted the match
    pub tier: MatchTier,
}

/// The cross-reference lookup engine.
///
/// Owns its catalog, which is loaded on first use (or by an explicit
/// [`initialize`](Self::initialize) call) exactly once, even when several
/// threads query concurrently. The catalog is read-only afterwards.
pub struct MatchEngine {
    config: MatchingConfig,
    columns: ColumnMap,
    source: Option<Box<dyn RowSource>>,
    catalog: OnceLock<PartCatalog>,
}

impl MatchEngine {
    /// Create an engine backed by the embedded seed catalog
    pub fn new(config: MatchingConfig) -> Self {
        Self {
            config,
            columns: ColumnMap::default(),
            source: None,
            catalog: OnceLock::new(),
        }
    }

    /// Create an engine that loads its catalog from `source`
    pub fn with_source(config: MatchingConfig, source: impl RowSource + 'static) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..Self::new(config)
        }
    }

    /// Create an engine over an already-built catalog
    pub fn from_catalog(catalog: PartCatalog, config: MatchingConfig) -> Self {
        let engine = Self::new(config);
        // A fresh OnceLock is always empty
        let _ = engine.catalog.set(catalog);
        engine
    }

    /// Use a custom column mapping for tabular sources
    #[must_use]
    pub fn with_columns(mut self, columns: ColumnMap) -> Self {
        self.columns = columns;
        self
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Load the catalog if that has not happened yet, and return it.
    ///
    /// Concurrent first callers block until the single load completes.
    pub fn initialize(&self) -> &PartCatalog {
        self.catalog
            .get_or_init(|| load_or_seed(self.source.as_deref(), &self.columns))
    }

    pub fn is_initialized(&self) -> bool {
        self.catalog.get().is_some()
    }

    /// The catalog, loading it on first access
    pub fn catalog(&self) -> &PartCatalog {
        self.initialize()
    }

    /// Find the records matching any of `queries`.
    ///
    /// Matches are concatenated in query order, then deduplicated by
    /// (original model, replacement model) keeping the first occurrence.
    pub fn search<S: AsRef<str>>(&self, queries: &[S]) -> Vec<CrossReferenceRecord> {
        self.find_matches(queries)
            .into_iter()
            .map(|m| m.record)
            .collect()
    }

    /// Like [`search`](Self::search), also reporting the query and tier
    /// behind each record
    pub fn find_matches<S: AsRef<str>>(&self, queries: &[S]) -> Vec<MatchResult> {
        let catalog = self.initialize();
        let matcher = TieredMatcher::new(&self.config);

        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        let mut results = Vec::new();

        for query in queries {
            let query = query.as_ref();
            let normalized = normalize(query);
            let mut count = 0usize;

            for (record, target) in catalog.entries() {
                let Some(tier) = matcher.matching_tier(&normalized, target) else {
                    continue;
                };
                count += 1;
                if seen.insert(record.dedup_key()) {
                    results.push(MatchResult {
                        query: query.to_string(),
                        record: record.clone(),
                        tier,
                    });
                }
            }

            tracing::debug!(
                "Query '{}' (normalized '{}') matched {} records",
                query,
                normalized,
                count
            );
        }

        results
    }

    /// Catalog records whose original model resembles `query`.
    ///
    /// Every record scoring above the configured similarity threshold is
    /// returned, most similar first; callers truncate to
    /// [`MatchingConfig::suggestion_limit`] for display.
    pub fn suggest(&self, query: &str) -> Vec<Suggestion> {
        let catalog = self.initialize();
        let normalized = normalize(query);

        let mut suggestions: Vec<Suggestion> = catalog
            .entries()
            .filter_map(|(record, target)| {
                let score = similarity(&normalized, target);
                (score > self.config.similarity_threshold).then(|| Suggestion {
                    record: record.clone(),
                    similarity: score,
                })
            })
            .collect();

        rank_suggestions(&mut suggestions);
        suggestions
    }
}
