use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::record::CrossReferenceRecord;
use crate::core::types::ReplaceType;
use crate::matching::normalize::normalize;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub records: Vec<CrossReferenceRecord>,
}

/// Where the records of a catalog came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogOrigin {
    /// The seed catalog compiled into the binary
    Embedded,
    /// A JSON catalog file
    Json(String),
    /// A tabular (CSV/TSV) cross-reference table
    Tabular(String),
    /// Built in memory
    Memory,
}

impl std::fmt::Display for CatalogOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded seed catalog"),
            Self::Json(path) => write!(f, "JSON catalog {path}"),
            Self::Tabular(path) => write!(f, "cross-reference table {path}"),
            Self::Memory => write!(f, "in-memory catalog"),
        }
    }
}

/// Counts of records per replacement type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub pin_to_pin: usize,
    pub functional: usize,
}

/// The cross-reference catalog with normalized lookup keys
#[derive(Debug)]
pub struct PartCatalog {
    /// All records, in load order
    records: Vec<CrossReferenceRecord>,

    /// Normalized original model, parallel to `records`
    normalized: Vec<String>,

    origin: CatalogOrigin,
}

impl PartCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            normalized: Vec::new(),
            origin: CatalogOrigin::Memory,
        }
    }

    /// Load the embedded seed catalog
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time via build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/seed_catalog.json");
        Ok(Self::from_json(EMBEDDED_CATALOG)?.with_origin(CatalogOrigin::Embedded))
    }

    /// Load catalog from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?.with_origin(CatalogOrigin::Json(path.display().to_string())))
    }

    /// Parse catalog from JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            tracing::warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION,
                data.version
            );
        }

        Ok(Self::from_records(data.records))
    }

    /// Build a catalog from records, dropping invalid ones
    pub fn from_records(records: impl IntoIterator<Item = CrossReferenceRecord>) -> Self {
        let mut catalog = Self::new();
        for record in records {
            catalog.add_record(record);
        }
        catalog
    }

    #[must_use]
    pub fn with_origin(mut self, origin: CatalogOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Add a record to the catalog.
    ///
    /// Returns `false` (and stores nothing) when either part number is blank.
    pub fn add_record(&mut self, record: CrossReferenceRecord) -> bool {
        if !record.is_valid() {
            return false;
        }
        self.normalized.push(normalize(&record.original_model));
        self.records.push(record);
        true
    }

    /// All records, in load order
    pub fn records(&self) -> &[CrossReferenceRecord] {
        &self.records
    }

    /// Records paired with their normalized original model
    pub fn entries(&self) -> impl Iterator<Item = (&CrossReferenceRecord, &str)> {
        self.records
            .iter()
            .zip(self.normalized.iter().map(String::as_str))
    }

    pub fn origin(&self) -> &CatalogOrigin {
        &self.origin
    }

    /// Count records per replacement type
    pub fn stats(&self) -> CatalogStats {
        let pin_to_pin = self
            .records
            .iter()
            .filter(|r| r.replace_type == ReplaceType::PinToPin)
            .count();
        CatalogStats {
            total: self.records.len(),
            pin_to_pin,
            functional: self.records.len() - pin_to_pin,
        }
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            records: self.records.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of records in catalog
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for PartCatalog {
    fn default() -> Self {
        Self::new()
    }
}
