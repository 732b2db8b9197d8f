//! Catalog ingestion with seed fallback.
//!
//! The catalog is read from a [`RowSource`], normally a cross-reference
//! table on disk. Ingestion never fails outright: when the source is
//! missing, unreadable or yields no usable record, the embedded seed catalog
//! is used instead.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::builder::{CatalogBuilder, ColumnMap, RawRow};
use crate::catalog::store::{CatalogOrigin, PartCatalog};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Catalog file not found: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed table: {0}")]
    Csv(#[from] csv::Error),

    #[error("No rows found in {0}")]
    Empty(PathBuf),
}

/// Produces raw tabular rows for catalog construction
pub trait RowSource: Send + Sync {
    /// Read all rows
    ///
    /// # Errors
    ///
    /// Returns an [`IngestError`] when the underlying table cannot be read.
    fn load_rows(&self) -> Result<Vec<RawRow>, IngestError>;

    /// Human-readable description used in logs and catalog origin
    fn describe(&self) -> String;
}

/// Load the embedded seed catalog.
///
/// The seed is validated by the build script, so a failure here means the
/// binary itself is broken; the engine then serves an empty catalog.
pub fn seed_catalog() -> PartCatalog {
    PartCatalog::load_embedded().unwrap_or_else(|e| {
        tracing::error!("Embedded seed catalog is unusable: {}", e);
        PartCatalog::new().with_origin(CatalogOrigin::Embedded)
    })
}

/// Build the catalog from `source`, falling back to the seed catalog.
pub fn load_or_seed(source: Option<&dyn RowSource>, columns: &ColumnMap) -> PartCatalog {
    let Some(source) = source else {
        tracing::info!("No cross-reference table configured, using embedded seed catalog");
        return log_loaded(seed_catalog());
    };

    let description = source.describe();
    let rows = match source.load_rows() {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(
                "Failed to load {}: {}; falling back to embedded seed catalog",
                description,
                e
            );
            return log_loaded(seed_catalog());
        }
    };

    let report = CatalogBuilder::new(columns.clone())
        .build(&rows, CatalogOrigin::Tabular(description.clone()));

    if report.catalog.is_empty() {
        tracing::warn!(
            "{} produced no valid records ({} rows read); falling back to embedded seed catalog",
            description,
            report.rows_read
        );
        return log_loaded(seed_catalog());
    }

    if report.rows_skipped > 0 {
        tracing::info!(
            "Skipped {} of {} rows without both part numbers",
            report.rows_skipped,
            report.rows_read
        );
    }

    log_loaded(report.catalog)
}

/// Load a JSON catalog file, falling back to the seed catalog when the file
/// cannot be read or parsed, or holds no valid record.
pub fn load_json_or_seed(path: &Path) -> PartCatalog {
    match PartCatalog::load_from_file(path) {
        Ok(catalog) if !catalog.is_empty() => log_loaded(catalog),
        Ok(_) => {
            tracing::warn!(
                "{} contains no valid records; falling back to embedded seed catalog",
                path.display()
            );
            log_loaded(seed_catalog())
        }
        Err(e) => {
            tracing::warn!(
                "Failed to load {}: {}; falling back to embedded seed catalog",
                path.display(),
                e
            );
            log_loaded(seed_catalog())
        }
    }
}

fn log_loaded(catalog: PartCatalog) -> PartCatalog {
    let stats = catalog.stats();
    tracing::info!(
        "Loaded {} records from {} ({} P2P, {} functional)",
        stats.total,
        catalog.origin(),
        stats.pin_to_pin,
        stats.functional
    );
    catalog
}
