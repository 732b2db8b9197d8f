//! Catalog construction from raw tabular rows.
//!
//! A cross-reference table arrives as rows of `column name -> cell text`.
//! [`CatalogBuilder`] maps the columns onto record fields through a
//! [`ColumnMap`], derives the replacement type from the annotation columns,
//! and skips rows that cannot form a valid record.

use std::collections::HashMap;
use thiserror::Error;

use crate::catalog::classify::classify;
use crate::catalog::store::{CatalogOrigin, PartCatalog};
use crate::core::record::CrossReferenceRecord;

/// One row of a tabular source: column name -> cell text
pub type RawRow = HashMap<String, String>;

/// Why a single row was skipped
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RowError {
    #[error("Missing original model")]
    MissingOriginalModel,

    #[error("Missing replacement model")]
    MissingReplacementModel,

    /// The sub-header row of the source spreadsheet repeated as data
    #[error("Header row repeated as data")]
    HeaderRow,
}

/// Cell value in the original-model column of the spreadsheet sub-header row
const SUB_HEADER_MARKER: &str = "型号";

/// Accepted column names for each record field.
///
/// The first name present in a row wins. The defaults accept snake_case
/// English headers as well as the headers of the FAE cross-reference
/// workbook, whose blank header cells are exported as `__EMPTY`,
/// `__EMPTY_1`, ...
#[derive(Debug, Clone)]
pub struct ColumnMap {
    pub original_model: Vec<String>,
    pub original_brand: Vec<String>,
    pub function: Vec<String>,
    pub replacement_brand: Vec<String>,
    pub replacement_model: Vec<String>,
    pub notes: Vec<String>,
    pub advantages: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            original_model: names(&["original_model", "目标料(客户提供)"]),
            original_brand: names(&["original_brand", "__EMPTY"]),
            function: names(&["function", "__EMPTY_1"]),
            replacement_brand: names(&["replacement_brand", "替代料(由FAE填写)"]),
            replacement_model: names(&["replacement_model", "__EMPTY_3"]),
            notes: names(&["notes", "__EMPTY_4"]),
            advantages: names(&["advantages", "__EMPTY_5"]),
        }
    }
}

impl ColumnMap {
    /// Trimmed value of the first accepted column present in `row`
    fn get<'r>(row: &'r RawRow, candidates: &[String]) -> &'r str {
        candidates
            .iter()
            .find_map(|name| row.get(name))
            .map_or("", |value| value.trim())
    }

    /// Convert one row into a record
    ///
    /// # Errors
    ///
    /// Returns a [`RowError`] when either part number is missing or the row
    /// is the spreadsheet's repeated sub-header.
    pub fn record_from_row(&self, row: &RawRow) -> Result<CrossReferenceRecord, RowError> {
        let original_model = Self::get(row, &self.original_model);
        let replacement_model = Self::get(row, &self.replacement_model);

        if original_model.is_empty() {
            return Err(RowError::MissingOriginalModel);
        }
        if original_model == SUB_HEADER_MARKER {
            return Err(RowError::HeaderRow);
        }

        let replace_type = classify(Self::get(row, &self.notes), Self::get(row, &self.advantages));

        CrossReferenceRecord::new(original_model, replacement_model, replace_type)
            .map(|record| {
                record
                    .with_original_brand(Self::get(row, &self.original_brand))
                    .with_replacement_brand(Self::get(row, &self.replacement_brand))
                    .with_function(Self::get(row, &self.function))
            })
            .ok_or(RowError::MissingReplacementModel)
    }
}

/// Outcome of building a catalog from rows
#[derive(Debug)]
pub struct BuildReport {
    pub catalog: PartCatalog,
    pub rows_read: usize,
    pub rows_skipped: usize,
}

/// Builds a [`PartCatalog`] from raw rows
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    columns: ColumnMap,
}

impl CatalogBuilder {
    pub fn new(columns: ColumnMap) -> Self {
        Self { columns }
    }

    /// Convert every row, skipping the ones that do not form a record
    pub fn build(&self, rows: &[RawRow], origin: CatalogOrigin) -> BuildReport {
        let mut catalog = PartCatalog::new().with_origin(origin);
        let mut rows_skipped = 0;

        for (i, row) in rows.iter().enumerate() {
            match self.columns.record_from_row(row) {
                Ok(record) => {
                    catalog.add_record(record);
                }
                Err(e) => {
                    // Row numbers are 1-based and exclude the header line
                    tracing::debug!("Skipping row {}: {}", i + 1, e);
                    rows_skipped += 1;
                }
            }
        }

        BuildReport {
            catalog,
            rows_read: rows.len(),
            rows_skipped,
        }
    }
}
