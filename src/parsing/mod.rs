//! Readers for tabular cross-reference sources.
//!
//! The cross-reference table is maintained as a spreadsheet and exported to
//! CSV or TSV. [`tabular::TabularFileSource`] reads such an export into raw
//! rows keyed by header name, which [`crate::catalog::builder::CatalogBuilder`]
//! then turns into records.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chip_xref::catalog::source::RowSource;
//! use chip_xref::parsing::tabular::TabularFileSource;
//!
//! let source = TabularFileSource::new("database/cross_reference.csv")
//!     .with_backup("database/cross_reference.backup.csv");
//! let rows = source.load_rows().unwrap();
//! println!("{} rows", rows.len());
//! ```

pub mod tabular;
