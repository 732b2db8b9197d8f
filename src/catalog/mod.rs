//! Cross-reference catalog storage and ingestion.
//!
//! The catalog holds every known (original part, replacement part) pair with
//! its replacement type. It is normally built from a cross-reference table
//! (CSV/TSV exported from the FAE workbook); an embedded seed catalog is
//! compiled into the binary and used whenever the table is unavailable.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chip_xref::catalog::builder::ColumnMap;
//! use chip_xref::catalog::source::load_or_seed;
//! use chip_xref::parsing::tabular::TabularFileSource;
//!
//! let table = TabularFileSource::new("database/cross_reference.csv");
//! let catalog = load_or_seed(Some(&table), &ColumnMap::default());
//!
//! let stats = catalog.stats();
//! println!("{} records, {} P2P", stats.total, stats.pin_to_pin);
//! ```
//!
//! ## Replacement Types
//!
//! Tables do not store the replacement type directly. It is derived from the
//! free-text notes and advantages columns by [`classify::classify`].

pub mod builder;
pub mod classify;
pub mod source;
pub mod store;
