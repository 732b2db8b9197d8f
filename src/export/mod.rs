//! Export of lookup results to delimited text.
//!
//! Results are written one row per record with a running index, ready to be
//! opened in a spreadsheet. Producing native workbook files is left to
//! downstream tools.

pub mod table;
