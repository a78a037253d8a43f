//! Output module
//!
//! Handles spreadsheet materialization of export tables.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Writing an `ExportTable` to a single-sheet XLSX workbook
//! - Generating timestamped export file names
//! - Reserving a unique path in the output directory

mod naming;
mod writer;

pub use naming::{export_file_name, reserve_export_path};
pub use writer::{write_table_to_xlsx, SpreadsheetWriterConfig, XLSX_CONTENT_TYPE};

#[cfg(test)]
mod tests;
