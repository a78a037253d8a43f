//! Tabular normalization module
//!
//! Turns a heterogeneous record collection into the row/column grid written
//! to the spreadsheet.
//!
//! # Pipeline
//!
//! 1. `transaction` fields are prefixed with `/`
//! 2. Records become rows over the union of their keys (first-seen order)
//! 3. An empty result is replaced by a one-cell "no data" placeholder
//! 4. Columns are renamed through the column mapping
//! 5. The table is trimmed to the selected columns that actually exist

mod normalize;
mod types;

pub use normalize::{normalize, prefix_transactions};
pub use types::{ExportTable, TableOptions, PLACEHOLDER_COLUMN, PLACEHOLDER_MESSAGE};

#[cfg(test)]
mod tests;
