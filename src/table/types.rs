//! Table types

use crate::types::ColumnMapping;
use serde_json::Value;
use std::collections::HashMap;

/// Column name of the "no data" placeholder table
pub const PLACEHOLDER_COLUMN: &str = "notice";

/// Cell text of the "no data" placeholder table
pub const PLACEHOLDER_MESSAGE: &str =
    "No data found. Check the API response and the data path configuration.";

/// Column holding non-object records
const SCALAR_COLUMN: &str = "value";

/// Reshaping applied after tabularization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// Field name to output column name
    pub column_mapping: ColumnMapping,
    /// Columns to keep, in output order (empty keeps all)
    pub selected_columns: Vec<String>,
}

impl TableOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rename
    #[must_use]
    pub fn rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.column_mapping.insert(from.into(), to.into());
        self
    }

    /// Set the selected columns
    #[must_use]
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_columns = columns.into_iter().map(Into::into).collect();
        self
    }
}

/// Row-by-column grid; `Value::Null` marks an empty cell
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl ExportTable {
    /// Create a table from parts; short rows are padded with empty cells
    pub fn new(columns: Vec<String>, mut rows: Vec<Vec<Value>>) -> Self {
        for row in &mut rows {
            row.resize(columns.len(), Value::Null);
        }
        Self { columns, rows }
    }

    /// Build a table whose columns are the union of the records' keys.
    ///
    /// Columns appear in the order they are first seen and rows keep record
    /// order. Keys missing from a record leave an empty cell. Records that
    /// are not objects land in a `value` column.
    pub fn from_records(records: &[Value]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        let mut column_of = |name: &str| -> usize {
            if let Some(&i) = index.get(name) {
                return i;
            }
            columns.push(name.to_string());
            index.insert(name.to_string(), columns.len() - 1);
            columns.len() - 1
        };

        let mut cells: Vec<Vec<(usize, Value)>> = Vec::with_capacity(records.len());
        for record in records {
            let row: Vec<(usize, Value)> = match record {
                Value::Object(map) => map
                    .iter()
                    .map(|(key, value)| (column_of(key), value.clone()))
                    .collect(),
                other => vec![(column_of(SCALAR_COLUMN), other.clone())],
            };
            cells.push(row);
        }

        let width = columns.len();
        let rows = cells
            .into_iter()
            .map(|row| {
                let mut out = vec![Value::Null; width];
                for (i, value) in row {
                    out[i] = value;
                }
                out
            })
            .collect();

        Self { columns, rows }
    }

    /// Single-cell table telling the user that nothing was found
    pub fn placeholder() -> Self {
        Self {
            columns: vec![PLACEHOLDER_COLUMN.to_string()],
            rows: vec![vec![Value::String(PLACEHOLDER_MESSAGE.to_string())]],
        }
    }

    /// Check if this is the "no data" placeholder
    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }

    /// Column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows of cells, aligned with `columns`
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of data rows
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has no columns or no rows
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.rows.is_empty()
    }

    /// Cell at `row` under the first column named `column`
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(col)
    }

    /// Rename columns through `mapping`; unmapped columns keep their name
    pub fn rename_columns(&mut self, mapping: &ColumnMapping) {
        for column in &mut self.columns {
            if let Some(renamed) = mapping.get(column.as_str()) {
                column.clone_from(renamed);
            }
        }
    }

    /// Keep only the requested columns that exist, in requested order.
    ///
    /// Names are trimmed and blanks ignored. A name shared by several
    /// columns (two fields mapped to one name) keeps all of them. Requested
    /// columns that are
    /// absent are dropped silently; when none of them exist the table is
    /// left unchanged. Returns whether the table was trimmed.
    pub fn select_columns(&mut self, requested: &[String]) -> bool {
        let mut keep: Vec<usize> = Vec::new();
        for name in requested.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            for (i, _) in self.columns.iter().enumerate().filter(|(_, c)| *c == name) {
                if !keep.contains(&i) {
                    keep.push(i);
                }
            }
        }

        if keep.is_empty() {
            return false;
        }

        self.columns = keep.iter().map(|&i| self.columns[i].clone()).collect();
        for row in &mut self.rows {
            let old = std::mem::take(row);
            *row = keep.iter().map(|&i| old[i].clone()).collect();
        }
        true
    }
}
