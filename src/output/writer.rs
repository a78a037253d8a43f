//! XLSX file writer
//!
//! Writes an `ExportTable` to a workbook with one sheet: a header row with
//! the column names followed by one row per record.

use crate::error::{Error, Result};
use crate::table::ExportTable;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// MIME type of the files produced here
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Worksheet row limit, header included
const MAX_ROWS: usize = 1_048_576;

/// Worksheet column limit
const MAX_COLUMNS: usize = 16_384;

/// Longest string a cell can hold
const MAX_CELL_CHARS: usize = 32_767;

/// Configuration for the spreadsheet writer
#[derive(Debug, Clone)]
pub struct SpreadsheetWriterConfig {
    sheet_name: String,
    bold_header: bool,
    autofit: bool,
}

impl Default for SpreadsheetWriterConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Data".to_string(),
            bold_header: true,
            autofit: false,
        }
    }
}

impl SpreadsheetWriterConfig {
    /// Create a new config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worksheet name
    #[must_use]
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Enable or disable the bold header row
    #[must_use]
    pub fn with_bold_header(mut self, enabled: bool) -> Self {
        self.bold_header = enabled;
        self
    }

    /// Enable or disable column autofit
    #[must_use]
    pub fn with_autofit(mut self, enabled: bool) -> Self {
        self.autofit = enabled;
        self
    }

    /// Get the worksheet name
    #[must_use]
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }
}

/// Write a table to an XLSX file, returning the number of data rows written
pub fn write_table_to_xlsx(
    path: impl AsRef<Path>,
    table: &ExportTable,
    config: Option<&SpreadsheetWriterConfig>,
) -> Result<usize> {
    let default_config = SpreadsheetWriterConfig::default();
    let config = config.unwrap_or(&default_config);

    if table.num_rows() + 1 > MAX_ROWS {
        return Err(Error::output(format!(
            "{} rows exceed the worksheet limit of {}",
            table.num_rows(),
            MAX_ROWS - 1
        )));
    }
    if table.num_columns() > MAX_COLUMNS {
        return Err(Error::output(format!(
            "{} columns exceed the worksheet limit of {MAX_COLUMNS}",
            table.num_columns()
        )));
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(config.sheet_name.as_str())?;

    let header_format = if config.bold_header {
        Format::new().set_bold()
    } else {
        Format::new()
    };

    for (col, name) in table.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, fit_cell(name), &header_format)?;
    }

    for (i, row) in table.rows().iter().enumerate() {
        let row_num = (i + 1) as u32;
        for (col, value) in row.iter().enumerate() {
            write_cell(worksheet, row_num, col as u16, value)?;
        }
    }

    if config.autofit {
        worksheet.autofit();
    }

    workbook.save(path.as_ref())?;
    debug!(
        "Wrote {} rows to {}",
        table.num_rows(),
        path.as_ref().display()
    );

    Ok(table.num_rows())
}

/// Write one JSON value as a typed cell; nulls stay blank
fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, value: &Value) -> Result<()> {
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        Value::Number(n) => match n.as_f64() {
            Some(f) => {
                worksheet.write_number(row, col, f)?;
            }
            None => {
                worksheet.write_string(row, col, fit_cell(&n.to_string()))?;
            }
        },
        Value::String(s) => {
            worksheet.write_string(row, col, fit_cell(s))?;
        }
        nested => {
            worksheet.write_string(row, col, fit_cell(&nested.to_string()))?;
        }
    }
    Ok(())
}

/// Truncate text to the cell length limit
fn fit_cell(text: &str) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
