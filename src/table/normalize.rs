//! Record normalization pipeline

use super::types::{ExportTable, TableOptions};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Field rewritten by [`prefix_transactions`]
const TRANSACTION_FIELD: &str = "transaction";

/// Prefix every non-empty `transaction` field with `/`.
///
/// Only object records are touched. Values that are empty (`""`, `0`,
/// `false`, `null`, `[]`, `{}`) or already start with `/` are left as they
/// are; other values become the string `"/" + text`, where non-string
/// values use their JSON text (`true` becomes `"/true"`, `42` becomes
/// `"/42"`). Returns the number of records rewritten.
pub fn prefix_transactions(records: &mut [Value]) -> usize {
    let mut rewritten = 0;

    for record in records.iter_mut() {
        let Some(field) = record
            .as_object_mut()
            .and_then(|map| map.get_mut(TRANSACTION_FIELD))
        else {
            continue;
        };

        if !is_truthy(field) {
            continue;
        }

        let text = match &*field {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        if !text.starts_with('/') {
            *field = Value::String(format!("/{text}"));
            rewritten += 1;
        }
    }

    rewritten
}

/// Run the full normalization pipeline over a record collection
pub fn normalize(mut records: Vec<Value>, options: &TableOptions) -> ExportTable {
    if records.is_empty() {
        info!("No records to tabularize, writing placeholder");
        return ExportTable::placeholder();
    }

    let rewritten = prefix_transactions(&mut records);
    if rewritten > 0 {
        debug!("Prefixed {rewritten} transaction values with '/'");
    }

    let mut table = ExportTable::from_records(&records);
    if table.is_empty() {
        info!("Records produced no columns, writing placeholder");
        return ExportTable::placeholder();
    }
    debug!("Tabularized columns: {:?}", table.columns());

    if !options.column_mapping.is_empty() {
        table.rename_columns(&options.column_mapping);
        debug!("Columns after mapping: {:?}", table.columns());
    }

    let requested = options
        .selected_columns
        .iter()
        .any(|c| !c.trim().is_empty());
    if requested {
        if table.select_columns(&options.selected_columns) {
            debug!("Columns after selection: {:?}", table.columns());
        } else {
            warn!(
                "None of the selected columns {:?} exist, keeping all columns",
                options.selected_columns
            );
        }
    }

    info!(
        "Table ready: {} rows x {} columns",
        table.num_rows(),
        table.num_columns()
    );
    table
}

/// Truthiness of a JSON value
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
