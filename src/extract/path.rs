//! Dotted path resolution

use serde_json::{json, Value};

/// Resolve a dotted key path against a JSON value.
///
/// Segments are walked left to right. While the current value is an object
/// holding the next key, resolution descends into it; at the first segment
/// that cannot be followed it stops and returns the value reached so far.
/// Empty segments are skipped, so `""` and `"  "` return the root.
pub fn resolve_path<'a>(root: &'a Value, path: &str) -> &'a Value {
    path.trim()
        .split('.')
        .filter(|key| !key.is_empty())
        .try_fold(root, |current, key| current.get(key).ok_or(current))
        .unwrap_or_else(|reached| reached)
}

/// Coerce an extracted value into a record sequence.
///
/// Arrays are used as-is, a single object becomes a one-record sequence and
/// any other value is wrapped as `{"value": <scalar>}`.
pub fn into_records(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(_) => vec![value],
        other => vec![json!({ "value": other })],
    }
}
