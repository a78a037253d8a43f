//! Tests for table module

use super::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

fn names(table: &ExportTable) -> Vec<&str> {
    table.columns().iter().map(String::as_str).collect()
}

// ============================================================================
// Transaction Prefix Tests
// ============================================================================

#[test_case(json!("checkout"), json!("/checkout") ; "plain path gets prefix")]
#[test_case(json!("/checkout"), json!("/checkout") ; "already prefixed")]
#[test_case(json!(""), json!("") ; "empty string untouched")]
#[test_case(Value::Null, Value::Null ; "null untouched")]
#[test_case(json!(0), json!(0) ; "zero untouched")]
#[test_case(json!(false), json!(false) ; "false untouched")]
#[test_case(json!(42), json!("/42") ; "number becomes prefixed text")]
#[test_case(json!(true), json!("/true") ; "true becomes json text")]
fn test_prefix_transaction(input: Value, expected: Value) {
    let mut records = vec![json!({ "transaction": input })];
    prefix_transactions(&mut records);
    assert_eq!(records[0]["transaction"], expected);
}

#[test]
fn test_prefix_transactions_counts_and_skips_non_objects() {
    let mut records = vec![
        json!({"transaction": "a"}),
        json!({"transaction": "/b"}),
        json!({"other": "c"}),
        json!("transaction"),
        json!({"transaction": "d"}),
    ];

    assert_eq!(prefix_transactions(&mut records), 2);
    assert_eq!(records[0]["transaction"], "/a");
    assert_eq!(records[2], json!({"other": "c"}));
    assert_eq!(records[3], json!("transaction"));
    assert_eq!(records[4]["transaction"], "/d");
}

// ============================================================================
// Tabularization Tests
// ============================================================================

#[test]
fn test_from_records_union_of_keys() {
    let table = ExportTable::from_records(&[json!({"a": 1}), json!({"b": 2})]);

    assert_eq!(names(&table), vec!["a", "b"]);
    assert_eq!(
        table.rows(),
        &[vec![json!(1), Value::Null], vec![Value::Null, json!(2)]]
    );
}

#[test]
fn test_from_records_first_seen_order() {
    let table = ExportTable::from_records(&[
        json!({"zeta": 1, "alpha": 2}),
        json!({"mid": 3, "zeta": 4}),
    ]);

    assert_eq!(names(&table), vec!["zeta", "alpha", "mid"]);
    assert_eq!(table.cell(1, "zeta"), Some(&json!(4)));
    assert_eq!(table.cell(1, "alpha"), Some(&Value::Null));
}

#[test]
fn test_from_records_scalars_use_value_column() {
    let table = ExportTable::from_records(&[json!({"id": 1}), json!("loose")]);

    assert_eq!(names(&table), vec!["id", "value"]);
    assert_eq!(table.cell(1, "value"), Some(&json!("loose")));
}

#[test]
fn test_table_new_pads_rows() {
    let table = ExportTable::new(
        vec!["a".into(), "b".into()],
        vec![vec![json!(1)]],
    );
    assert_eq!(table.rows(), &[vec![json!(1), Value::Null]]);
}

// ============================================================================
// Rename / Select Tests
// ============================================================================

#[test]
fn test_rename_columns() {
    let mut table = ExportTable::from_records(&[json!({"id": 1, "title": "x"})]);
    let options = TableOptions::new().rename("title", "Title").rename("missing", "M");
    table.rename_columns(&options.column_mapping);

    assert_eq!(names(&table), vec!["id", "Title"]);
}

#[test]
fn test_select_drops_absent_columns() {
    let mut table = ExportTable::from_records(&[json!({"a": 1}), json!({"b": 2})]);
    let trimmed = table.select_columns(&["a".to_string(), "c".to_string()]);

    assert!(trimmed);
    assert_eq!(names(&table), vec!["a"]);
    assert_eq!(table.rows(), &[vec![json!(1)], vec![Value::Null]]);
}

#[test]
fn test_select_uses_requested_order_and_trims() {
    let mut table = ExportTable::from_records(&[json!({"a": 1, "b": 2, "c": 3})]);
    table.select_columns(&[" c ".to_string(), "".to_string(), "a".to_string(), "c".to_string()]);

    assert_eq!(names(&table), vec!["c", "a"]);
    assert_eq!(table.rows(), &[vec![json!(3), json!(1)]]);
}

#[test]
fn test_select_keeps_every_column_sharing_a_name() {
    let mut table = ExportTable::from_records(&[json!({"a": 1, "b": 2, "c": 3})]);
    table.rename_columns(&TableOptions::new().rename("a", "x").rename("b", "x").column_mapping);

    assert!(table.select_columns(&["x".to_string()]));
    assert_eq!(names(&table), vec!["x", "x"]);
    assert_eq!(table.rows(), &[vec![json!(1), json!(2)]]);
}

#[test]
fn test_select_all_absent_leaves_table_unchanged() {
    let mut table = ExportTable::from_records(&[json!({"a": 1})]);
    let before = table.clone();

    assert!(!table.select_columns(&["x".to_string(), "y".to_string()]));
    assert_eq!(table, before);
}

// ============================================================================
// normalize Tests
// ============================================================================

#[test]
fn test_normalize_empty_gives_placeholder() {
    let table = normalize(vec![], &TableOptions::new().select(["a"]));

    assert!(table.is_placeholder());
    assert_eq!(table.num_rows(), 1);
    assert_eq!(names(&table), vec![PLACEHOLDER_COLUMN]);
    assert_eq!(table.cell(0, PLACEHOLDER_COLUMN), Some(&json!(PLACEHOLDER_MESSAGE)));
}

#[test]
fn test_normalize_keyless_records_give_placeholder() {
    let table = normalize(vec![json!({}), json!({})], &TableOptions::new());
    assert!(table.is_placeholder());
}

#[test]
fn test_normalize_full_pipeline() {
    let records = vec![
        json!({"transaction": "checkout", "count": 3, "p95": 120.5}),
        json!({"transaction": "/login", "count": 9}),
    ];
    let options = TableOptions::new()
        .rename("transaction", "Endpoint")
        .rename("count", "Events")
        .select(["Events", "Endpoint", "Missing"]);

    let table = normalize(records, &options);

    assert_eq!(names(&table), vec!["Events", "Endpoint"]);
    assert_eq!(
        table.rows(),
        &[
            vec![json!(3), json!("/checkout")],
            vec![json!(9), json!("/login")],
        ]
    );
}

#[test]
fn test_normalize_selection_sees_renamed_names() {
    let records = vec![json!({"a": 1, "b": 2})];
    let options = TableOptions::new().rename("a", "A").select(["a"]);

    // "a" no longer exists after renaming, so nothing is trimmed
    let table = normalize(records, &options);
    assert_eq!(names(&table), vec!["A", "b"]);
}
