//! Tests for output module

use super::*;
use crate::table::{normalize, ExportTable, TableOptions};
use crate::types::ExportMode;
use chrono::{Local, TimeZone};
use serde_json::json;
use std::fs;
use tempfile::tempdir;

fn sample_time() -> chrono::DateTime<Local> {
    Local.with_ymd_and_hms(2026, 3, 7, 9, 5, 2).unwrap()
}

fn is_zip(path: &std::path::Path) -> bool {
    let bytes = fs::read(path).unwrap();
    bytes.len() > 4 && &bytes[..2] == b"PK"
}

// ============================================================================
// File Naming Tests
// ============================================================================

#[test]
fn test_export_file_name() {
    let at = sample_time();
    assert_eq!(
        export_file_name(ExportMode::Current, &at),
        "export_current_20260307_090502.xlsx"
    );
    assert_eq!(
        export_file_name(ExportMode::All, &at),
        "export_all_20260307_090502.xlsx"
    );
}

#[test]
fn test_reserve_export_path_creates_directory() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("reports").join("daily");

    let path = reserve_export_path(&nested, ExportMode::All, &sample_time()).unwrap();

    assert!(nested.is_dir());
    assert_eq!(path, nested.join("export_all_20260307_090502.xlsx"));
    assert!(path.exists());
}

#[test]
fn test_reserve_export_path_adds_suffix_on_collision() {
    let dir = tempdir().unwrap();
    let at = sample_time();

    let first = reserve_export_path(dir.path(), ExportMode::Current, &at).unwrap();
    let second = reserve_export_path(dir.path(), ExportMode::Current, &at).unwrap();
    let third = reserve_export_path(dir.path(), ExportMode::Current, &at).unwrap();

    assert_ne!(first, second);
    assert_eq!(
        second.file_name().unwrap(),
        "export_current_20260307_090502_1.xlsx"
    );
    assert_eq!(
        third.file_name().unwrap(),
        "export_current_20260307_090502_2.xlsx"
    );
}

// ============================================================================
// Writer Config Tests
// ============================================================================

#[test]
fn test_writer_config_default() {
    let config = SpreadsheetWriterConfig::default();
    assert_eq!(config.sheet_name(), "Data");
}

#[test]
fn test_writer_config_builder() {
    let config = SpreadsheetWriterConfig::new()
        .with_sheet_name("Events")
        .with_bold_header(false)
        .with_autofit(true);
    assert_eq!(config.sheet_name(), "Events");
}

// ============================================================================
// XLSX Writer Tests
// ============================================================================

#[test]
fn test_write_table_to_xlsx() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.xlsx");

    let table = ExportTable::from_records(&[
        json!({"name": "Alice", "age": 30, "active": true, "tags": ["a", "b"]}),
        json!({"name": "Bob", "score": 9.5, "meta": {"k": "v"}, "note": null}),
    ]);

    let rows = write_table_to_xlsx(&path, &table, None).unwrap();

    assert_eq!(rows, 2);
    assert!(is_zip(&path));
}

#[test]
fn test_write_placeholder_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");

    let table = normalize(vec![], &TableOptions::new());
    let rows = write_table_to_xlsx(&path, &table, None).unwrap();

    assert_eq!(rows, 1);
    assert!(is_zip(&path));
}

#[test]
fn test_write_with_custom_sheet_and_autofit() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("custom.xlsx");

    let table = ExportTable::from_records(&[json!({"id": 1})]);
    let config = SpreadsheetWriterConfig::new()
        .with_sheet_name("Events")
        .with_autofit(true);

    write_table_to_xlsx(&path, &table, Some(&config)).unwrap();
    assert!(is_zip(&path));
}

#[test]
fn test_write_overwrites_reserved_path() {
    let dir = tempdir().unwrap();
    let path = reserve_export_path(dir.path(), ExportMode::Current, &sample_time()).unwrap();
    assert_eq!(fs::metadata(&path).unwrap().len(), 0);

    let table = ExportTable::from_records(&[json!({"id": 1})]);
    write_table_to_xlsx(&path, &table, None).unwrap();

    assert!(is_zip(&path));
}

#[test]
fn test_write_long_text_is_truncated() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("long.xlsx");

    let long = "x".repeat(40_000);
    let table = ExportTable::from_records(&[json!({ "blob": long })]);

    assert_eq!(write_table_to_xlsx(&path, &table, None).unwrap(), 1);
}

#[test]
fn test_write_rejects_too_many_columns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wide.xlsx");

    let columns: Vec<String> = (0..16_385).map(|i| format!("c{i}")).collect();
    let table = ExportTable::new(columns, vec![]);

    let err = write_table_to_xlsx(&path, &table, None).unwrap_err();
    assert!(matches!(err, crate::error::Error::Output { .. }));
    assert!(!path.exists());
}

#[test]
fn test_write_invalid_sheet_name_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.xlsx");

    let table = ExportTable::from_records(&[json!({"id": 1})]);
    let config = SpreadsheetWriterConfig::new().with_sheet_name("bad[name]");

    let err = write_table_to_xlsx(&path, &table, Some(&config)).unwrap_err();
    assert!(matches!(err, crate::error::Error::Spreadsheet(_)));
}
