//! FILENAME: tests/test_export_commands.rs
//! Integration tests for the spreadsheet and report export commands.

mod common;

use app_lib::commands::{export_report, export_spreadsheet, set_criteria, set_sort};
use app_lib::Settings;
use calamine::{open_workbook, Data, Reader, Xlsx};
use common::{ids, TestHarness};
use engine::FilterCriteria;
use std::path::{Path, PathBuf};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn today_name(prefix: &str, ext: &str) -> String {
    format!("{}_{}.{}", prefix, chrono::Local::now().format("%Y-%m-%d"), ext)
}

/// Read the ID column of an exported workbook, header excluded.
fn sheet_ids(path: &Path) -> Vec<String> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range("Sheet1").unwrap();
    range
        .rows()
        .skip(1)
        .map(|row| match &row[0] {
            Data::Float(f) => format!("{}", f),
            other => other.to_string(),
        })
        .collect()
}

fn sorted_filtered_harness() -> TestHarness {
    let harness = TestHarness::with_catalog();
    set_criteria(&harness.state, FilterCriteria::new().with_min_rating("4")).unwrap();
    set_sort(&harness.state, "price").unwrap();
    set_sort(&harness.state, "price").unwrap();
    harness
}

// ============================================================================
// SPREADSHEET
// ============================================================================

#[test]
fn test_spreadsheet_matches_view_order() {
    let harness = sorted_filtered_harness();
    let dir = tempfile::tempdir().unwrap();

    let result = export_spreadsheet(&harness.state, Some(dir.path())).unwrap();
    assert_eq!(result.file_name, today_name("orders", "xlsx"));
    assert_eq!(result.rows, 5);

    let view_ids = harness.view_ids();
    assert_eq!(view_ids, vec!["5", "12", "3", "2", "18"]);
    assert_eq!(sheet_ids(&PathBuf::from(&result.path)), view_ids);
}

#[test]
fn test_spreadsheet_cells() {
    let harness = TestHarness::with_catalog();
    set_criteria(&harness.state, FilterCriteria::new().with_search("cotton jacket")).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let result = export_spreadsheet(&harness.state, Some(dir.path())).unwrap();
    let mut workbook: Xlsx<_> = open_workbook(&result.path).unwrap();
    let range = workbook.worksheet_range("Sheet1").unwrap();

    assert_eq!(range.get_size(), (2, 7));
    assert_eq!(range.get_value((1, 0)), Some(&Data::Float(3.0)));
    assert_eq!(range.get_value((1, 1)), Some(&Data::String("Mens Cotton Jacket".to_string())));
    assert_eq!(range.get_value((1, 3)), Some(&Data::String("$55.99".to_string())));
    assert_eq!(range.get_value((1, 4)), Some(&Data::String("4.7 ⭐".to_string())));
    assert_eq!(range.get_value((1, 5)), Some(&Data::Float(500.0)));
}

#[test]
fn test_export_does_not_change_the_view() {
    let harness = sorted_filtered_harness();
    let before = harness.view();
    let dir = tempfile::tempdir().unwrap();

    export_spreadsheet(&harness.state, Some(dir.path())).unwrap();
    export_report(&harness.state, Some(dir.path())).unwrap();

    let after = harness.view();
    assert_eq!(ids(&before), ids(&after));
    assert_eq!(before.sort, after.sort);
}

#[test]
fn test_empty_view_exports_header_only() {
    let harness = TestHarness::with_catalog();
    set_criteria(&harness.state, FilterCriteria::new().with_search("no such order")).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let result = export_spreadsheet(&harness.state, Some(dir.path())).unwrap();
    assert_eq!(result.rows, 0);
    assert!(sheet_ids(Path::new(&result.path)).is_empty());
}

// ============================================================================
// REPORT
// ============================================================================

#[test]
fn test_report_is_written() {
    let harness = sorted_filtered_harness();
    let dir = tempfile::tempdir().unwrap();

    let result = export_report(&harness.state, Some(dir.path())).unwrap();
    assert_eq!(result.file_name, today_name("orders", "pdf"));
    assert_eq!(result.rows, 5);

    let bytes = std::fs::read(&result.path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(bytes.len(), result.bytes);
}

#[test]
fn test_report_paginates_large_views() {
    let harness = TestHarness::new();
    let records = (1..=120)
        .map(|i| engine::Record::new(i as i64, &format!("Item {i}"), i as f64, "bulk"))
        .collect();
    harness.set_records(records);
    let dir = tempfile::tempdir().unwrap();

    let result = export_report(&harness.state, Some(dir.path())).unwrap();
    assert_eq!(result.rows, 120);
}

// ============================================================================
// SETTINGS
// ============================================================================

#[test]
fn test_configured_prefix_and_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = Settings::default();
    settings.export.file_prefix = "weekly".to_string();
    settings.export.output_dir = Some(dir.path().join("exports"));

    let harness = TestHarness::with_settings(settings);
    harness.set_records(common::CatalogFixture::records());

    let result = export_spreadsheet(&harness.state, None).unwrap();
    let expected = dir.path().join("exports").join(today_name("weekly", "xlsx"));
    assert_eq!(PathBuf::from(&result.path), expected);
    assert!(expected.exists());
}

#[test]
fn test_invalid_prefix_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = Settings::default();
    settings.export.file_prefix = "../escape".to_string();

    let harness = TestHarness::with_settings(settings);
    harness.set_records(common::CatalogFixture::records());

    let err = export_report(&harness.state, Some(dir.path())).unwrap_err();
    assert!(err.contains("Invalid export file name"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
