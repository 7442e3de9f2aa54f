#![cfg(feature = "excel")]

mod common;

use rust_data_summary::ingestion::excel::{
    infer_excel_schema_from_path, ingest_excel_from_path, ingest_excel_workbook_from_path,
};
use rust_data_summary::ingestion::ExcelSheetSelection;
use rust_data_summary::types::Value;

use common::{people_schema, write_people_xlsx};

#[test]
fn ingest_excel_happy_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.xlsx");
    write_people_xlsx(&path, true, false, false);

    let ds = ingest_excel_from_path(&path, None, &people_schema()).unwrap();
    assert_eq!(ds.row_count(), 2);
    assert_eq!(ds.rows[0][0], Value::Int64(1));
    assert_eq!(ds.rows[0][1], Value::Utf8("Ada".to_string()));
    assert_eq!(ds.rows[1][3], Value::Bool(false));
}

#[test]
fn ingest_excel_errors_on_missing_required_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.xlsx");
    write_people_xlsx(&path, false, false, false);

    let err = ingest_excel_from_path(&path, None, &people_schema()).unwrap_err();
    assert!(err.to_string().contains("missing required column 'active'"));
}

#[test]
fn ingest_excel_allows_string_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("string-nums.xlsx");
    write_people_xlsx(&path, true, true, false);

    let ds = ingest_excel_from_path(&path, None, &people_schema()).unwrap();
    assert_eq!(ds.rows[0][0], Value::Int64(1));
}

#[test]
fn default_selection_reads_only_the_first_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("multi.xlsx");
    write_people_xlsx(&path, true, false, true);

    let ds = ingest_excel_from_path(&path, None, &people_schema()).unwrap();
    assert_eq!(ds.row_count(), 2);
}

#[test]
fn ingest_excel_multi_tab_all_sheets_concatenates_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("multi.xlsx");
    write_people_xlsx(&path, true, false, true);

    let ds = ingest_excel_workbook_from_path(&path, None, &people_schema()).unwrap();
    assert_eq!(ds.row_count(), 3);
    assert_eq!(ds.rows[2][0], Value::Int64(3));
    assert_eq!(ds.rows[2][1], Value::Utf8("Linus".to_string()));
}

#[test]
fn ingest_excel_multi_tab_selected_sheet_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("multi-selected.xlsx");
    write_people_xlsx(&path, true, false, true);

    let sheets = ["Second"];
    let ds = ingest_excel_workbook_from_path(&path, Some(&sheets), &people_schema()).unwrap();
    assert_eq!(ds.row_count(), 1);
    assert_eq!(ds.rows[0][0], Value::Int64(3));
}

#[test]
fn infer_excel_schema_reads_cell_types() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.xlsx");
    write_people_xlsx(&path, true, false, false);

    let schema = infer_excel_schema_from_path(&path, &ExcelSheetSelection::First).unwrap();
    assert_eq!(schema, people_schema());
}
