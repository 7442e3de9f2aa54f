#![cfg(feature = "excel")]
//! Spreadsheet ingestion and schema inference (`.xlsx`, `.xls`, `.xlsm`, `.xlsb`, `.ods`).

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Schema, Value};

use super::csv::parse_bool;
use super::infer::{header_slots, Inferred, SchemaBuilder};
use super::unified::ExcelSheetSelection;

/// Ingest one sheet of a workbook into an in-memory `DataSet`.
///
/// - Picks `sheet_name` if provided; otherwise uses the first sheet in the workbook
/// - The first non-empty row is the header row
/// - All schema fields must exist as headers
/// - Remaining rows are converted into typed `Value`s
pub fn ingest_excel_from_path(
    path: impl AsRef<Path>,
    sheet_name: Option<&str>,
    schema: &Schema,
) -> IngestionResult<DataSet> {
    let selection = match sheet_name {
        Some(name) => ExcelSheetSelection::Sheet(name.to_string()),
        None => ExcelSheetSelection::First,
    };
    ingest_excel_selection(path, &selection, schema)
}

/// Ingest several sheets of a workbook and concatenate their rows into one `DataSet`.
///
/// - `None` ingests **all sheets** in workbook order.
/// - `Some(&[...])` ingests the listed sheets, in the given order.
///
/// All selected sheets must share the schema's headers.
pub fn ingest_excel_workbook_from_path(
    path: impl AsRef<Path>,
    sheet_names: Option<&[&str]>,
    schema: &Schema,
) -> IngestionResult<DataSet> {
    let selection = match sheet_names {
        Some(names) => ExcelSheetSelection::Sheets(names.iter().map(|s| s.to_string()).collect()),
        None => ExcelSheetSelection::AllSheets,
    };
    ingest_excel_selection(path, &selection, schema)
}

/// Ingest the sheets chosen by `selection`, concatenating rows in selection order.
pub fn ingest_excel_selection(
    path: impl AsRef<Path>,
    selection: &ExcelSheetSelection,
    schema: &Schema,
) -> IngestionResult<DataSet> {
    let mut workbook = open_workbook_auto(path)?;

    let mut all_rows: Vec<Vec<Value>> = Vec::new();
    for sheet in select_sheets(&workbook, selection)? {
        let range = workbook.worksheet_range(&sheet)?;
        let mut sheet_rows = ingest_sheet_range(&sheet, &range, schema)?;
        all_rows.append(&mut sheet_rows);
    }

    Ok(DataSet::new(schema.clone(), all_rows))
}

/// Infer a [`Schema`] from the sheets chosen by `selection`.
///
/// Column types are merged across sheets; a column first seen in a later sheet is appended.
pub fn infer_excel_schema_from_path(
    path: impl AsRef<Path>,
    selection: &ExcelSheetSelection,
) -> IngestionResult<Schema> {
    let mut workbook = open_workbook_auto(path)?;

    let mut builder = SchemaBuilder::new();
    for sheet in select_sheets(&workbook, selection)? {
        let range = workbook.worksheet_range(&sheet)?;
        let mut rows = range.rows().skip_while(|row| row.iter().all(|c| matches!(c, Data::Empty)));

        let Some(header) = rows.next() else {
            continue;
        };
        let header_cells: Vec<String> = header.iter().map(cell_to_header_string).collect();
        let slots = header_slots(&mut builder, header_cells.iter().map(String::as_str));

        for row in rows {
            for (cell, slot) in row.iter().zip(slots.iter()) {
                if let Some(slot) = slot {
                    builder.observe(*slot, infer_cell(cell));
                }
            }
        }
    }

    Ok(builder.build())
}

fn select_sheets<RS>(workbook: &Sheets<RS>, selection: &ExcelSheetSelection) -> IngestionResult<Vec<String>>
where
    RS: std::io::Read + std::io::Seek,
{
    let sheets: Vec<String> = match selection {
        ExcelSheetSelection::First => workbook.sheet_names().iter().take(1).cloned().collect(),
        ExcelSheetSelection::Sheet(name) => vec![name.clone()],
        ExcelSheetSelection::AllSheets => workbook.sheet_names().to_vec(),
        ExcelSheetSelection::Sheets(names) => names.clone(),
    };
    if sheets.is_empty() {
        return Err(IngestionError::SchemaMismatch {
            message: "workbook has no sheets".to_string(),
        });
    }
    Ok(sheets)
}

fn infer_cell(c: &Data) -> Inferred {
    match c {
        Data::Empty => Inferred::Empty,
        Data::Int(_) => Inferred::Int,
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Inferred::Int,
        Data::Float(_) => Inferred::Float,
        Data::Bool(_) => Inferred::Bool,
        Data::String(s) => Inferred::of_str(s),
        _ => Inferred::Text,
    }
}

fn ingest_sheet_range(sheet: &str, range: &Range<Data>, schema: &Schema) -> IngestionResult<Vec<Vec<Value>>> {
    let (header_row_idx, col_idxs) =
        build_header_projection(range, schema).map_err(|e| wrap_schema_err_with_sheet(sheet, e))?;

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (idx0, row) in range.rows().enumerate().skip(header_row_idx + 1) {
        // 1-based, like Excel row numbers.
        let user_row = idx0 + 1;

        let mut out_row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (field, &col_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let cell = row.get(col_idx).unwrap_or(&Data::Empty);
            let col_label = format!("{sheet}:{name}", name = field.name);
            out_row.push(convert_cell(user_row, &col_label, field.data_type, cell)?);
        }
        rows.push(out_row);
    }

    Ok(rows)
}

fn wrap_schema_err_with_sheet(sheet: &str, err: IngestionError) -> IngestionError {
    match err {
        IngestionError::SchemaMismatch { message } => IngestionError::SchemaMismatch {
            message: format!("sheet '{sheet}': {message}"),
        },
        other => other,
    }
}

fn build_header_projection(range: &Range<Data>, schema: &Schema) -> IngestionResult<(usize, Vec<usize>)> {
    let (header_row_idx, header_cells) = range
        .rows()
        .enumerate()
        .find(|(_, row)| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|(idx0, row)| (idx0, row.iter().map(cell_to_header_string).collect::<Vec<_>>()))
        .ok_or_else(|| IngestionError::SchemaMismatch {
            message: "sheet has no non-empty rows (no header row found)".to_string(),
        })?;

    let mut col_idxs: Vec<usize> = Vec::with_capacity(schema.fields.len());
    for f in &schema.fields {
        match header_cells.iter().position(|h| h.trim() == f.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(IngestionError::SchemaMismatch {
                    message: format!("missing required column '{}'. headers={:?}", f.name, header_cells),
                });
            }
        }
    }

    Ok((header_row_idx, col_idxs))
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => (*f as i64).to_string(),
        Data::Empty => String::new(),
        _ => c.to_string(),
    }
}

fn convert_cell(row: usize, column: &str, data_type: DataType, c: &Data) -> IngestionResult<Value> {
    if matches!(c, Data::Empty) {
        return Ok(Value::Null);
    }

    let parse_error = |message: String| IngestionError::ParseError {
        row,
        column: column.to_string(),
        raw: c.to_string(),
        message,
    };

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(match c {
            Data::String(s) => s.clone(),
            _ => c.to_string(),
        })),
        DataType::Bool => match c {
            Data::Bool(b) => Ok(Value::Bool(*b)),
            Data::Int(i) => Ok(Value::Bool(*i != 0)),
            Data::Float(f) => Ok(Value::Bool(*f != 0.0)),
            Data::String(s) => parse_bool(s).map(Value::Bool).map_err(parse_error),
            _ => Err(parse_error("expected bool".to_string())),
        },
        DataType::Int64 => match c {
            Data::Int(i) => Ok(Value::Int64(*i)),
            Data::Float(f) if f.fract() == 0.0 => Ok(Value::Int64(*f as i64)),
            Data::Float(_) => Err(parse_error("expected integer (got non-integer float)".to_string())),
            Data::String(s) => s.trim().parse::<i64>().map(Value::Int64).map_err(|e| parse_error(e.to_string())),
            _ => Err(parse_error("expected integer".to_string())),
        },
        DataType::Float64 => match c {
            Data::Float(f) => Ok(Value::Float64(*f)),
            Data::Int(i) => Ok(Value::Float64(*i as f64)),
            Data::String(s) => s.trim().parse::<f64>().map(Value::Float64).map_err(|e| parse_error(e.to_string())),
            _ => Err(parse_error("expected number".to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use calamine::Data;

    use super::{cell_to_header_string, infer_cell};
    use crate::ingestion::infer::Inferred;

    #[test]
    fn whole_floats_infer_as_integers() {
        assert_eq!(infer_cell(&Data::Float(5.0)), Inferred::Int);
        assert_eq!(infer_cell(&Data::Float(5.1)), Inferred::Float);
        assert_eq!(infer_cell(&Data::String("7".to_string())), Inferred::Int);
        assert_eq!(infer_cell(&Data::Bool(true)), Inferred::Bool);
        assert_eq!(infer_cell(&Data::Empty), Inferred::Empty);
    }

    #[test]
    fn numeric_headers_drop_trailing_zero() {
        assert_eq!(cell_to_header_string(&Data::Float(2024.0)), "2024");
        assert_eq!(cell_to_header_string(&Data::String("name".to_string())), "name");
    }
}
