#![allow(dead_code)]

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use parquet::column::writer::ColumnWriter;
use parquet::data_type::ByteArray;
use parquet::file::properties::WriterProperties;
use parquet::file::writer::SerializedFileWriter;
use parquet::schema::parser::parse_message_type;

use rust_data_summary::types::{DataType, Field, Schema};

pub fn people_schema() -> Schema {
    Schema::new(vec![
        Field::new("id", DataType::Int64),
        Field::new("name", DataType::Utf8),
        Field::new("score", DataType::Float64),
        Field::new("active", DataType::Bool),
    ])
}

pub fn people_schema_json_nested() -> Schema {
    Schema::new(vec![
        Field::new("id", DataType::Int64),
        Field::new("user.name", DataType::Utf8),
        Field::new("score", DataType::Float64),
        Field::new("active", DataType::Bool),
    ])
}

/// Two people rows. `id_as_binary` stores `id` as a UTF8 byte array; `include_active` controls
/// whether the trailing BOOLEAN column exists.
pub fn write_people_parquet(path: &Path, include_active: bool, id_as_binary: bool) {
    let id_decl = if id_as_binary {
        "REQUIRED BINARY id (UTF8);"
    } else {
        "REQUIRED INT64 id;"
    };
    let active_decl = if include_active { "REQUIRED BOOLEAN active;" } else { "" };
    let message = format!(
        "message schema {{ {id_decl} REQUIRED BINARY name (UTF8); REQUIRED DOUBLE score; {active_decl} }}"
    );

    let schema = Arc::new(parse_message_type(&message).unwrap());
    let props = Arc::new(WriterProperties::builder().build());
    let file = File::create(path).unwrap();
    let mut writer = SerializedFileWriter::new(file, schema, props).unwrap();

    let mut rg = writer.next_row_group().unwrap();
    let mut col_idx: usize = 0;
    while let Some(mut col) = rg.next_column().unwrap() {
        match col.untyped() {
            ColumnWriter::Int64ColumnWriter(w) => {
                w.write_batch(&[1_i64, 2_i64], None, None).unwrap();
            }
            ColumnWriter::ByteArrayColumnWriter(w) => {
                let values = if id_as_binary && col_idx == 0 {
                    [ByteArray::from("1"), ByteArray::from("2")]
                } else {
                    [ByteArray::from("Ada"), ByteArray::from("Grace")]
                };
                w.write_batch(&values, None, None).unwrap();
            }
            ColumnWriter::DoubleColumnWriter(w) => {
                w.write_batch(&[98.5_f64, 87.25_f64], None, None).unwrap();
            }
            ColumnWriter::BoolColumnWriter(w) => {
                w.write_batch(&[true, false], None, None).unwrap();
            }
            _ => panic!("unexpected column writer in test"),
        }
        col.close().unwrap();
        col_idx += 1;
    }
    rg.close().unwrap();
    writer.close().unwrap();
}

/// A readings column with a missing value: `reading` is OPTIONAL DOUBLE holding 2.0, null, 4.0.
pub fn write_readings_parquet(path: &Path) {
    let message = "message schema { REQUIRED BINARY site (UTF8); OPTIONAL DOUBLE reading; }";

    let schema = Arc::new(parse_message_type(message).unwrap());
    let props = Arc::new(WriterProperties::builder().build());
    let file = File::create(path).unwrap();
    let mut writer = SerializedFileWriter::new(file, schema, props).unwrap();

    let mut rg = writer.next_row_group().unwrap();
    while let Some(mut col) = rg.next_column().unwrap() {
        match col.untyped() {
            ColumnWriter::ByteArrayColumnWriter(w) => {
                let sites = [ByteArray::from("north"), ByteArray::from("south"), ByteArray::from("north")];
                w.write_batch(&sites, None, None).unwrap();
            }
            ColumnWriter::DoubleColumnWriter(w) => {
                // Definition level 0 marks the null in row 2.
                w.write_batch(&[2.0_f64, 4.0_f64], Some(&[1_i16, 0, 1][..]), None).unwrap();
            }
            _ => panic!("unexpected column writer in test"),
        }
        col.close().unwrap();
    }
    rg.close().unwrap();
    writer.close().unwrap();
}

/// `Sheet1` holds Ada and Grace, `Second` holds Linus. `id_as_string` writes ids as text cells.
#[cfg(feature = "excel")]
pub fn write_people_xlsx(path: &Path, include_active: bool, id_as_string: bool, second_sheet: bool) {
    use rust_xlsxwriter::Workbook;

    let mut wb = Workbook::new();
    let people: &[(i32, &str, f64, bool)] = &[(1, "Ada", 98.5, true), (2, "Grace", 87.25, false)];

    let ws = wb.add_worksheet();
    ws.set_name("Sheet1").unwrap();
    let headers: &[&str] = if include_active {
        &["id", "name", "score", "active"]
    } else {
        &["id", "name", "score"]
    };
    for (c, h) in headers.iter().enumerate() {
        ws.write_string(0, c as u16, *h).unwrap();
    }
    for (i, (id, name, score, active)) in people.iter().enumerate() {
        let r = (i + 1) as u32;
        if id_as_string {
            ws.write_string(r, 0, id.to_string()).unwrap();
        } else {
            ws.write_number(r, 0, *id).unwrap();
        }
        ws.write_string(r, 1, *name).unwrap();
        ws.write_number(r, 2, *score).unwrap();
        if include_active {
            ws.write_boolean(r, 3, *active).unwrap();
        }
    }

    if second_sheet {
        let ws2 = wb.add_worksheet();
        ws2.set_name("Second").unwrap();
        for (c, h) in ["id", "name", "score", "active"].iter().enumerate() {
            ws2.write_string(0, c as u16, *h).unwrap();
        }
        ws2.write_number(1, 0, 3).unwrap();
        ws2.write_string(1, 1, "Linus").unwrap();
        ws2.write_number(1, 2, 77.0).unwrap();
        ws2.write_boolean(1, 3, true).unwrap();
    }

    wb.save(path).unwrap();
}
