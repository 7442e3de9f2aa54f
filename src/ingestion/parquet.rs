//! Parquet ingestion and schema inference.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use parquet::basic::Type as PhysicalType;
use parquet::file::reader::{ChunkReader, FileReader};
use parquet::file::serialized_reader::SerializedFileReader;
use parquet::record::Field;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Schema, Value};

/// Ingest a Parquet file into an in-memory `DataSet`.
///
/// Validates that all schema fields exist as Parquet leaf columns (by column path string), then
/// reads rows through the record API.
pub fn ingest_parquet_from_path(path: impl AsRef<Path>, schema: &Schema) -> IngestionResult<DataSet> {
    let reader = SerializedFileReader::try_from(path.as_ref())?;

    let available_columns = parquet_leaf_column_paths(&reader);
    for field in &schema.fields {
        if !available_columns.contains(field.name.as_str()) {
            return Err(IngestionError::SchemaMismatch {
                message: format!("missing required column '{}'", field.name),
            });
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (idx0, row_res) in reader.into_iter().enumerate() {
        let row_num = idx0 + 1;
        let row = row_res?;

        let by_name: HashMap<&str, &Field> = row
            .get_column_iter()
            .map(|(name, field)| (name.as_str(), field))
            .collect();

        let mut out_row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for f in &schema.fields {
            let v = by_name.get(f.name.as_str()).ok_or_else(|| IngestionError::SchemaMismatch {
                message: format!("row {row_num} missing required column '{}'", f.name),
            })?;
            out_row.push(convert_parquet_field(row_num, &f.name, f.data_type, v)?);
        }
        rows.push(out_row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

/// Infer a [`Schema`] from the Parquet file metadata.
///
/// Only top-level leaf columns are kept:
/// INT32/INT64 → `Int64`, FLOAT/DOUBLE → `Float64`, BOOLEAN → `Bool`, BYTE_ARRAY → `Utf8`.
/// Nested columns and other physical types (INT96, FIXED_LEN_BYTE_ARRAY) are left out.
pub fn infer_parquet_schema_from_path(path: impl AsRef<Path>) -> IngestionResult<Schema> {
    let reader = SerializedFileReader::try_from(path.as_ref())?;
    let descr = reader.metadata().file_metadata().schema_descr();

    let fields = descr
        .columns()
        .iter()
        .filter(|c| c.path().parts().len() == 1)
        .filter_map(|c| {
            let data_type = match c.physical_type() {
                PhysicalType::INT32 | PhysicalType::INT64 => DataType::Int64,
                PhysicalType::FLOAT | PhysicalType::DOUBLE => DataType::Float64,
                PhysicalType::BOOLEAN => DataType::Bool,
                PhysicalType::BYTE_ARRAY => DataType::Utf8,
                _ => return None,
            };
            Some(crate::types::Field::new(c.name(), data_type))
        })
        .collect();

    Ok(Schema::new(fields))
}

fn parquet_leaf_column_paths<R: ChunkReader + 'static>(reader: &SerializedFileReader<R>) -> HashSet<String> {
    reader
        .metadata()
        .file_metadata()
        .schema_descr()
        .columns()
        .iter()
        .map(|c| c.path().string())
        .collect()
}

fn convert_parquet_field(row: usize, column: &str, data_type: DataType, f: &Field) -> IngestionResult<Value> {
    if matches!(f, Field::Null) {
        return Ok(Value::Null);
    }

    let mismatch = |message: &str| IngestionError::ParseError {
        row,
        column: column.to_string(),
        raw: f.to_string(),
        message: message.to_string(),
    };

    match data_type {
        DataType::Utf8 => match f {
            Field::Str(s) => Ok(Value::Utf8(s.clone())),
            Field::Bytes(b) => Ok(Value::Utf8(String::from_utf8_lossy(b.data()).into_owned())),
            _ => Err(mismatch("expected string")),
        },
        DataType::Bool => match f {
            Field::Bool(b) => Ok(Value::Bool(*b)),
            _ => Err(mismatch("expected bool")),
        },
        DataType::Int64 => match f {
            Field::Byte(v) => Ok(Value::Int64(i64::from(*v))),
            Field::Short(v) => Ok(Value::Int64(i64::from(*v))),
            Field::Int(v) => Ok(Value::Int64(i64::from(*v))),
            Field::Long(v) => Ok(Value::Int64(*v)),
            Field::UByte(v) => Ok(Value::Int64(i64::from(*v))),
            Field::UShort(v) => Ok(Value::Int64(i64::from(*v))),
            Field::UInt(v) => Ok(Value::Int64(i64::from(*v))),
            Field::ULong(v) => i64::try_from(*v)
                .map(Value::Int64)
                .map_err(|_| mismatch("u64 out of range for i64")),
            _ => Err(mismatch("expected integer")),
        },
        DataType::Float64 => match f {
            Field::Float(v) => Ok(Value::Float64(f64::from(*v))),
            Field::Double(v) => Ok(Value::Float64(*v)),
            _ => Err(mismatch("expected number")),
        },
    }
}
