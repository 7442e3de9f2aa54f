//! JSON ingestion and schema inference.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - A single JSON object
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`
//!
//! Nested fields are addressed with dot paths in schema field names (e.g. `user.name`).

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde_json::{Map, Value as JsonValue};

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Schema, Value};

use super::infer::{Inferred, SchemaBuilder};

/// Ingest JSON into an in-memory `DataSet`.
pub fn ingest_json_from_path(path: impl AsRef<Path>, schema: &Schema) -> IngestionResult<DataSet> {
    let text = fs::read_to_string(path)?;
    ingest_json_from_str(&text, schema)
}

/// Ingest JSON from an in-memory string into a [`DataSet`].
pub fn ingest_json_from_str(input: &str, schema: &Schema) -> IngestionResult<DataSet> {
    let records = parse_records(input)?;
    ingest_json_values(&records, schema)
}

/// Infer a [`Schema`] from a JSON file.
pub fn infer_json_schema_from_path(path: impl AsRef<Path>) -> IngestionResult<Schema> {
    let text = fs::read_to_string(path)?;
    infer_json_schema_from_str(&text)
}

/// Infer a [`Schema`] from JSON text.
///
/// - Keys are collected in first-seen order across all records.
/// - Nested objects are flattened into dot paths (`user.name`).
/// - Integers → `Int64`, other numbers → `Float64`, strings → `Utf8`, bools → `Bool`; mixed
///   scalar kinds widen like CSV cells do. `null` carries no type information.
/// - Paths holding arrays, paths missing from some records, and paths that are an object in one
///   record and a scalar in another are left out.
pub fn infer_json_schema_from_str(input: &str) -> IngestionResult<Schema> {
    let records = parse_records(input)?;

    let mut builder = SchemaBuilder::new();
    let mut objects: HashSet<String> = HashSet::new();
    let mut present: HashMap<String, usize> = HashMap::new();
    let mut rejected: HashSet<String> = HashSet::new();

    for (idx0, record) in records.iter().enumerate() {
        let obj = record.as_object().ok_or_else(|| not_an_object(idx0 + 1))?;
        let mut leaves = Vec::new();
        flatten(obj, "", &mut leaves, &mut objects);
        for (path, v) in leaves {
            let kind = match v {
                JsonValue::Null => Inferred::Empty,
                JsonValue::Bool(_) => Inferred::Bool,
                JsonValue::Number(n) if n.is_i64() => Inferred::Int,
                JsonValue::Number(_) => Inferred::Float,
                JsonValue::String(_) => Inferred::Text,
                JsonValue::Array(_) | JsonValue::Object(_) => {
                    rejected.insert(path.clone());
                    Inferred::Empty
                }
            };
            *present.entry(path.clone()).or_default() += 1;
            if let Some(slot) = builder.column(&path) {
                builder.observe(slot, kind);
            }
        }
    }

    let mut schema = builder.build();
    schema.fields.retain(|f| {
        !rejected.contains(&f.name)
            && !objects.contains(&f.name)
            && present.get(&f.name) == Some(&records.len())
    });
    Ok(schema)
}

fn parse_records(input: &str) -> IngestionResult<Vec<JsonValue>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(IngestionError::SchemaMismatch {
            message: "json input is empty".to_string(),
        });
    }

    // A single JSON document first (array or object), NDJSON otherwise.
    if let Ok(v) = serde_json::from_str::<JsonValue>(trimmed) {
        return match v {
            JsonValue::Array(items) => Ok(items),
            JsonValue::Object(_) => Ok(vec![v]),
            _ => Err(IngestionError::SchemaMismatch {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            }),
        };
    }

    let mut values = Vec::new();
    for (i, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let v = serde_json::from_str::<JsonValue>(line).map_err(|e| IngestionError::SchemaMismatch {
            message: format!("invalid ndjson at line {}: {}", i + 1, e),
        })?;
        values.push(v);
    }
    Ok(values)
}

/// Collect `(dot.path, value)` for every non-object value under `obj`; object paths go to
/// `objects`.
fn flatten<'a>(
    obj: &'a Map<String, JsonValue>,
    prefix: &str,
    out: &mut Vec<(String, &'a JsonValue)>,
    objects: &mut HashSet<String>,
) {
    for (key, v) in obj {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match v {
            JsonValue::Object(inner) => {
                flatten(inner, &path, out, objects);
                objects.insert(path);
            }
            _ => out.push((path, v)),
        }
    }
}

fn not_an_object(row_num: usize) -> IngestionError {
    IngestionError::SchemaMismatch {
        message: format!("row {row_num} is not a json object"),
    }
}

fn ingest_json_values(values: &[JsonValue], schema: &Schema) -> IngestionResult<DataSet> {
    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(values.len());

    for (idx0, v) in values.iter().enumerate() {
        let row_num = idx0 + 1;
        let obj = v.as_object().ok_or_else(|| not_an_object(row_num))?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for field in &schema.fields {
            let jv = get_by_dot_path(obj, &field.name).ok_or_else(|| IngestionError::SchemaMismatch {
                message: format!("row {row_num} missing required field '{}'", field.name),
            })?;
            row.push(convert_json_value(row_num, &field.name, field.data_type, jv)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

fn get_by_dot_path<'a>(root: &'a Map<String, JsonValue>, path: &str) -> Option<&'a JsonValue> {
    // Literal keys containing dots win over nested lookup.
    if let Some(v) = root.get(path) {
        return Some(v);
    }

    let mut segments = path.split('.');
    let mut current = root.get(segments.next()?)?;
    for segment in segments {
        match current {
            JsonValue::Object(map) => current = map.get(segment)?,
            _ => return None,
        }
    }
    Some(current)
}

fn convert_json_value(row: usize, column: &str, data_type: DataType, v: &JsonValue) -> IngestionResult<Value> {
    if v.is_null() {
        return Ok(Value::Null);
    }

    let parse_error = |message: &str| IngestionError::ParseError {
        row,
        column: column.to_string(),
        raw: v.to_string(),
        message: message.to_string(),
    };

    match data_type {
        // Scalars of any kind read as text in a text column.
        DataType::Utf8 => match v {
            JsonValue::String(s) => Ok(Value::Utf8(s.clone())),
            JsonValue::Number(_) | JsonValue::Bool(_) => Ok(Value::Utf8(v.to_string())),
            _ => Err(parse_error("expected string")),
        },
        DataType::Bool => v.as_bool().map(Value::Bool).ok_or_else(|| parse_error("expected bool")),
        DataType::Int64 => {
            if let Some(n) = v.as_i64() {
                Ok(Value::Int64(n))
            } else if v.is_u64() {
                Err(parse_error("u64 out of range for i64"))
            } else {
                Err(parse_error("expected integer number"))
            }
        }
        DataType::Float64 => v.as_f64().map(Value::Float64).ok_or_else(|| parse_error("expected number")),
    }
}

#[cfg(test)]
mod tests {
    use super::{infer_json_schema_from_str, ingest_json_from_str};
    use crate::types::{DataType, Value};

    #[test]
    fn infers_flattened_schema_in_key_order() {
        let input = r#"[
            {"id": 1, "user": {"name": "Ada"}, "score": 98, "tags": ["x"]},
            {"id": 2, "user": {"name": "Grace"}, "score": 87.25, "tags": []}
        ]"#;
        let schema = infer_json_schema_from_str(input).unwrap();
        let types: Vec<(&str, DataType)> =
            schema.fields.iter().map(|f| (f.name.as_str(), f.data_type)).collect();
        assert_eq!(
            types,
            vec![
                ("id", DataType::Int64),
                ("user.name", DataType::Utf8),
                ("score", DataType::Float64),
            ]
        );
    }

    #[test]
    fn object_and_scalar_conflict_is_dropped() {
        let input = "{\"a\": {\"b\": 1}, \"c\": true}\n{\"a\": 5, \"c\": null}\n";
        let schema = infer_json_schema_from_str(input).unwrap();
        let names: Vec<&str> = schema.field_names().collect();
        assert_eq!(names, vec!["c"]);
        assert_eq!(schema.fields[0].data_type, DataType::Bool);
    }

    #[test]
    fn mixed_scalars_read_as_text() {
        let input = r#"[{"code": 7}, {"code": "A7"}, {"code": true}]"#;
        let schema = infer_json_schema_from_str(input).unwrap();
        assert_eq!(schema.fields[0].data_type, DataType::Utf8);

        let ds = ingest_json_from_str(input, &schema).unwrap();
        assert_eq!(ds.rows[0][0], Value::Utf8("7".to_string()));
        assert_eq!(ds.rows[2][0], Value::Utf8("true".to_string()));
    }
}
