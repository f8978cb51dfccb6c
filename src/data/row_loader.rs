use anyhow::{anyhow, Context, Result};
use serde_json::Value as JsonValue;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::data::column::{ColumnKind, ColumnSpec};
use crate::data::row::{CellValue, Row};

/// Load a JSON file holding an array of objects
pub fn load_json_rows<P: AsRef<Path>>(path: P) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let json: JsonValue = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    let rows = rows_from_json(&json)?;
    debug!(target: "loader", "Loaded {} rows from {:?}", rows.len(), path);
    Ok(rows)
}

/// Convert a JSON array of objects into rows
pub fn rows_from_json(json: &JsonValue) -> Result<Vec<Row>> {
    let array = json
        .as_array()
        .ok_or_else(|| anyhow!("Expected a JSON array of objects"))?;

    array
        .iter()
        .enumerate()
        .map(|(idx, item)| -> Result<Row> {
            let obj = item
                .as_object()
                .ok_or_else(|| anyhow!("Item {} is not a JSON object", idx))?;
            Ok(obj
                .iter()
                .map(|(key, value)| (key.clone(), json_to_cell(value)))
                .collect())
        })
        .collect()
}

fn json_to_cell(value: &JsonValue) -> CellValue {
    match value {
        JsonValue::Null => CellValue::Null,
        JsonValue::Bool(b) => CellValue::Boolean(*b),
        JsonValue::Number(n) => n
            .as_f64()
            .map(CellValue::Number)
            .unwrap_or_else(|| CellValue::String(n.to_string())),
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Array(items) => CellValue::List(
            items
                .iter()
                .map(|item| match item {
                    JsonValue::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        ),
        // Nested objects are kept as their JSON text
        JsonValue::Object(_) => CellValue::String(value.to_string()),
    }
}

/// Build a column schema from the keys seen in `rows`, in first-seen order.
/// The kind comes from the first non-null value of each key.
pub fn infer_columns(rows: &[Row]) -> Vec<ColumnSpec> {
    let mut keys: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
    }

    keys.into_iter()
        .map(|key| {
            let kind = rows
                .iter()
                .map(|row| row.get(&key))
                .find(|value| !value.is_null())
                .map(ColumnKind::infer_from_value)
                .unwrap_or_default();
            ColumnSpec::new(key.clone(), key).with_kind(kind)
        })
        .collect()
}
