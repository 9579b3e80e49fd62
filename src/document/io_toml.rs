//! TOML parsing and writing.
//!
//! Decoding and encoding are delegated to the `toml` crate. TOML is the
//! narrowest of the hierarchical formats: it has no null, and a document
//! must be a table at the top level. Writing a document that violates
//! either constraint is a write error, not a silent coercion. Datetimes
//! decode as their string form since the model has no date type.

use crate::document::model::Document;
use crate::document::value::Value;
use crate::error::PanconvError;

/// Parses TOML bytes into a document.
pub fn from_toml_slice(data: &[u8]) -> Result<Document, PanconvError> {
    let text = std::str::from_utf8(data).map_err(|source| PanconvError::InvalidUtf8 {
        message: source.to_string(),
    })?;
    let raw: toml::Value = text
        .parse()
        .map_err(|source| PanconvError::TomlParse { source })?;
    Ok(Document::new(toml_to_value(raw)))
}

/// Writes a document as TOML bytes.
pub fn to_toml_bytes(doc: &Document) -> Result<Vec<u8>, PanconvError> {
    let toml_value = value_to_toml(&doc.data)?;
    let text =
        toml::to_string(&toml_value).map_err(|source| PanconvError::TomlWrite { source })?;
    Ok(text.into_bytes())
}

fn toml_to_value(raw: toml::Value) -> Value {
    match raw {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(n) => Value::Number(n as f64),
        toml::Value::Float(n) => Value::Number(n),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            Value::Array(items.into_iter().map(toml_to_value).collect())
        }
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_value(value)))
                .collect(),
        ),
    }
}

fn value_to_toml(value: &Value) -> Result<toml::Value, PanconvError> {
    Ok(match value {
        Value::Null => {
            return Err(PanconvError::TomlUnrepresentable {
                message: "TOML has no null value".to_string(),
            })
        }
        Value::Bool(b) => toml::Value::Boolean(*b),
        Value::Number(n) => {
            if n.is_finite() && n.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(n)
            {
                toml::Value::Integer(*n as i64)
            } else {
                toml::Value::Float(*n)
            }
        }
        Value::String(s) => toml::Value::String(s.clone()),
        Value::Array(items) => toml::Value::Array(
            items.iter().map(value_to_toml).collect::<Result<_, _>>()?,
        ),
        Value::Object(map) => {
            let mut table = toml::map::Map::with_capacity(map.len());
            for (key, field) in map {
                table.insert(key.clone(), value_to_toml(field)?);
            }
            toml::Value::Table(table)
        }
    })
}
