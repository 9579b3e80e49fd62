//! JSON parsing and writing.
//!
//! Decoding and encoding are delegated to `serde_json`; this module only
//! maps between `serde_json::Value` and the document model and derives
//! the schema. Whole-number floats are emitted as JSON integers so that
//! `30.0` in the model round-trips as `30` on the wire.

use crate::document::model::Document;
use crate::document::value::Value;
use crate::error::PanconvError;

/// Parses JSON bytes into a document.
pub fn from_json_slice(data: &[u8]) -> Result<Document, PanconvError> {
    let raw: serde_json::Value = serde_json::from_slice(data)
        .map_err(|source| PanconvError::JsonParse { source })?;
    Ok(Document::new(json_to_value(raw)))
}

/// Writes a document as JSON bytes, compact or pretty-printed.
pub fn to_json_bytes(doc: &Document, pretty: bool) -> Result<Vec<u8>, PanconvError> {
    let json = value_to_json(&doc.data)?;
    let bytes = if pretty {
        serde_json::to_vec_pretty(&json)
    } else {
        serde_json::to_vec(&json)
    };
    bytes.map_err(|source| PanconvError::JsonWrite { source })
}

fn json_to_value(raw: serde_json::Value) -> Value {
    match raw {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        // f64 semantics across the whole model; u64s beyond i64 range
        // degrade to the nearest representable float.
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::Array(items.into_iter().map(json_to_value).collect())
        }
        serde_json::Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, json_to_value(value)))
                .collect(),
        ),
    }
}

pub(crate) fn value_to_json(value: &Value) -> Result<serde_json::Value, PanconvError> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => serde_json::Value::Number(number_to_json(*n)?),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => serde_json::Value::Array(
            items.iter().map(value_to_json).collect::<Result<_, _>>()?,
        ),
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, field) in map {
                out.insert(key.clone(), value_to_json(field)?);
            }
            serde_json::Value::Object(out)
        }
    })
}

fn number_to_json(n: f64) -> Result<serde_json::Number, PanconvError> {
    if n.is_finite() && n.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(&n) {
        return Ok(serde_json::Number::from(n as i64));
    }
    serde_json::Number::from_f64(n).ok_or(PanconvError::NonFiniteNumber {
        format: "JSON",
        value: n,
    })
}
