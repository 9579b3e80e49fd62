//! YAML parsing and writing.
//!
//! Decoding and encoding are delegated to `serde_yaml`. YAML's value
//! space is wider than the document model's: non-string scalar keys are
//! stringified, tagged values are unwrapped to their inner value, and
//! complex (sequence/mapping) keys are rejected as decode errors.

use crate::document::model::Document;
use crate::document::value::Value;
use crate::error::PanconvError;

/// Parses YAML bytes into a document.
pub fn from_yaml_slice(data: &[u8]) -> Result<Document, PanconvError> {
    let raw: serde_yaml::Value = serde_yaml::from_slice(data)
        .map_err(|source| PanconvError::YamlParse { source })?;
    Ok(Document::new(yaml_to_value(raw)?))
}

/// Writes a document as YAML bytes.
pub fn to_yaml_bytes(doc: &Document) -> Result<Vec<u8>, PanconvError> {
    let yaml = value_to_yaml(&doc.data);
    let text =
        serde_yaml::to_string(&yaml).map_err(|source| PanconvError::YamlWrite { source })?;
    Ok(text.into_bytes())
}

fn yaml_to_value(raw: serde_yaml::Value) -> Result<Value, PanconvError> {
    Ok(match raw {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_value)
                .collect::<Result<_, _>>()?,
        ),
        serde_yaml::Value::Mapping(map) => {
            let mut out = std::collections::BTreeMap::new();
            for (key, value) in map {
                out.insert(yaml_key_to_string(key)?, yaml_to_value(value)?);
            }
            Value::Object(out)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_value(tagged.value)?,
    })
}

fn yaml_key_to_string(key: serde_yaml::Value) -> Result<String, PanconvError> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key_to_string(tagged.value),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => {
            Err(PanconvError::YamlUnsupported {
                message: "mapping keys must be scalars".to_string(),
            })
        }
    }
}

fn value_to_yaml(value: &Value) -> serde_yaml::Value {
    match value {
        Value::Null => serde_yaml::Value::Null,
        Value::Bool(b) => serde_yaml::Value::Bool(*b),
        Value::Number(n) => {
            if n.is_finite() && n.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(n)
            {
                serde_yaml::Value::Number(serde_yaml::Number::from(*n as i64))
            } else {
                serde_yaml::Value::Number(serde_yaml::Number::from(*n))
            }
        }
        Value::String(s) => serde_yaml::Value::String(s.clone()),
        Value::Array(items) => {
            serde_yaml::Value::Sequence(items.iter().map(value_to_yaml).collect())
        }
        Value::Object(map) => {
            let mut out = serde_yaml::Mapping::with_capacity(map.len());
            for (key, field) in map {
                out.insert(
                    serde_yaml::Value::String(key.clone()),
                    value_to_yaml(field),
                );
            }
            serde_yaml::Value::Mapping(out)
        }
    }
}
