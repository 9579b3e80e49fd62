//! The universal decoded payload type.
//!
//! Every parser produces a [`Value`] tree and every writer consumes one.
//! The original "any-typed" decoded value becomes an explicit sum type
//! here so the compiler enforces exhaustive handling in every consumer.

use std::collections::BTreeMap;

/// A format-agnostic decoded value.
///
/// Objects are string-keyed maps with no semantically meaningful order;
/// they are stored in a `BTreeMap` so that every surface that needs a
/// deterministic ordering (CSV headers, XML element order) gets
/// lexicographic key order for free.
///
/// Numbers carry f64 semantics across all formats, matching what the
/// JSON/YAML/TOML codecs decode untyped numbers into.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Returns the contained object map, if this is an object.
    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the contained array, if this is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// True for the scalar variants (everything except arrays and objects).
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Object(_))
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

/// Infers a scalar [`Value`] from a raw text fragment.
///
/// Used for CSV cells and XML text leaves, which arrive untyped. The
/// priority is fixed and intentional:
///
/// 1. boolean literals (`true`/`1`/`yes`/`on` and `false`/`0`/`no`/`off`,
///    case-insensitive on the trimmed text),
/// 2. an f64 parse of the verbatim text,
/// 3. the verbatim text as a string.
///
/// Note the consequence: the literals `"0"` and `"1"` become booleans,
/// not numbers. Surprising but deliberate; callers that need numeric
/// zero/one must quote nothing differently, there is no escape hatch.
pub fn infer_scalar(raw: &str) -> Value {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => return Value::Bool(true),
        "false" | "0" | "no" | "off" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(number) = raw.parse::<f64>() {
        return Value::Number(number);
    }

    Value::String(raw.to_string())
}

/// Formats a number the way every text surface in this crate does:
/// shortest round-trip form, no forced decimals, no scientific notation.
pub(crate) fn fmt_number(n: f64) -> String {
    n.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_boolean_literals_case_insensitively() {
        assert_eq!(infer_scalar("true"), Value::Bool(true));
        assert_eq!(infer_scalar("YES"), Value::Bool(true));
        assert_eq!(infer_scalar(" on "), Value::Bool(true));
        assert_eq!(infer_scalar("False"), Value::Bool(false));
        assert_eq!(infer_scalar("no"), Value::Bool(false));
        assert_eq!(infer_scalar("off"), Value::Bool(false));
    }

    #[test]
    fn zero_and_one_are_booleans_before_numbers() {
        assert_eq!(infer_scalar("0"), Value::Bool(false));
        assert_eq!(infer_scalar("1"), Value::Bool(true));
    }

    #[test]
    fn infers_numbers() {
        assert_eq!(infer_scalar("3.14"), Value::Number(3.14));
        assert_eq!(infer_scalar("-2"), Value::Number(-2.0));
        assert_eq!(infer_scalar("1e3"), Value::Number(1000.0));
    }

    #[test]
    fn falls_back_to_verbatim_string() {
        assert_eq!(infer_scalar("hello"), Value::String("hello".into()));
        // Interior whitespace defeats the numeric parse, so the cell
        // stays a string, untouched.
        assert_eq!(infer_scalar(" 3.14"), Value::String(" 3.14".into()));
    }

    #[test]
    fn number_formatting_avoids_trailing_decimals() {
        assert_eq!(fmt_number(30.0), "30");
        assert_eq!(fmt_number(3.14), "3.14");
        assert_eq!(fmt_number(-0.5), "-0.5");
    }
}
