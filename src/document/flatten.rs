//! One-level flattening of nested objects for tabular export.
//!
//! `{"user": {"name": "Al"}}` becomes `{"user_name": "Al"}` and arrays
//! collapse to a bracketed string, so a nested record can land in a CSV
//! row. The transform is deliberately lossy and one level deep; it has no
//! inverse, and grandchildren are carried along unexpanded under their
//! `parent_child` key. Anything needing genuine round trips should stay
//! in a hierarchical format.

use std::collections::BTreeMap;

use super::value::{fmt_number, Value};

/// Flattens a top-level object into a flat key-to-value row.
///
/// - scalar fields pass through unchanged;
/// - object fields expand one level into `parent_child` keys;
/// - array fields are rendered to their bracketed string form.
///
/// Non-object input produces an empty row: there are no keys to flatten.
pub fn flatten(value: &Value) -> BTreeMap<String, Value> {
    let mut flat = BTreeMap::new();

    if let Value::Object(map) = value {
        for (key, field) in map {
            match field {
                Value::Object(nested) => {
                    for (child_key, child) in nested {
                        flat.insert(format!("{key}_{child_key}"), child.clone());
                    }
                }
                Value::Array(items) => {
                    flat.insert(key.clone(), Value::String(array_to_string(items)));
                }
                other => {
                    flat.insert(key.clone(), other.clone());
                }
            }
        }
    }

    flat
}

/// Renders an array as `[a, b, c]` with member-wise string coercion.
pub fn array_to_string(items: &[Value]) -> String {
    let rendered: Vec<String> = items.iter().map(coerce_to_string).collect();
    format!("[{}]", rendered.join(", "))
}

/// Generic string coercion used wherever a value must become plain text
/// inside a larger rendering (array members, object fallbacks).
pub(crate) fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => fmt_number(*n),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(items) => array_to_string(items),
        Value::Object(map) => object_to_string(map),
    }
}

/// Generic `{key: value, ...}` rendering for objects that end up in a
/// plain-text slot. Lossy by construction; keys come out in
/// lexicographic order.
pub(crate) fn object_to_string(map: &BTreeMap<String, Value>) -> String {
    let rendered: Vec<String> = map
        .iter()
        .map(|(key, value)| format!("{key}: {}", coerce_to_string(value)))
        .collect();
    format!("{{{}}}", rendered.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(entries: Vec<(&str, Value)>) -> Value {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn nested_object_expands_one_level() {
        let value = obj(vec![(
            "user",
            obj(vec![
                ("name", Value::String("Al".into())),
                ("age", Value::Number(30.0)),
            ]),
        )]);

        let flat = flatten(&value);
        assert_eq!(flat["user_name"], Value::String("Al".into()));
        assert_eq!(flat["user_age"], Value::Number(30.0));
        assert_eq!(flat.len(), 2);
    }

    #[test]
    fn arrays_become_bracketed_strings() {
        let value = obj(vec![(
            "tags",
            Value::Array(vec![Value::String("a".into()), Value::String("b".into())]),
        )]);

        let flat = flatten(&value);
        assert_eq!(flat["tags"], Value::String("[a, b]".into()));
    }

    #[test]
    fn scalars_pass_through() {
        let value = obj(vec![
            ("name", Value::String("Ann".into())),
            ("active", Value::Bool(true)),
        ]);

        let flat = flatten(&value);
        assert_eq!(flat["name"], Value::String("Ann".into()));
        assert_eq!(flat["active"], Value::Bool(true));
    }

    #[test]
    fn grandchildren_are_not_expanded() {
        let value = obj(vec![(
            "a",
            obj(vec![("b", obj(vec![("c", Value::Number(1.0))]))]),
        )]);

        let flat = flatten(&value);
        // One level only: a_b holds the untouched grandchild object.
        assert_eq!(flat["a_b"], obj(vec![("c", Value::Number(1.0))]));
    }

    #[test]
    fn non_object_input_flattens_to_nothing() {
        assert!(flatten(&Value::Number(1.0)).is_empty());
        assert!(flatten(&Value::Array(vec![Value::Number(1.0)])).is_empty());
    }

    #[test]
    fn array_rendering_coerces_members() {
        let items = vec![
            Value::Number(1.0),
            Value::Number(2.5),
            Value::Bool(true),
            Value::String("x".into()),
        ];
        assert_eq!(array_to_string(&items), "[1, 2.5, true, x]");

        let nested = vec![Value::Array(vec![Value::Number(1.0), Value::Number(2.0)])];
        assert_eq!(array_to_string(&nested), "[[1, 2]]");
    }
}
