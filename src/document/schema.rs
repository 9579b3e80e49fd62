//! Derived schema model and type inference.
//!
//! A [`Schema`] describes the shape of a [`Value`] without containing
//! data. Schemas are always *derived* from values, never authoritative:
//! nothing validates or coerces data against them on write.

use std::collections::BTreeMap;

use super::value::Value;

/// The type tag of a schema node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

/// Shape description of a value.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    /// The type of the described value.
    pub kind: DataType,

    /// Per-field schemas, populated for object types.
    pub fields: BTreeMap<String, FieldSchema>,

    /// Element schema, populated for non-empty array types. Absent for
    /// empty arrays; callers must not assume presence.
    pub items: Option<Box<FieldSchema>>,
}

impl Schema {
    /// A schema with the given type and no structure.
    pub fn scalar(kind: DataType) -> Self {
        Self {
            kind,
            fields: BTreeMap::new(),
            items: None,
        }
    }
}

/// Schema of a named field inside an object, or of array elements.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSchema {
    pub name: String,
    pub kind: DataType,

    /// Always true under current inference: nullability is not detected.
    /// A known limitation, not a promise about the data.
    pub required: bool,

    /// Recursive schema, populated only for Object and Array fields.
    pub nested: Option<Box<Schema>>,
}

/// Derives a schema from a decoded value.
///
/// Pure and total: every value variant maps to a schema, there is no
/// failure mode. Two approximations are baked in and asserted by tests
/// rather than "fixed":
///
/// - non-empty arrays take their element schema from the first element
///   only, so heterogeneous arrays lose the shape of later elements;
/// - null maps to the String type, the catch-all for shapeless data.
pub fn infer_schema(value: &Value) -> Schema {
    match value {
        Value::String(_) | Value::Null => Schema::scalar(DataType::String),
        Value::Number(_) => Schema::scalar(DataType::Number),
        Value::Bool(_) => Schema::scalar(DataType::Boolean),
        Value::Array(items) => {
            let items_schema = items.first().map(|first| {
                let nested = infer_schema(first);
                Box::new(FieldSchema {
                    name: "item".to_string(),
                    kind: nested.kind,
                    required: true,
                    nested: nested_for(nested),
                })
            });
            Schema {
                kind: DataType::Array,
                fields: BTreeMap::new(),
                items: items_schema,
            }
        }
        Value::Object(map) => {
            let fields = map
                .iter()
                .map(|(key, field_value)| {
                    let nested = infer_schema(field_value);
                    let field = FieldSchema {
                        name: key.clone(),
                        kind: nested.kind,
                        required: true,
                        nested: nested_for(nested),
                    };
                    (key.clone(), field)
                })
                .collect();
            Schema {
                kind: DataType::Object,
                fields,
                items: None,
            }
        }
    }
}

/// Keeps the recursive schema only where it adds information.
fn nested_for(schema: Schema) -> Option<Box<Schema>> {
    match schema.kind {
        DataType::Object | DataType::Array => Some(Box::new(schema)),
        _ => None,
    }
}
