//! The document pair produced by parsers and consumed by writers.

use super::schema::{infer_schema, Schema};
use super::value::Value;

/// A parsed document: a decoded value plus the schema derived from it.
///
/// The schema is inferred fresh at construction and is descriptive only;
/// writers read `data`, never validate against `schema`. The top-level
/// schema type always matches the runtime shape of `data`.
///
/// A document is created once per conversion by a parser and consumed
/// exactly once by a writer; there is no mutation or sharing across
/// conversions.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub schema: Schema,
    pub data: Value,
}

impl Document {
    /// Wraps a decoded value, deriving its schema.
    pub fn new(data: Value) -> Self {
        Self {
            schema: infer_schema(&data),
            data,
        }
    }
}
