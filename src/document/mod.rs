//! The universal document model and per-format readers/writers.
//!
//! This module defines the canonical, format-agnostic representation
//! that all conversions pass through, similar to how Pandoc uses an
//! internal AST for document conversion: every reader parses into a
//! [`Document`], every writer renders out of one, so N formats need 2N
//! converters instead of N×M.
//!
//! # Design Principles
//!
//! 1. **Explicit sum type**: the decoded payload is a closed [`Value`]
//!    enum, not a dynamic container, so every consumer handles every
//!    shape exhaustively.
//!
//! 2. **Derived schema**: a [`Document`] carries a [`Schema`] inferred
//!    from its value. The schema describes, it never validates.
//!
//! 3. **Deterministic surfaces**: objects are unordered, so everything
//!    that must emit a stable order (CSV headers, XML tags) uses
//!    lexicographic key order.

mod flatten;
pub mod io_csv;
pub mod io_json;
pub mod io_toml;
pub mod io_xml;
pub mod io_yaml;
mod model;
mod schema;
mod value;

// Re-export core types for convenient access
pub use flatten::{array_to_string, flatten};
pub use model::Document;
pub use schema::{infer_schema, DataType, FieldSchema, Schema};
pub use value::{infer_scalar, Value};
