//! XML reader and writer.
//!
//! Parsing builds a real element tree (via `roxmltree`) and maps it onto
//! the document model; writing is the structural inverse. The mapping:
//!
//! - an element with child elements becomes an object keyed by tag name;
//!   repeated sibling tags collapse into an array under their shared key;
//! - a text-only leaf becomes a scalar via the same string-inference
//!   rules as CSV cells; an empty leaf becomes null;
//! - attributes map to reserved `@name` keys, kept as verbatim strings;
//! - text alongside attributes or children lands under the reserved
//!   `#text` key;
//! - the root element's name becomes the single key of the top-level
//!   object, so writing a one-key object restores the original root tag.
//!
//! The pair round-trips structure but not XML lore: comments, processing
//! instructions, namespaces, and mixed-content ordering are dropped, and
//! a one-element array re-parses as a plain value. Those limits are
//! asserted in tests, not hidden.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::document::flatten::coerce_to_string;
use crate::document::model::Document;
use crate::document::value::{fmt_number, infer_scalar, Value};
use crate::error::PanconvError;

/// Reserved key prefix for element attributes.
const ATTR_PREFIX: char = '@';
/// Reserved key for text content of elements that also carry attributes
/// or children.
const TEXT_KEY: &str = "#text";

/// Parses XML bytes into a document.
pub fn from_xml_slice(data: &[u8]) -> Result<Document, PanconvError> {
    let text = std::str::from_utf8(data).map_err(|source| PanconvError::InvalidUtf8 {
        message: source.to_string(),
    })?;

    let tree = roxmltree::Document::parse(text).map_err(|source| PanconvError::XmlParse {
        message: source.to_string(),
    })?;

    let root = tree.root_element();
    let mut top = BTreeMap::new();
    top.insert(root.tag_name().name().to_string(), element_to_value(root));

    Ok(Document::new(Value::Object(top)))
}

fn element_to_value(node: roxmltree::Node<'_, '_>) -> Value {
    let mut children: BTreeMap<String, Vec<Value>> = BTreeMap::new();
    for child in node.children().filter(|n| n.is_element()) {
        children
            .entry(child.tag_name().name().to_string())
            .or_default()
            .push(element_to_value(child));
    }

    let text: String = node
        .children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect::<String>()
        .trim()
        .to_string();

    let attrs: Vec<_> = node.attributes().collect();

    if children.is_empty() && attrs.is_empty() {
        return if text.is_empty() {
            Value::Null
        } else {
            infer_scalar(&text)
        };
    }

    let mut map = BTreeMap::new();
    for attr in attrs {
        map.insert(
            format!("{ATTR_PREFIX}{}", attr.name()),
            Value::String(attr.value().to_string()),
        );
    }
    for (tag, mut values) in children {
        let value = if values.len() == 1 {
            values.remove(0)
        } else {
            Value::Array(values)
        };
        map.insert(tag, value);
    }
    if !text.is_empty() {
        map.insert(TEXT_KEY.to_string(), infer_scalar(&text));
    }

    Value::Object(map)
}

/// Writes a document as XML bytes.
///
/// If the data is an object with exactly one key, that key names the root
/// element; everything else is wrapped in `<root>`. Keys are written in
/// lexicographic order so output is deterministic.
pub fn to_xml_bytes(doc: &Document) -> Result<Vec<u8>, PanconvError> {
    let mut xml = String::new();
    writeln!(xml, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>").expect("write to string");

    match &doc.data {
        // A single-key array cannot name the root: its repeated tags
        // would become multiple root elements.
        Value::Object(map)
            if map.len() == 1 && !matches!(map.values().next(), Some(Value::Array(_))) =>
        {
            let (tag, value) = map.iter().next().expect("single entry");
            render_element(&mut xml, tag, value, 0)?;
        }
        Value::Array(items) => {
            writeln!(xml, "<root>").expect("write to string");
            for item in items {
                render_element(&mut xml, "item", item, 1)?;
            }
            writeln!(xml, "</root>").expect("write to string");
        }
        other => render_element(&mut xml, "root", other, 0)?,
    }

    Ok(xml.into_bytes())
}

fn render_element(
    xml: &mut String,
    tag: &str,
    value: &Value,
    depth: usize,
) -> Result<(), PanconvError> {
    check_tag_name(tag)?;
    let indent = "  ".repeat(depth);

    match value {
        Value::Object(map) => {
            let mut attrs = Vec::new();
            let mut text = None;
            let mut children = Vec::new();
            for (key, field) in map {
                if let Some(attr_name) = key.strip_prefix(ATTR_PREFIX) {
                    attrs.push((attr_name, coerce_to_string(field)));
                } else if key == TEXT_KEY {
                    text = Some(coerce_to_string(field));
                } else {
                    children.push((key, field));
                }
            }

            let mut open = format!("{indent}<{tag}");
            for (name, attr_value) in &attrs {
                check_tag_name(name)?;
                write!(open, " {name}=\"{}\"", xml_escape(attr_value)).expect("write to string");
            }

            match (&text, children.is_empty()) {
                (None, true) => {
                    writeln!(xml, "{open}/>").expect("write to string");
                }
                (Some(text), true) => {
                    writeln!(xml, "{open}>{}</{tag}>", xml_escape(text)).expect("write to string");
                }
                (text, false) => {
                    writeln!(xml, "{open}>").expect("write to string");
                    if let Some(text) = text {
                        writeln!(xml, "{indent}  {}", xml_escape(text)).expect("write to string");
                    }
                    for (key, field) in children {
                        match field {
                            // Arrays become repeated sibling tags.
                            Value::Array(items) => {
                                for item in items {
                                    render_element(xml, key, item, depth + 1)?;
                                }
                            }
                            other => render_element(xml, key, other, depth + 1)?,
                        }
                    }
                    writeln!(xml, "{indent}</{tag}>").expect("write to string");
                }
            }
        }
        // A nested array with no surrounding key (array-of-arrays)
        // repeats the parent tag; the nesting level is not recoverable.
        Value::Array(items) => {
            for item in items {
                render_element(xml, tag, item, depth)?;
            }
        }
        Value::Null => {
            writeln!(xml, "{indent}<{tag}/>").expect("write to string");
        }
        Value::String(s) => {
            writeln!(xml, "{indent}<{tag}>{}</{tag}>", xml_escape(s)).expect("write to string");
        }
        Value::Number(n) => {
            writeln!(xml, "{indent}<{tag}>{}</{tag}>", fmt_number(*n)).expect("write to string");
        }
        Value::Bool(b) => {
            writeln!(xml, "{indent}<{tag}>{b}</{tag}>").expect("write to string");
        }
    }

    Ok(())
}

/// Escapes the five reserved XML characters.
fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Object keys become tag names, so they must be valid ones.
fn check_tag_name(tag: &str) -> Result<(), PanconvError> {
    let mut chars = tag.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_alphabetic() || first == '_')
                && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(PanconvError::XmlWrite {
            message: format!("'{tag}' is not a valid XML element name"),
        })
    }
}
