//! Conversion pipeline: detect, parse, write.
//!
//! This module dispatches bytes to the per-format readers and writers
//! behind a single pair of entry points, plus the end-to-end
//! [`convert_slice`] that chains detection in front. Every operation is
//! a pure function over in-memory bytes: no shared state, no I/O, safe
//! to run concurrently across independent inputs.

use crate::detect::{detect_format, Format};
use crate::document::{io_csv, io_json, io_toml, io_xml, io_yaml, Document};
use crate::error::PanconvError;

/// Options threaded through parsing and writing.
///
/// CSV consumes the delimiter, header flag, and header override; JSON
/// consumes the pretty toggle; the remaining formats take no options.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// CSV field delimiter, for both reading and writing.
    pub delimiter: u8,
    /// Whether CSV input carries a header row.
    pub has_header: bool,
    /// Explicit CSV output header override.
    pub headers: Option<Vec<String>>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            delimiter: b',',
            has_header: true,
            headers: None,
        }
    }
}

impl ConvertOptions {
    fn csv_read(&self) -> io_csv::CsvReadOptions {
        io_csv::CsvReadOptions {
            delimiter: self.delimiter,
            has_header: self.has_header,
        }
    }

    fn csv_write(&self) -> io_csv::CsvWriteOptions {
        io_csv::CsvWriteOptions {
            delimiter: self.delimiter,
            headers: self.headers.clone(),
        }
    }
}

/// Parses bytes claimed to be in `format` into a document.
///
/// Codec failures surface unmodified as the error source; asking for
/// [`Format::Unknown`] is an unsupported-format error.
pub fn parse_slice(
    data: &[u8],
    format: Format,
    opts: &ConvertOptions,
) -> Result<Document, PanconvError> {
    match format {
        Format::Json => io_json::from_json_slice(data),
        Format::Csv => io_csv::from_csv_slice(data, &opts.csv_read()),
        Format::Yaml => io_yaml::from_yaml_slice(data),
        Format::Xml => io_xml::from_xml_slice(data),
        Format::Toml => io_toml::from_toml_slice(data),
        Format::Unknown => Err(PanconvError::UnsupportedFormat(
            Format::Unknown.name().to_string(),
        )),
    }
}

/// Writes a document as bytes in the target format.
pub fn write_bytes(
    doc: &Document,
    format: Format,
    opts: &ConvertOptions,
) -> Result<Vec<u8>, PanconvError> {
    match format {
        Format::Json => io_json::to_json_bytes(doc, opts.pretty),
        Format::Csv => io_csv::to_csv_bytes(doc, &opts.csv_write()),
        Format::Yaml => io_yaml::to_yaml_bytes(doc),
        Format::Xml => io_xml::to_xml_bytes(doc),
        Format::Toml => io_toml::to_toml_bytes(doc),
        Format::Unknown => Err(PanconvError::UnsupportedFormat(
            Format::Unknown.name().to_string(),
        )),
    }
}

/// Detects the input format, parses, and re-serializes into `target`.
///
/// Detection returning unknown is a hard error here; the caller decides
/// what to do with it (the CLI reports the file and moves on in batch
/// mode).
pub fn convert_slice(
    data: &[u8],
    target: Format,
    opts: &ConvertOptions,
) -> Result<Vec<u8>, PanconvError> {
    let source = detect_format(data);
    if source == Format::Unknown {
        return Err(PanconvError::UnknownFormat { path: None });
    }

    let doc = parse_slice(data, source, opts)?;
    write_bytes(&doc, target, opts)
}
