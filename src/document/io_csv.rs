//! CSV reader and writer.
//!
//! Tokenization (quoting, escaping) is delegated to the `csv` crate; the
//! structural work here is original: header handling, per-cell type
//! inference, and the mapping between rows and the document model.
//!
//! # Reading
//!
//! With a header row, each data row becomes an object keyed by header
//! name. Rows longer than the header drop their extra cells; rows shorter
//! than the header leave the trailing keys absent (not null). Every cell
//! goes through [`infer_scalar`], so `"true"` becomes a boolean and
//! `"3.14"` a number — including the documented quirk that `"0"` and
//! `"1"` are booleans first.
//!
//! # Writing
//!
//! Headers are taken from the caller, or derived from the first record in
//! lexicographic key order so repeated runs produce identical output.
//! Records that are not plain objects are flattened first; values that
//! cannot live in a cell fall back to a generic string rendering. Both
//! directions are lossy by design and the limits are asserted in tests
//! rather than papered over.

use crate::document::flatten::{array_to_string, flatten, object_to_string};
use crate::document::model::Document;
use crate::document::value::{fmt_number, infer_scalar, Value};
use crate::error::PanconvError;

/// Options for reading CSV input.
#[derive(Clone, Debug)]
pub struct CsvReadOptions {
    /// Field delimiter, comma by default.
    pub delimiter: u8,
    /// Whether the first record supplies column names. When false,
    /// synthetic `field_0, field_1, …` names are used instead.
    pub has_header: bool,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
        }
    }
}

/// Options for writing CSV output.
#[derive(Clone, Debug)]
pub struct CsvWriteOptions {
    /// Field delimiter, comma by default.
    pub delimiter: u8,
    /// Explicit header override. When absent, headers are derived from
    /// the first record's keys in lexicographic order.
    pub headers: Option<Vec<String>>,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            headers: None,
        }
    }
}

/// Parses CSV bytes into a document holding an array of row objects.
pub fn from_csv_slice(data: &[u8], opts: &CsvReadOptions) -> Result<Document, PanconvError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(opts.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| PanconvError::CsvParse { source })?;
        records.push(record);
    }

    if records.is_empty() {
        return Ok(Document::new(Value::Array(Vec::new())));
    }

    let (headers, data_records) = if opts.has_header {
        let headers: Vec<String> = records[0].iter().map(str::to_string).collect();
        (headers, &records[1..])
    } else {
        let headers = (0..records[0].len()).map(|i| format!("field_{i}")).collect();
        (headers, &records[..])
    };

    let mut rows = Vec::with_capacity(data_records.len());
    for record in data_records {
        let mut row = std::collections::BTreeMap::new();
        for (i, cell) in record.iter().enumerate() {
            // Cells beyond the header are dropped; short records leave
            // the remaining keys absent.
            if i < headers.len() {
                row.insert(headers[i].clone(), infer_scalar(cell));
            }
        }
        rows.push(Value::Object(row));
    }

    // The derived schema describes the rows through the first element
    // only, the same first-element approximation used everywhere else.
    Ok(Document::new(Value::Array(rows)))
}

/// Writes a document as CSV bytes.
///
/// Three data shapes are accepted: an array (one record per row), a
/// single object (exactly one row), and a bare scalar (a one-column
/// `value` table).
pub fn to_csv_bytes(doc: &Document, opts: &CsvWriteOptions) -> Result<Vec<u8>, PanconvError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(opts.delimiter)
        .from_writer(Vec::new());

    match &doc.data {
        Value::Array(records) => {
            if records.is_empty() {
                if let Some(headers) = &opts.headers {
                    write_record(&mut writer, headers.iter().map(String::as_str))?;
                }
            } else {
                let headers = match &opts.headers {
                    Some(headers) => headers.clone(),
                    None => derive_headers(&records[0]),
                };
                // Records with no derivable columns (e.g. an array of
                // bare arrays) have nothing to put in a table.
                if headers.is_empty() {
                    return writer.into_inner().map_err(|e| PanconvError::Io(e.into_error()));
                }
                write_record(&mut writer, headers.iter().map(String::as_str))?;

                for record in records {
                    let row = match record {
                        Value::Object(map) => headers
                            .iter()
                            .map(|h| map.get(h).map(format_cell).unwrap_or_default())
                            .collect::<Vec<_>>(),
                        other => {
                            let flat = flatten(other);
                            headers
                                .iter()
                                .map(|h| flat.get(h).map(format_cell).unwrap_or_default())
                                .collect()
                        }
                    };
                    write_record(&mut writer, row.iter().map(String::as_str))?;
                }
            }
        }
        Value::Object(map) => {
            let headers = match &opts.headers {
                Some(headers) => headers.clone(),
                None => map.keys().cloned().collect(),
            };
            if headers.is_empty() {
                return writer.into_inner().map_err(|e| PanconvError::Io(e.into_error()));
            }
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h).map(format_cell).unwrap_or_default())
                .collect();

            write_record(&mut writer, headers.iter().map(String::as_str))?;
            write_record(&mut writer, row.iter().map(String::as_str))?;
        }
        scalar => {
            write_record(&mut writer, ["value"])?;
            write_record(&mut writer, [format_cell(scalar).as_str()])?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| PanconvError::Io(e.into_error()))
}

/// Header derivation for records with no caller override: object keys in
/// lexicographic order, or the flattened key set for non-object records.
fn derive_headers(record: &Value) -> Vec<String> {
    match record {
        Value::Object(map) => map.keys().cloned().collect(),
        other => flatten(other).into_keys().collect(),
    }
}

fn write_record<'a, I, W>(writer: &mut csv::Writer<W>, row: I) -> Result<(), PanconvError>
where
    I: IntoIterator<Item = &'a str>,
    W: std::io::Write,
{
    writer
        .write_record(row)
        .map_err(|source| PanconvError::CsvWrite { source })
}

/// Formats a single value for a CSV cell.
///
/// Strings are verbatim (the tokenizer handles quoting), numbers use
/// shortest form, null is an empty cell, and arrays/objects fall back to
/// the generic bracketed renderings — an accepted lossy fallback.
fn format_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => fmt_number(*n),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => array_to_string(items),
        Value::Object(map) => object_to_string(map),
    }
}
