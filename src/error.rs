use std::path::PathBuf;
use thiserror::Error;

/// The main error type for panconv operations.
#[derive(Debug, Error)]
pub enum PanconvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not detect input format{}", context_suffix(.path))]
    UnknownFormat { path: Option<PathBuf> },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to parse JSON: {source}")]
    JsonParse {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write JSON: {source}")]
    JsonWrite {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse YAML: {source}")]
    YamlParse {
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to write YAML: {source}")]
    YamlWrite {
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse TOML: {source}")]
    TomlParse {
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to write TOML: {source}")]
    TomlWrite {
        #[source]
        source: toml::ser::Error,
    },

    #[error("TOML cannot represent this document: {message}")]
    TomlUnrepresentable { message: String },

    #[error("failed to decode YAML: {message}")]
    YamlUnsupported { message: String },

    #[error("failed to parse CSV: {source}")]
    CsvParse {
        #[source]
        source: csv::Error,
    },

    #[error("failed to write CSV: {source}")]
    CsvWrite {
        #[source]
        source: csv::Error,
    },

    #[error("cannot represent number {value} in {format}")]
    NonFiniteNumber { format: &'static str, value: f64 },

    #[error("failed to parse XML: {message}")]
    XmlParse { message: String },

    #[error("failed to write XML: {message}")]
    XmlWrite { message: String },

    #[error("input is not valid UTF-8: {message}")]
    InvalidUtf8 { message: String },
}

fn context_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" for {}", path.display()),
        None => String::new(),
    }
}
