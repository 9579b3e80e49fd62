//! Heuristic format detection.
//!
//! The detector classifies raw bytes as one of the supported formats
//! without any extension hint. Detection is a priority-ordered,
//! first-match chain rather than a confidence score: the JSON check runs
//! first because its bracket test is cheap and unambiguous, the loose CSV
//! comma check runs before YAML because CSV has no structural markers of
//! its own, and the TOML `=`-without-`:` check runs after YAML so that
//! YAML lines containing `=` are not misclassified.
//!
//! The chain is fixed; reordering it changes results. Matchers are pure
//! functions over the input, so a [`Detector`] is safe to share across
//! threads and reuse for any number of inputs.

/// A supported data format, plus the `Unknown` sentinel for undetectable
/// input.
///
/// The set is closed: every parser, writer, and matcher switches
/// exhaustively over it, so adding a format means updating all of them in
/// lockstep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Csv,
    Yaml,
    Xml,
    Toml,
    Unknown,
}

impl Format {
    /// Stable lowercase name for the format.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Csv => "csv",
            Format::Yaml => "yaml",
            Format::Xml => "xml",
            Format::Toml => "toml",
            Format::Unknown => "unknown",
        }
    }

    /// Maps a user-supplied format name (or file extension) back to the
    /// enum. Case-insensitive; `yml` is accepted as an alias for YAML.
    ///
    /// Returns `None` for anything outside the closed set, including
    /// `"unknown"` itself: callers asking for a target format must name a
    /// real one.
    pub fn parse_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "csv" => Some(Format::Csv),
            "yaml" | "yml" => Some(Format::Yaml),
            "xml" => Some(Format::Xml),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }

    /// How lossy this format is relative to the document model.
    ///
    /// - `Json`/`Yaml`: Lossless (full value tree representable)
    /// - `Toml`: Conditional (no null; top level must be a table)
    /// - `Csv`/`Xml`: Lossy (flattening and tag/text mapping drop structure)
    pub fn lossiness(&self) -> Lossiness {
        match self {
            Format::Json | Format::Yaml => Lossiness::Lossless,
            Format::Toml => Lossiness::Conditional,
            Format::Csv | Format::Xml => Lossiness::Lossy,
            Format::Unknown => Lossiness::Lossy,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classification of how lossy a format is relative to the document model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lossiness {
    /// Format can represent every document (round-trip safe).
    Lossless,
    /// Format may lose information depending on document content.
    Conditional,
    /// Format always loses some structural information.
    Lossy,
}

/// Identifies the format of raw input bytes.
///
/// Holds nothing but the fixed, ordered matcher chain; construction is
/// free and instances are reusable.
pub struct Detector {
    matchers: &'static [(Format, fn(&str) -> bool)],
}

const MATCHERS: &[(Format, fn(&str) -> bool)] = &[
    (Format::Json, is_json),
    (Format::Csv, is_csv),
    (Format::Yaml, is_yaml),
    (Format::Xml, is_xml),
    (Format::Toml, is_toml),
];

impl Detector {
    /// Creates a detector with the standard matcher chain.
    pub fn new() -> Self {
        Self { matchers: MATCHERS }
    }

    /// Detects the format of the input data.
    ///
    /// Returns [`Format::Unknown`] when no matcher fires; callers must
    /// treat that as a hard error, not a default.
    pub fn detect(&self, data: &[u8]) -> Format {
        let text = String::from_utf8_lossy(data);
        for (format, matcher) in self.matchers {
            if matcher(&text) {
                return *format;
            }
        }
        Format::Unknown
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}

/// Detects the format of the input data with a throwaway [`Detector`].
pub fn detect_format(data: &[u8]) -> Format {
    Detector::new().detect(data)
}

/// JSON: non-empty trimmed input delimited by a matching bracket pair.
/// Structural only; no parse attempt.
fn is_json(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }
    (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
}

/// CSV: any non-whitespace line that splits into at least two
/// comma-delimited fields. Deliberately permissive; the stricter JSON
/// check has already had its chance by the time this runs.
fn is_csv(text: &str) -> bool {
    text.lines().any(|line| {
        line.contains(',')
            && !line.trim().is_empty()
            && line.split(',').count() >= 2
    })
}

/// YAML: a non-comment line with a `": "` mapping separator or a `"- "`
/// sequence marker, or any line carrying block indentation.
fn is_yaml(text: &str) -> bool {
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed.contains(": ") || trimmed.starts_with("- ") {
            return true;
        }
        if line.starts_with("  ") || line.starts_with('\t') {
            return true;
        }
    }
    false
}

/// XML: at least 5 trimmed chars and an XML declaration, an opening
/// angle bracket, or a closing tag anywhere in the input.
fn is_xml(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.len() < 5 {
        return false;
    }
    trimmed.starts_with("<?xml") || trimmed.starts_with('<') || trimmed.contains("</")
}

/// TOML: a `key = value` line whose key is restricted to
/// letters/digits/`_`/`-` and which carries no `:` (so YAML mappings with
/// `=` in the value do not land here), or a bare `[table]` header line.
fn is_toml(text: &str) -> bool {
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed.contains('=') && !trimmed.contains(':') {
            if let Some((key, _)) = trimmed.split_once('=') {
                let key = key.trim();
                if key
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
                {
                    return true;
                }
            }
        }
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            return true;
        }
    }
    false
}
