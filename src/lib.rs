//! Panconv: The universal data format converter.
//!
//! Panconv converts structured data files between JSON, CSV, YAML, XML,
//! and TOML, similar to how Pandoc converts between document formats. It
//! detects the source format from the raw bytes, parses into a generic
//! intermediate document model, and re-serializes into the target
//! format, so N formats need 2N converters instead of N×M.
//!
//! # Modules
//!
//! - [`document`]: The document model (value, derived schema) and the
//!   per-format readers/writers
//! - [`detect`]: Heuristic format detection from raw bytes
//! - [`conversion`]: The detect→parse→write pipeline
//! - [`error`]: Error types for panconv operations

pub mod conversion;
pub mod detect;
pub mod document;
pub mod error;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use walkdir::WalkDir;

pub use conversion::{convert_slice, parse_slice, write_bytes, ConvertOptions};
pub use detect::{detect_format, Detector, Format, Lossiness};
pub use document::{Document, Schema, Value};
pub use error::PanconvError;

/// The panconv CLI application.
#[derive(Parser)]
#[command(name = "panconv")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert a file into another format.
    Convert(ConvertArgs),

    /// Detect and report the format of input files.
    Detect(DetectArgs),

    /// Convert every file in a directory (non-recursive).
    Batch(BatchArgs),
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    /// Input file to convert.
    input: PathBuf,

    /// Output file to write.
    output: PathBuf,

    /// Target format ('json', 'csv', 'yaml', 'xml', or 'toml'). Inferred
    /// from the output file extension when omitted.
    #[arg(long)]
    to: Option<String>,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,

    /// CSV field delimiter.
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Treat the first CSV record as data, not a header row.
    #[arg(long)]
    no_header: bool,
}

/// Arguments for the detect subcommand.
#[derive(clap::Args)]
struct DetectArgs {
    /// Files to inspect.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// One line of the detect report, for the JSON output mode.
#[derive(serde::Serialize)]
struct DetectReport {
    path: String,
    format: &'static str,
}

/// Arguments for the batch subcommand.
#[derive(clap::Args)]
struct BatchArgs {
    /// Directory containing the input files.
    input_dir: PathBuf,

    /// Directory to write converted files into (created if missing).
    output_dir: PathBuf,

    /// Target format. When omitted, each file keeps its own format as
    /// named by its extension.
    #[arg(long)]
    to: Option<String>,
}

/// Run the panconv CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), PanconvError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert(args)) => run_convert(args),
        Some(Commands::Detect(args)) => run_detect(args),
        Some(Commands::Batch(args)) => run_batch(args),
        None => {
            // No subcommand: print a usage hint and exit successfully
            println!("panconv {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("The universal data format converter.");
            println!();
            println!("Run 'panconv --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), PanconvError> {
    let target = resolve_target(args.to.as_deref(), Some(&args.output))?;
    let opts = ConvertOptions {
        pretty: args.pretty,
        delimiter: args.delimiter,
        has_header: !args.no_header,
        headers: None,
    };

    convert_file(&args.input, &args.output, target, &opts)
}

/// Execute the detect subcommand.
fn run_detect(args: DetectArgs) -> Result<(), PanconvError> {
    let mut report = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        let data = fs::read(input)?;
        report.push(DetectReport {
            path: input.display().to_string(),
            format: detect_format(&data).name(),
        });
    }

    match args.output.as_str() {
        "json" => {
            let rendered = serde_json::to_string_pretty(&report)
                .map_err(|source| PanconvError::JsonWrite { source })?;
            println!("{rendered}");
        }
        _ => {
            for entry in &report {
                println!("{}: {}", entry.path, entry.format);
            }
        }
    }
    Ok(())
}

/// Execute the batch subcommand.
///
/// Partial-failure semantics live here and only here: one file failing
/// to convert is reported and skipped, the rest of the directory is
/// still processed.
fn run_batch(args: BatchArgs) -> Result<(), PanconvError> {
    fs::create_dir_all(&args.output_dir)?;

    let forced_target = match &args.to {
        Some(name) => Some(resolve_target(Some(name.as_str()), None)?),
        None => None,
    };

    for entry in WalkDir::new(&args.input_dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| {
            PanconvError::Io(
                source
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("failed to read directory entry")),
            )
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let input = entry.path();
        let target = match forced_target.or_else(|| extension_format(input)) {
            Some(target) => target,
            None => {
                eprintln!(
                    "Warning: unknown target format for {}, skipping",
                    input.display()
                );
                continue;
            }
        };

        let file_stem = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());
        let output = args
            .output_dir
            .join(format!("{}.{}", file_stem, target.name()));

        if let Err(err) = convert_file(input, &output, target, &ConvertOptions::default()) {
            eprintln!("Warning: error processing {}: {}", input.display(), err);
            continue;
        }
    }

    Ok(())
}

/// Reads, detects, parses, writes: one file conversion.
fn convert_file(
    input: &Path,
    output: &Path,
    target: Format,
    opts: &ConvertOptions,
) -> Result<(), PanconvError> {
    let data = fs::read(input)?;

    let source = detect_format(&data);
    if source == Format::Unknown {
        return Err(PanconvError::UnknownFormat {
            path: Some(input.to_path_buf()),
        });
    }

    let doc = parse_slice(&data, source, opts)?;
    let rendered = write_bytes(&doc, target, opts)?;
    fs::write(output, rendered)?;

    println!(
        "Converted {} ({}) -> {} ({})",
        input.display(),
        source,
        output.display(),
        target
    );
    Ok(())
}

/// Resolves the target format from an explicit name or, failing that,
/// the output file extension.
fn resolve_target(name: Option<&str>, output: Option<&Path>) -> Result<Format, PanconvError> {
    if let Some(name) = name {
        return Format::parse_name(name).ok_or_else(|| {
            PanconvError::UnsupportedFormat(format!(
                "'{}' (supported: json, csv, yaml, xml, toml)",
                name
            ))
        });
    }

    output.and_then(extension_format).ok_or_else(|| {
        PanconvError::UnsupportedFormat(
            "no --to given and the output extension names no known format".to_string(),
        )
    })
}

fn extension_format(path: &Path) -> Option<Format> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(Format::parse_name)
}

fn parse_delimiter(raw: &str) -> Result<u8, String> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err("delimiter must be a single ASCII character".to_string()),
    }
}
