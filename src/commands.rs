//! Core CLI commands for termlinks: scan, suffixes, strip, info.

use std::io::BufRead as _;
use std::path::Path;

use termlinks::{
    OperatingSystem, ParsedLink, detect_link_suffixes, detect_links, remove_link_suffix,
};

use crate::config::{Config, OutputFormat};
use crate::error::Error;

/// JSON shape for one reported line of input.
#[derive(serde::Serialize)]
struct LineReport<'a> {
    /// One-based input line number.
    line: usize,
    /// Links detected on the line, left to right.
    links: Vec<ParsedLink<'a>>,
}

/// Detect links in a file, or stdin when no file is given.
///
/// # Errors
///
/// Returns `Error::Io` if the input cannot be read, or `Error::Json` if
/// JSON encoding fails.
pub fn scan(file: Option<&Path>, os: OperatingSystem, format: OutputFormat) -> Result<(), Error> {
    match file {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            for (number, line) in content.lines().enumerate() {
                report_line(number + 1, line, os, format)?;
            }
        }
        None => {
            let stdin = std::io::stdin();
            for (number, line) in stdin.lock().lines().enumerate() {
                let line = line?;
                report_line(number + 1, &line, os, format)?;
            }
        }
    }
    Ok(())
}

/// Report all links on one line. Lines without links print nothing, so
/// piping a whole build log through `scan` yields only the locations.
///
/// # Errors
///
/// Returns `Error::Json` if JSON encoding fails.
pub fn report_line(
    number: usize,
    line: &str,
    os: OperatingSystem,
    format: OutputFormat,
) -> Result<(), Error> {
    let links = detect_links(line, os);
    if links.is_empty() {
        return Ok(());
    }
    match format {
        OutputFormat::Json => {
            let report = LineReport { line: number, links };
            println!("{}", serde_json::to_string(&report)?);
        }
        OutputFormat::Text => {
            for link in &links {
                println!(
                    "{number}:{}  {}{}",
                    link.path.index,
                    link.path.text,
                    format_location(link)
                );
            }
        }
    }
    Ok(())
}

/// Render a link's row/col as a `  row[:col]` tail, or nothing.
fn format_location(link: &ParsedLink<'_>) -> String {
    let Some(suffix) = &link.suffix else {
        return String::new();
    };
    match (suffix.row, suffix.col) {
        (Some(row), Some(col)) => format!("  {row}:{col}"),
        (Some(row), None) => format!("  {row}"),
        _ => String::new(),
    }
}

/// Show every row/column suffix recognized in `text`.
///
/// # Errors
///
/// Returns `Error::Json` if JSON encoding fails.
pub fn suffixes(text: &str, format: OutputFormat) -> Result<(), Error> {
    let found = detect_link_suffixes(text);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&found)?),
        OutputFormat::Text => {
            for suffix in &found {
                let location = match (suffix.row, suffix.col) {
                    (Some(row), Some(col)) => format!("row {row}, col {col}"),
                    (Some(row), None) => format!("row {row}"),
                    _ => String::new(),
                };
                println!("{}  {:?}  {location}", suffix.span.index, suffix.span.text);
            }
        }
    }
    Ok(())
}

/// Print `text` with its trailing row/column suffix removed.
pub fn strip(text: &str) {
    println!("{}", remove_link_suffix(text));
}

/// Recognized suffix shapes, one example set per family.
const SUFFIX_FORMAT_EXAMPLES: &[&str] = &[
    "path:339  path:339:12  path 339:12",
    "path,339  \"path\",339:12",
    "path: line 339, col 12  path on line 339",
    "path(339)  path (339, 12)",
    "path[339]  path [339, 12]",
];

/// Fixed-format lines recognized ahead of the heuristics.
const DIFF_HEADER_EXAMPLES: &[&str] = &["--- a/path", "+++ b/path", "diff --git a/path b/path"];

/// JSON shape for the `info` command.
#[derive(serde::Serialize)]
struct InfoReport {
    version: &'static str,
    os: &'static str,
    format: &'static str,
    suffix_formats: &'static [&'static str],
    diff_headers: &'static [&'static str],
}

/// Output a reference document: version, active config, supported formats.
///
/// # Errors
///
/// Returns `Error::Json` if JSON encoding fails.
pub fn info(config: &Config, format: OutputFormat) -> Result<(), Error> {
    let version = env!("CARGO_PKG_VERSION");
    if format == OutputFormat::Json {
        let report = InfoReport {
            version,
            os: os_name(config.os),
            format: format_name(config.format),
            suffix_formats: SUFFIX_FORMAT_EXAMPLES,
            diff_headers: DIFF_HEADER_EXAMPLES,
        };
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    println!("# termlinks {version}");
    println!();
    println!("## Configuration");
    println!();
    println!("- os: {}", os_name(config.os));
    println!("- format: {}", format_name(config.format));
    println!();
    println!("## Suffix formats");
    println!();
    for example in SUFFIX_FORMAT_EXAMPLES {
        println!("- {example}");
    }
    println!();
    println!("## Diff headers");
    println!();
    for example in DIFF_HEADER_EXAMPLES {
        println!("- {example}");
    }
    Ok(())
}

/// Config-file spelling of an OS flavor.
fn os_name(os: OperatingSystem) -> &'static str {
    match os {
        OperatingSystem::Windows => "windows",
        OperatingSystem::NonWindows => "unix",
    }
}

/// Config-file spelling of an output format.
fn format_name(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "text",
        OutputFormat::Json => "json",
    }
}
