//! Output formatting for diff results.
//!
//! This module handles formatting diff results as a report (terminal with
//! colors, JSON, plain text). The annotated markup preview lives in
//! [`crate::preview`].
//!
//! # Examples
//!
//! ```
//! use hdiff_rs::{diff, format_diff, OutputFormat, OutputOptions};
//!
//! let result = diff("<p class=\"a\">x</p>", "<p class=\"b\">x</p>");
//!
//! let output = format_diff(&result, &OutputFormat::Plain, &OutputOptions::default()).unwrap();
//! assert!(output.contains("@class"));
//! ```

use crate::diff::{DiffResult, DiffStats, Difference};
use crate::error::OutputError;
use crate::path::NodePath;
use crate::text::{Segment, SegmentKind};
use crate::tree::Node;
use colored::*;
use serde::Serialize;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored terminal output with ANSI escape codes
    Terminal,
    /// JSON representation of the diff
    Json,
    /// Plain text, no colors (suitable for piping)
    Plain,
}

/// Options for controlling output formatting.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Show full node markup instead of previews for added and removed nodes
    pub show_values: bool,
    /// Maximum length for displayed values (truncate if longer)
    pub max_value_length: usize,
    /// Print unchanged runs of changed text; when false they are elided as `...`
    pub show_unchanged_text: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            show_values: false,
            max_value_length: 80,
            show_unchanged_text: true,
        }
    }
}

/// Stand-in for an unchanged run when unchanged text is hidden.
const ELIDED: &str = "...";

/// Style used for one kind of report line.
#[derive(Clone, Copy)]
enum Style {
    Colored,
    Plain,
}

/// Formats a diff according to the specified format and options.
///
/// # Errors
///
/// Returns `OutputError::JsonSerializationError` if JSON output cannot be produced.
pub fn format_diff(
    diff: &DiffResult,
    format: &OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Terminal => Ok(format_report(diff, options, Style::Colored)),
        OutputFormat::Json => format_json(diff),
        OutputFormat::Plain => Ok(format_report(diff, options, Style::Plain)),
    }
}

/// Formats a diff as one line per difference followed by a summary.
///
/// Color scheme in terminal style:
/// - Added / inserted: green
/// - Removed / deleted: red
/// - Changed: yellow
fn format_report(diff: &DiffResult, options: &OutputOptions, style: Style) -> String {
    if diff.is_empty() {
        return match style {
            Style::Colored => "No changes detected.".dimmed().to_string(),
            Style::Plain => "No changes detected.".to_string(),
        };
    }

    let mut output = String::new();
    for difference in &diff.differences {
        output.push_str(&format_difference(difference, options, style));
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format_summary(&diff.stats()));
    output
}

/// Formats a single difference.
fn format_difference(difference: &Difference, options: &OutputOptions, style: Style) -> String {
    let path = format_path(difference.path());

    let (symbol, body) = match difference {
        Difference::Added { node, .. } => ('+', format!("{}: {}", path, format_node(node, options))),
        Difference::Removed { node, .. } => {
            ('-', format!("{}: {}", path, format_node(node, options)))
        }
        Difference::Changed {
            old_tag, new_tag, ..
        } => ('•', format!("{}: <{}> → <{}>", path, old_tag, new_tag)),
        Difference::AttributeAdded { name, value, .. } => {
            ('+', format!("{} @{}: \"{}\"", path, name, value))
        }
        Difference::AttributeRemoved { name, value, .. } => {
            ('-', format!("{} @{}: \"{}\"", path, name, value))
        }
        Difference::AttributeChanged {
            name,
            old_value,
            new_value,
            ..
        } => (
            '•',
            format!("{} @{}: \"{}\" → \"{}\"", path, name, old_value, new_value),
        ),
        Difference::Text { segments, .. } => {
            let symbol = '~';
            return match style {
                Style::Colored => format!(
                    "{} {}: {}",
                    symbol.to_string().bright_cyan(),
                    path.cyan(),
                    format_segments_colored(segments, options.show_unchanged_text)
                ),
                Style::Plain => format!(
                    "{} {}: {}",
                    symbol,
                    path,
                    format_segments_plain(segments, options.show_unchanged_text)
                ),
            };
        }
    };

    match style {
        Style::Plain => format!("{} {}", symbol, body),
        Style::Colored => match symbol {
            '+' => format!("{} {}", "+".bright_green(), body.green()),
            '-' => format!("{} {}", "-".bright_red(), body.red()),
            _ => format!("{} {}", "•".bright_yellow(), body.yellow()),
        },
    }
}

/// Renders text segments wdiff-style: `[-removed-]{+inserted+}`.
fn format_segments_plain(segments: &[Segment], show_unchanged: bool) -> String {
    segments
        .iter()
        .map(|segment| match segment.kind {
            SegmentKind::Unchanged if !show_unchanged => ELIDED.to_string(),
            SegmentKind::Unchanged => segment.text.clone(),
            SegmentKind::Inserted => format!("{{+{}+}}", segment.text),
            SegmentKind::Deleted => format!("[-{}-]", segment.text),
        })
        .collect()
}

fn format_segments_colored(segments: &[Segment], show_unchanged: bool) -> String {
    segments
        .iter()
        .map(|segment| match segment.kind {
            SegmentKind::Unchanged if !show_unchanged => ELIDED.dimmed().to_string(),
            SegmentKind::Unchanged => segment.text.normal().to_string(),
            SegmentKind::Inserted => segment.text.green().underline().to_string(),
            SegmentKind::Deleted => segment.text.red().strikethrough().to_string(),
        })
        .collect()
}

/// Converts a path to a readable string.
///
/// - `None` → `"(text)"` (flat-text comparison)
/// - root → `"(root)"`
/// - otherwise the slash-separated indices, e.g. `"0/2/1"`
fn format_path(path: Option<&NodePath>) -> String {
    match path {
        None => "(text)".to_string(),
        Some(path) if path.is_root() => "(root)".to_string(),
        Some(path) => path.to_string(),
    }
}

fn format_node(node: &Node, options: &OutputOptions) -> String {
    if options.show_values {
        node.to_markup()
    } else {
        node.preview(options.max_value_length)
    }
}

/// Formats summary statistics.
fn format_summary(stats: &DiffStats) -> String {
    if stats.is_empty() {
        return "Summary: No changes".to_string();
    }

    let mut parts = Vec::new();
    if stats.added > 0 {
        parts.push(format!("{} added", stats.added));
    }
    if stats.removed > 0 {
        parts.push(format!("{} removed", stats.removed));
    }
    if stats.changed > 0 {
        parts.push(format!("{} changed", stats.changed));
    }
    if stats.attributes > 0 {
        parts.push(format!("{} attribute", stats.attributes));
    }
    if stats.text > 0 {
        parts.push(format!("{} text", stats.text));
    }

    format!("Summary: {}", parts.join(", "))
}

#[derive(Serialize)]
struct JsonReport<'a> {
    changed: bool,
    differences: &'a [Difference],
    stats: DiffStats,
}

/// Formats a diff as JSON: `{ "changed", "differences", "stats" }`.
fn format_json(diff: &DiffResult) -> Result<String, OutputError> {
    let report = JsonReport {
        changed: diff.changed,
        differences: &diff.differences,
        stats: diff.stats(),
    };

    serde_json::to_string_pretty(&report)
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}
