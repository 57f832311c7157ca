//! HDIFF - Structural diff for HTML and plain text.
//!
//! This library compares two versions of some content and describes what
//! changed. Markup is parsed into document trees which are compared node by
//! node, reporting added, removed and renamed elements, attribute changes and
//! character-level text changes, each addressed by its position in the tree.
//! Plain text is compared character by character.
//!
//! # Example
//!
//! ```
//! use hdiff_rs::{diff, render_preview, Difference};
//!
//! let old = r#"<table class="old"><tr><td>ello WORLD!</td></tr></table>"#;
//! let new = r#"<table class="new"><tr><th>Hello World!</th></tr></table>"#;
//!
//! let result = diff(old, new);
//! assert!(result.changed);
//! assert!(result
//!     .differences
//!     .iter()
//!     .any(|d| matches!(d, Difference::Changed { old_tag, new_tag, .. } if old_tag == "td" && new_tag == "th")));
//!
//! let preview = render_preview(old, new);
//! assert!(preview.contains("<ins class=\"diff-inserted\">H</ins>"));
//! ```

pub mod content;
pub mod diff;
pub mod error;
pub mod output;
pub mod parser;
pub mod path;
pub mod preview;
pub mod text;
pub mod tree;

// Re-export commonly used types for convenience
pub use content::{compare_detailed, detect_content_kind, looks_like_markup, ContentKind};
pub use diff::{
    compute_diff, ChildMatching, DiffConfig, DiffResult, DiffStats, Difference, DifferenceCategory,
    FlatDiff,
};
pub use error::{HdiffError, OutputError, ParseError};
pub use output::{format_diff, OutputFormat, OutputOptions};
pub use parser::{normalize_markup, parse_html, read_content};
pub use path::NodePath;
pub use preview::PreviewOptions;
pub use text::{diff_chars, diff_text, Segment, SegmentKind};
pub use tree::{Attribute, Node};

/// Compares two pieces of content with the default configuration.
///
/// Markup is compared as trees, anything else as flat text. Identical input,
/// including two empty strings, yields an unchanged result.
pub fn diff(old: &str, new: &str) -> DiffResult {
    diff_with_config(old, new, &DiffConfig::default())
}

pub fn diff_with_config(old: &str, new: &str, config: &DiffConfig) -> DiffResult {
    content::compare(old, new, config)
}

/// Renders the new content with its changes annotated inline.
///
/// The markup is wrapped in a `<div class="diff-preview">` container. When
/// nothing changed, the old content is returned verbatim inside the container.
pub fn render_preview(old: &str, new: &str) -> String {
    let comparison = content::compare_detailed(old, new, &DiffConfig::default());
    preview::render_routed(&comparison, old, &PreviewOptions::default())
}

/// Like [`render_preview`], with explicit comparison and preview options.
///
/// # Errors
///
/// Returns `HdiffError::ConfigError` if the preview options name an invalid tag.
pub fn render_preview_with(
    old: &str,
    new: &str,
    config: &DiffConfig,
    options: &PreviewOptions,
) -> Result<String, HdiffError> {
    let comparison = content::compare_detailed(old, new, config);
    preview::render_comparison(&comparison, old, options)
}
