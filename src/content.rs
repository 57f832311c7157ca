//! Content-type routing.
//!
//! Decides whether a pair of inputs is compared as markup trees or as flat
//! text, then runs the matching differ.

use crate::diff::{compute_diff, DiffConfig, DiffResult};
use crate::parser::{normalize_markup, parse_html};
use crate::text::diff_text;
use crate::tree::Node;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*<[A-Za-z!].*>").expect("valid markup regex"));

/// How a pair of inputs is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Parse both sides and compare the trees
    Html,
    /// Compare both sides as flat character sequences
    Text,
}

/// The outcome of a routed comparison.
///
/// `new_tree` holds the parsed new side when markup was compared and something
/// changed, so a preview can be rendered without parsing again.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub kind: ContentKind,
    pub result: DiffResult,
    pub new_tree: Option<Node>,
}

/// Returns true when the string starts with a tag and contains a closing `>`.
pub fn looks_like_markup(content: &str) -> bool {
    MARKUP.is_match(content)
}

/// Markup wins if either side looks like it.
pub fn detect_content_kind(old: &str, new: &str) -> ContentKind {
    if looks_like_markup(old) || looks_like_markup(new) {
        ContentKind::Html
    } else {
        ContentKind::Text
    }
}

/// Compares two raw inputs, routing on their content kind.
pub fn compare(old: &str, new: &str, config: &DiffConfig) -> DiffResult {
    compare_detailed(old, new, config).result
}

/// Like [`compare`], keeping the routing decision and the parsed new tree.
pub fn compare_detailed(old: &str, new: &str, config: &DiffConfig) -> Comparison {
    let kind = config
        .content_kind
        .unwrap_or_else(|| detect_content_kind(old, new));
    debug!(?kind, forced = config.content_kind.is_some(), "routing comparison");

    match kind {
        ContentKind::Text => Comparison {
            kind,
            result: diff_text(old, new),
            new_tree: None,
        },
        ContentKind::Html => {
            let (old, new) = if config.normalize_whitespace {
                (normalize_markup(old), normalize_markup(new))
            } else {
                (old.to_string(), new.to_string())
            };

            if old == new {
                return Comparison {
                    kind,
                    result: DiffResult::unchanged(),
                    new_tree: None,
                };
            }

            let old_tree = parse_html(&old);
            let new_tree = parse_html(&new);
            let result = compute_diff(&old_tree, &new_tree, config);
            Comparison {
                kind,
                new_tree: result.changed.then_some(new_tree),
                result,
            }
        }
    }
}
