//! Markup parsing into our document tree.
//!
//! HTML is parsed with html5ever, which recovers from malformed input the way
//! browsers do, so parsing never fails: any string yields some tree. Comments,
//! doctypes and processing instructions are dropped; only document, element and
//! text nodes are kept.
//!
//! # Examples
//!
//! ```
//! use hdiff_rs::parser::parse_html;
//!
//! let root = parse_html("<p class=\"lead\">Hello</p>");
//! let p = &root.children()[0];
//! assert_eq!(p.tag_name(), Some("p"));
//! assert_eq!(p.attribute("class"), Some("lead"));
//! ```

use crate::error::ParseError;
use crate::tree::{Attribute, Node};
use html5ever::tendril::TendrilSink;
use html5ever::{local_name, namespace_url, ns, parse_document, parse_fragment, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static INTER_TAG_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s+<").expect("valid inter-tag whitespace regex"));

/// Parses markup into a document tree.
///
/// Input that starts with a doctype or an `<html>` tag is parsed as a full
/// document, so the root's only element child is `html`. Anything else is parsed
/// as a body fragment and the root's children are the fragment's top-level
/// nodes.
pub fn parse_html(markup: &str) -> Node {
    if is_full_document(markup) {
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(markup);
        Node::document(convert_children(&dom.document))
    } else {
        let context = QualName::new(None, ns!(html), local_name!("body"));
        let dom = parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new())
            .one(markup);
        Node::document(fragment_children(&dom.document))
    }
}

/// Collapses whitespace between tags and trims the input.
///
/// Applied to both sides before parsing so that indentation and line breaks
/// between elements do not show up as text differences.
pub fn normalize_markup(markup: &str) -> String {
    INTER_TAG_WHITESPACE
        .replace_all(markup.trim(), "><")
        .into_owned()
}

/// Reads a file into a string.
///
/// # Errors
///
/// - `ParseError::FileNotFound` if the path does not exist
/// - `ParseError::ReadError` if the file cannot be read as UTF-8
pub fn read_content(path: &Path) -> Result<String, ParseError> {
    if !path.exists() {
        return Err(ParseError::file_not_found(
            path.to_string_lossy().to_string(),
        ));
    }

    fs::read_to_string(path)
        .map_err(|e| ParseError::read_error(path.to_string_lossy().to_string(), e))
}

fn is_full_document(markup: &str) -> bool {
    let head: String = markup
        .trim_start()
        .chars()
        .take(9)
        .collect::<String>()
        .to_ascii_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html")
}

/// Fragment parsing wraps the result in a synthetic `<html>` element.
fn fragment_children(document: &Handle) -> Vec<Node> {
    document
        .children
        .borrow()
        .iter()
        .flat_map(convert_children)
        .collect()
}

fn convert_children(handle: &Handle) -> Vec<Node> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(convert_node)
        .collect()
}

fn convert_node(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Document => Some(Node::document(convert_children(handle))),
        NodeData::Element { name, attrs, .. } => {
            let attributes = attrs
                .borrow()
                .iter()
                .map(|attr| Attribute::new(attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            Some(Node::element(
                name.local.to_string(),
                attributes,
                convert_children(handle),
            ))
        }
        NodeData::Text { contents } => Some(Node::text(contents.borrow().to_string())),
        _ => None,
    }
}
