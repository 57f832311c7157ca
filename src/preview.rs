//! Annotated preview rendering.
//!
//! Re-walks the new document tree, deriving each node's path exactly as the
//! tree differ does, and serializes it back to markup with changes inlined:
//! changed text runs are wrapped in `<ins>`, `<del>` and `<span>` elements and,
//! optionally, elements with structural changes get a `data-diff` marker.
//!
//! # Examples
//!
//! ```
//! use hdiff_rs::render_preview;
//!
//! let html = render_preview("<p>cat</p>", "<p>cart</p>");
//! assert!(html.starts_with("<div class=\"diff-preview\">"));
//! assert!(html.contains("<ins class=\"diff-inserted\">r</ins>"));
//! ```

use crate::content::{Comparison, ContentKind};
use crate::diff::{DiffResult, Difference};
use crate::error::HdiffError;
use crate::path::NodePath;
use crate::text::{Segment, SegmentKind};
use crate::tree::{
    close_tag, escape_attribute, escape_text, is_void_element, open_tag, Attribute, Node,
};
use std::collections::HashMap;

/// Attribute carrying structural markers on annotated elements.
pub const MARKER_ATTRIBUTE: &str = "data-diff";

/// Options for controlling preview markup.
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Tag wrapping the whole preview
    pub container_tag: String,
    /// Class set on the container
    pub container_class: String,
    /// Tag wrapping inserted text runs
    pub inserted_tag: String,
    /// Tag wrapping removed text runs
    pub removed_tag: String,
    /// Tag wrapping unchanged runs of a changed text node
    pub unchanged_tag: String,
    /// Prefix for the `inserted`, `removed` and `unchanged` run classes
    pub class_prefix: String,
    /// Add a `data-diff` attribute to elements with structural changes
    pub mark_structural: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            container_tag: "div".to_string(),
            container_class: "diff-preview".to_string(),
            inserted_tag: "ins".to_string(),
            removed_tag: "del".to_string(),
            unchanged_tag: "span".to_string(),
            class_prefix: "diff-".to_string(),
            mark_structural: true,
        }
    }
}

impl PreviewOptions {
    /// Checks that every configured tag name is a plain ASCII tag name.
    pub fn validate(&self) -> Result<(), HdiffError> {
        let tags = [
            ("container", &self.container_tag),
            ("inserted", &self.inserted_tag),
            ("removed", &self.removed_tag),
            ("unchanged", &self.unchanged_tag),
        ];
        for (role, tag) in tags {
            let valid = tag.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
            if !valid {
                return Err(HdiffError::ConfigError {
                    message: format!("invalid {} tag name: {:?}", role, tag),
                });
            }
        }
        Ok(())
    }

    fn open_container(&self) -> String {
        format!(
            "<{} class=\"{}\">",
            self.container_tag,
            escape_attribute(&self.container_class)
        )
    }

    fn wrap(&self, inner: &str) -> String {
        format!(
            "{}{}{}",
            self.open_container(),
            inner,
            close_tag(&self.container_tag)
        )
    }

    fn render_segment(&self, segment: &Segment) -> String {
        let (tag, class) = match segment.kind {
            SegmentKind::Inserted => (&self.inserted_tag, "inserted"),
            SegmentKind::Deleted => (&self.removed_tag, "removed"),
            SegmentKind::Unchanged => (&self.unchanged_tag, "unchanged"),
        };
        format!(
            "<{} class=\"{}{}\">{}</{}>",
            tag,
            escape_attribute(&self.class_prefix),
            class,
            escape_text(&segment.text),
            tag
        )
    }
}

/// What the renderer knows about one path of the new tree.
#[derive(Debug, Default)]
struct Annotations<'a> {
    segments: Option<&'a [Segment]>,
    added: bool,
    markers: Vec<&'static str>,
}

/// Renders a routed comparison after checking the options.
///
/// # Errors
///
/// Returns `HdiffError::ConfigError` if a configured tag name is not a plain
/// tag name.
pub fn render_comparison(
    comparison: &Comparison,
    old_content: &str,
    options: &PreviewOptions,
) -> Result<String, HdiffError> {
    options.validate()?;
    Ok(render_routed(comparison, old_content, options))
}

/// Picks the renderer for the comparison's content kind. Options are trusted.
pub(crate) fn render_routed(
    comparison: &Comparison,
    old_content: &str,
    options: &PreviewOptions,
) -> String {
    match (comparison.kind, &comparison.new_tree) {
        (ContentKind::Text, _) => render_text(&comparison.result, old_content, options),
        (ContentKind::Html, Some(new_tree)) => {
            render(&comparison.result, old_content, new_tree, options)
        }
        (ContentKind::Html, None) => render_unchanged(old_content, options),
    }
}

/// Renders the new tree with the differences of `result` inlined.
///
/// Options are not validated here; see [`render_comparison`].
///
/// Unchanged results short-circuit: the old content is returned verbatim inside
/// the container, without parsing or annotating anything.
pub fn render(
    result: &DiffResult,
    old_content: &str,
    new_root: &Node,
    options: &PreviewOptions,
) -> String {
    if !result.changed {
        return options.wrap(old_content);
    }

    let lookup = build_lookup(result);
    let mut out = String::new();
    render_node(new_root, &NodePath::root(), &lookup, options, &mut out);
    options.wrap(&out)
}

/// Wraps the old content, untouched, in the preview container.
pub fn render_unchanged(old_content: &str, options: &PreviewOptions) -> String {
    options.wrap(old_content)
}

/// Renders a flat-text comparison as a sequence of annotated runs.
pub fn render_text(result: &DiffResult, old_content: &str, options: &PreviewOptions) -> String {
    let segments = result.differences.iter().find_map(|d| match d {
        Difference::Text {
            path: None,
            segments,
        } => Some(segments),
        _ => None,
    });

    match segments {
        Some(segments) if result.changed => {
            let inner: String = segments.iter().map(|s| options.render_segment(s)).collect();
            options.wrap(&inner)
        }
        _ => options.wrap(old_content),
    }
}

fn build_lookup(result: &DiffResult) -> HashMap<&NodePath, Annotations<'_>> {
    let mut lookup: HashMap<&NodePath, Annotations<'_>> = HashMap::new();

    for difference in &result.differences {
        let Some(path) = difference.path() else {
            continue;
        };
        let marker = match difference {
            Difference::Text { segments, .. } => {
                lookup.entry(path).or_default().segments = Some(segments.as_slice());
                continue;
            }
            // Removed nodes have no position in the new tree.
            Difference::Removed { .. } => continue,
            Difference::Added { .. } => {
                lookup.entry(path).or_default().added = true;
                "added"
            }
            Difference::Changed { .. } => "changed",
            Difference::AttributeAdded { .. } => "attribute-added",
            Difference::AttributeRemoved { .. } => "attribute-removed",
            Difference::AttributeChanged { .. } => "attribute-changed",
        };

        let markers = &mut lookup.entry(path).or_default().markers;
        if !markers.contains(&marker) {
            markers.push(marker);
        }
    }

    lookup
}

fn render_node(
    node: &Node,
    path: &NodePath,
    lookup: &HashMap<&NodePath, Annotations<'_>>,
    options: &PreviewOptions,
    out: &mut String,
) {
    let annotations = lookup.get(path);

    match node {
        Node::Document { children } => {
            for (i, child) in children.iter().enumerate() {
                render_node(child, &path.child(i), lookup, options, out);
            }
        }
        Node::Element {
            tag_name,
            attributes,
            children,
        } => {
            let markers = annotations
                .filter(|_| options.mark_structural)
                .map(|a| a.markers.join(" "))
                .filter(|m| !m.is_empty());

            match markers {
                Some(markers) => {
                    let mut attributes = attributes.clone();
                    attributes.push(Attribute::new(MARKER_ATTRIBUTE, markers));
                    out.push_str(&open_tag(tag_name, &attributes));
                }
                None => out.push_str(&open_tag(tag_name, attributes)),
            }

            if is_void_element(tag_name) {
                return;
            }
            for (i, child) in children.iter().enumerate() {
                render_node(child, &path.child(i), lookup, options, out);
            }
            out.push_str(&close_tag(tag_name));
        }
        Node::Text { value } => match annotations {
            Some(Annotations {
                segments: Some(segments),
                ..
            }) => {
                // Segments cover the trimmed value; keep the surrounding whitespace.
                let trimmed = value.trim();
                let leading = &value[..value.len() - value.trim_start().len()];
                let trailing = &value[leading.len() + trimmed.len()..];
                out.push_str(&escape_text(leading));
                for segment in segments.iter() {
                    out.push_str(&options.render_segment(segment));
                }
                out.push_str(&escape_text(trailing));
            }
            Some(Annotations { added: true, .. }) => {
                let segment = Segment::new(SegmentKind::Inserted, value.as_str());
                out.push_str(&options.render_segment(&segment));
            }
            _ => out.push_str(&escape_text(value)),
        },
    }
}
