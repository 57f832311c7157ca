//! Core tree diff algorithm.
//!
//! This module walks two parsed document trees in lockstep and reports every
//! node-level difference, addressed by its positional [`NodePath`]. Children are
//! matched by index: the node at `0/2` in the old tree is compared against the
//! node at `0/2` in the new tree, whatever its content.
//!
//! # Examples
//!
//! ```
//! use hdiff_rs::{compute_diff, Attribute, DiffConfig, Difference, Node};
//!
//! let old = Node::document(vec![Node::element("p", vec![Attribute::new("class", "a")], vec![])]);
//! let new = Node::document(vec![Node::element("p", vec![Attribute::new("class", "b")], vec![])]);
//!
//! let diff = compute_diff(&old, &new, &DiffConfig::default());
//!
//! assert!(diff.changed);
//! assert!(matches!(diff.differences[0], Difference::AttributeChanged { .. }));
//! ```

use crate::content::ContentKind;
use crate::path::NodePath;
use crate::text::{diff_chars, Segment};
use crate::tree::{Attribute, Node};
use serde::Serialize;
use tracing::{debug, trace};

/// Whether a difference concerns tree shape or text content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifferenceCategory {
    /// Node presence, tag identity or attributes
    Structural,
    /// Character-level change inside a text node
    Textual,
}

/// A single reported change.
///
/// Every variant except flat-text comparisons carries the path of the node it
/// refers to. Added and removed nodes carry their whole subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Difference {
    /// Node exists only in the new tree
    Added { path: NodePath, node: Node },
    /// Node exists only in the old tree
    Removed { path: NodePath, node: Node },
    /// Node exists in both trees but under a different name
    Changed {
        path: NodePath,
        old_tag: String,
        new_tag: String,
    },
    AttributeAdded {
        path: NodePath,
        name: String,
        value: String,
    },
    AttributeRemoved {
        path: NodePath,
        name: String,
        value: String,
    },
    AttributeChanged {
        path: NodePath,
        name: String,
        old_value: String,
        new_value: String,
    },
    /// Character diff of a text node, or of the whole input in flat-text mode
    Text {
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<NodePath>,
        segments: Vec<Segment>,
    },
}

impl Difference {
    /// The path this difference is recorded at, if any.
    pub fn path(&self) -> Option<&NodePath> {
        match self {
            Difference::Added { path, .. }
            | Difference::Removed { path, .. }
            | Difference::Changed { path, .. }
            | Difference::AttributeAdded { path, .. }
            | Difference::AttributeRemoved { path, .. }
            | Difference::AttributeChanged { path, .. } => Some(path),
            Difference::Text { path, .. } => path.as_ref(),
        }
    }

    pub fn category(&self) -> DifferenceCategory {
        match self {
            Difference::Text { .. } => DifferenceCategory::Textual,
            _ => DifferenceCategory::Structural,
        }
    }

    pub fn is_structural(&self) -> bool {
        self.category() == DifferenceCategory::Structural
    }

    pub fn is_textual(&self) -> bool {
        self.category() == DifferenceCategory::Textual
    }

    /// The serialized `kind` tag of this difference.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Difference::Added { .. } => "added",
            Difference::Removed { .. } => "removed",
            Difference::Changed { .. } => "changed",
            Difference::AttributeAdded { .. } => "attributeAdded",
            Difference::AttributeRemoved { .. } => "attributeRemoved",
            Difference::AttributeChanged { .. } => "attributeChanged",
            Difference::Text { .. } => "text",
        }
    }
}

/// Statistics about the diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    /// Number of added nodes
    pub added: usize,
    /// Number of removed nodes
    pub removed: usize,
    /// Number of tag name changes
    pub changed: usize,
    /// Number of attribute additions, removals and value changes
    pub attributes: usize,
    /// Number of text differences
    pub text: usize,
}

impl DiffStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_changes(&self) -> usize {
        self.added + self.removed + self.changed + self.attributes + self.text
    }

    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }
}

/// The outcome of one comparison.
///
/// `changed` is true exactly when `differences` is non-empty. Differences are in
/// depth-first document order: a node's own differences precede those of its
/// children, and siblings appear in index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    pub changed: bool,
    pub differences: Vec<Difference>,
}

impl DiffResult {
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            differences: Vec::new(),
        }
    }

    pub fn from_differences(differences: Vec<Difference>) -> Self {
        Self {
            changed: !differences.is_empty(),
            differences,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::new();
        for difference in &self.differences {
            match difference {
                Difference::Added { .. } => stats.added += 1,
                Difference::Removed { .. } => stats.removed += 1,
                Difference::Changed { .. } => stats.changed += 1,
                Difference::AttributeAdded { .. }
                | Difference::AttributeRemoved { .. }
                | Difference::AttributeChanged { .. } => stats.attributes += 1,
                Difference::Text { .. } => stats.text += 1,
            }
        }
        stats
    }

    /// All differences recorded at `path`, in report order.
    pub fn at<'a>(&'a self, path: &'a NodePath) -> impl Iterator<Item = &'a Difference> + 'a {
        self.differences
            .iter()
            .filter(move |d| d.path() == Some(path))
    }

    pub fn structural(&self) -> impl Iterator<Item = &Difference> {
        self.differences.iter().filter(|d| d.is_structural())
    }

    pub fn textual(&self) -> impl Iterator<Item = &Difference> {
        self.differences.iter().filter(|d| d.is_textual())
    }

    /// Partitions the differences into structural and textual lists.
    pub fn flatten(&self) -> FlatDiff {
        let (structural_differences, text_differences) = self
            .differences
            .iter()
            .cloned()
            .partition(Difference::is_structural);
        FlatDiff {
            structural_differences,
            text_differences,
        }
    }
}

impl Default for DiffResult {
    fn default() -> Self {
        Self::unchanged()
    }
}

/// Differences split by category, each list keeping report order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatDiff {
    pub structural_differences: Vec<Difference>,
    pub text_differences: Vec<Difference>,
}

/// Strategy for pairing up children of two compared nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChildMatching {
    /// Pair children by index position
    #[default]
    Positional,
}

/// Configuration for a comparison.
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Collapse whitespace between tags and trim input before parsing
    pub normalize_whitespace: bool,
    /// Child pairing strategy
    pub child_matching: ChildMatching,
    /// Force markup or flat-text comparison instead of sniffing the input
    pub content_kind: Option<ContentKind>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            normalize_whitespace: true,
            child_matching: ChildMatching::Positional,
            content_kind: None,
        }
    }
}

/// Computes the tree diff between two parsed documents.
///
/// # Examples
///
/// ```
/// use hdiff_rs::{compute_diff, DiffConfig, Node};
///
/// let old = Node::document(vec![Node::element("td", vec![], vec![])]);
/// let new = Node::document(vec![Node::element("th", vec![], vec![])]);
/// let diff = compute_diff(&old, &new, &DiffConfig::default());
///
/// assert_eq!(diff.stats().changed, 1);
/// ```
pub fn compute_diff(old: &Node, new: &Node, config: &DiffConfig) -> DiffResult {
    let mut differences = Vec::new();
    diff_nodes(
        Some(old),
        Some(new),
        &NodePath::root(),
        &mut differences,
        config,
    );

    debug!(differences = differences.len(), "tree comparison finished");
    DiffResult::from_differences(differences)
}

/// Compares the nodes found at `path` in each tree and recurses into children.
///
/// Either side may be absent when one parent has fewer children than the other.
/// An absent side ends the descent: the present node is reported once, with its
/// whole subtree.
fn diff_nodes(
    old: Option<&Node>,
    new: Option<&Node>,
    path: &NodePath,
    differences: &mut Vec<Difference>,
    config: &DiffConfig,
) {
    let (old, new) = match (old, new) {
        (None, None) => return,
        (Some(old), None) => {
            trace!(%path, "removed {}", old.node_name());
            differences.push(Difference::Removed {
                path: path.clone(),
                node: old.clone(),
            });
            return;
        }
        (None, Some(new)) => {
            trace!(%path, "added {}", new.node_name());
            differences.push(Difference::Added {
                path: path.clone(),
                node: new.clone(),
            });
            return;
        }
        (Some(old), Some(new)) => (old, new),
    };

    // A tag mismatch is reported but the comparison carries on below it.
    if !(old.is_text() && new.is_text()) && old.node_name() != new.node_name() {
        trace!(%path, old = old.node_name(), new = new.node_name(), "tag changed");
        differences.push(Difference::Changed {
            path: path.clone(),
            old_tag: old.node_name().to_string(),
            new_tag: new.node_name().to_string(),
        });
    }

    if let (Some(old_text), Some(new_text)) = (old.text_value(), new.text_value()) {
        let old_text = old_text.trim();
        let new_text = new_text.trim();
        if old_text != new_text {
            trace!(%path, "text changed");
            differences.push(Difference::Text {
                path: Some(path.clone()),
                segments: diff_chars(old_text, new_text),
            });
        }
    }

    if let (Node::Element { .. }, Node::Element { .. }) = (old, new) {
        diff_attributes(old.attributes(), new.attributes(), path, differences);
    }

    diff_children(old.children(), new.children(), path, differences, config);
}

/// Compares attribute lists by name.
///
/// Old attributes are visited first, in source order, reporting removals and
/// value changes; then new-only attributes are reported in their source order.
fn diff_attributes(
    old_attrs: &[Attribute],
    new_attrs: &[Attribute],
    path: &NodePath,
    differences: &mut Vec<Difference>,
) {
    let find = |attrs: &[Attribute], name: &str| -> Option<usize> {
        attrs.iter().position(|attr| attr.name == name)
    };

    for old_attr in old_attrs {
        match find(new_attrs, &old_attr.name) {
            None => differences.push(Difference::AttributeRemoved {
                path: path.clone(),
                name: old_attr.name.clone(),
                value: old_attr.value.clone(),
            }),
            Some(i) if new_attrs[i].value != old_attr.value => {
                differences.push(Difference::AttributeChanged {
                    path: path.clone(),
                    name: old_attr.name.clone(),
                    old_value: old_attr.value.clone(),
                    new_value: new_attrs[i].value.clone(),
                })
            }
            Some(_) => {}
        }
    }

    for new_attr in new_attrs {
        if find(old_attrs, &new_attr.name).is_none() {
            differences.push(Difference::AttributeAdded {
                path: path.clone(),
                name: new_attr.name.clone(),
                value: new_attr.value.clone(),
            });
        }
    }
}

/// Compares two child lists using the configured matching strategy.
fn diff_children(
    old_children: &[Node],
    new_children: &[Node],
    path: &NodePath,
    differences: &mut Vec<Difference>,
    config: &DiffConfig,
) {
    match config.child_matching {
        ChildMatching::Positional => {
            let max_len = old_children.len().max(new_children.len());
            for i in 0..max_len {
                diff_nodes(
                    old_children.get(i),
                    new_children.get(i),
                    &path.child(i),
                    differences,
                    config,
                );
            }
        }
    }
}
