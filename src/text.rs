//! Character-level text comparison.
//!
//! Wraps the `similar` character diff and folds its per-character changes into
//! runs of equal kind, so `"abc" -> "abd"` yields `[unchanged "ab", deleted "c",
//! inserted "d"]` rather than one entry per character.

use crate::diff::{DiffResult, Difference};
use serde::Serialize;
use similar::{ChangeTag, TextDiff};

/// How a run of characters relates the old text to the new text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentKind {
    /// Present in both texts
    Unchanged,
    /// Present only in the new text
    Inserted,
    /// Present only in the old text
    Deleted,
}

impl From<ChangeTag> for SegmentKind {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Equal => SegmentKind::Unchanged,
            ChangeTag::Insert => SegmentKind::Inserted,
            ChangeTag::Delete => SegmentKind::Deleted,
        }
    }
}

/// One run of a character diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

impl Segment {
    pub fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn is_change(&self) -> bool {
        self.kind != SegmentKind::Unchanged
    }
}

/// Computes the character diff between two strings as a list of segments.
///
/// Adjacent characters with the same kind are merged into a single segment.
pub fn diff_chars(old: &str, new: &str) -> Vec<Segment> {
    let diff = TextDiff::from_chars(old, new);
    let mut segments: Vec<Segment> = Vec::new();

    for change in diff.iter_all_changes() {
        let kind = SegmentKind::from(change.tag());
        match segments.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(change.value()),
            _ => segments.push(Segment::new(kind, change.value())),
        }
    }

    segments
}

/// Compares two flat strings.
///
/// Identical input short-circuits to an unchanged result. Otherwise the whole
/// comparison is reported as a single text difference with no path.
pub fn diff_text(old: &str, new: &str) -> DiffResult {
    if old == new {
        return DiffResult::unchanged();
    }

    let segments = diff_chars(old, new);
    if !segments.iter().any(Segment::is_change) {
        return DiffResult::unchanged();
    }

    DiffResult::from_differences(vec![Difference::Text {
        path: None,
        segments,
    }])
}

/// Reassembles the old text from a segment list (unchanged + deleted runs).
pub fn old_text(segments: &[Segment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != SegmentKind::Inserted)
        .map(|s| s.text.as_str())
        .collect()
}

/// Reassembles the new text from a segment list (unchanged + inserted runs).
pub fn new_text(segments: &[Segment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != SegmentKind::Deleted)
        .map(|s| s.text.as_str())
        .collect()
}
