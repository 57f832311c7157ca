use hdiff_rs::text::{new_text, old_text};
use hdiff_rs::{
    diff, diff_with_config, ContentKind, DiffConfig, Difference, NodePath, SegmentKind,
};
use std::collections::HashSet;

const TABLE_OLD: &str = r#"<table class="old"><tr><td>ello WORLD!</td></tr></table>"#;
const TABLE_NEW: &str = r#"<table class="new"><tr><th>Hello World!</th></tr></table>"#;

fn path(s: &str) -> NodePath {
    s.parse().unwrap()
}

#[test]
fn test_table_scenario() {
    let result = diff(TABLE_OLD, TABLE_NEW);
    assert!(result.changed);

    // table > tbody > tr > td, tbody inserted by the parser
    assert_eq!(
        result.differences[0],
        Difference::AttributeChanged {
            path: path("0"),
            name: "class".to_string(),
            old_value: "old".to_string(),
            new_value: "new".to_string(),
        }
    );
    assert_eq!(
        result.differences[1],
        Difference::Changed {
            path: path("0/0/0/0"),
            old_tag: "td".to_string(),
            new_tag: "th".to_string(),
        }
    );

    match &result.differences[2] {
        Difference::Text {
            path: Some(p),
            segments,
        } => {
            assert_eq!(p, &path("0/0/0/0/0"));
            assert_eq!(segments[0].kind, SegmentKind::Inserted);
            assert_eq!(segments[0].text, "H");
            assert_eq!(segments[1].kind, SegmentKind::Unchanged);
            assert_eq!(segments[1].text, "ello W");
            assert_eq!(old_text(segments), "ello WORLD!");
            assert_eq!(new_text(segments), "Hello World!");
        }
        other => panic!("Expected text difference, got {:?}", other),
    }
    assert_eq!(result.differences.len(), 3);
}

#[test]
fn test_identical_plain_text() {
    let result = diff("hello", "hello");
    assert!(!result.changed);
    assert!(result.differences.is_empty());
}

#[test]
fn test_idempotence() {
    let inputs = [
        "",
        "plain words",
        TABLE_OLD,
        "<div><p>a <b>b</b></p>\n  <img src=\"x.png\"></div>",
        "<!DOCTYPE html><html><head><title>t</title></head><body>x</body></html>",
    ];
    for input in inputs {
        let result = diff(input, input);
        assert!(!result.changed, "{:?} should equal itself", input);
        assert!(result.differences.is_empty());
    }
}

#[test]
fn test_change_detection_is_symmetric() {
    let pairs = [
        (TABLE_OLD, TABLE_NEW),
        ("<p>a</p>", "<p>a</p><p>b</p>"),
        ("abc", "abd"),
        ("<p>x</p>", "<p>  x </p>"),
    ];
    for (a, b) in pairs {
        assert_eq!(diff(a, b).changed, diff(b, a).changed, "{:?} vs {:?}", a, b);
    }
}

#[test]
fn test_paths_are_unique_per_kind() {
    let result = diff(
        r#"<div id="a" class="x"><p>one</p><p>two</p></div><span>s</span>"#,
        r#"<section id="b" title="t"><p>uno</p><h2>two</h2><p>three</p></section>"#,
    );

    let mut seen = HashSet::new();
    for difference in &result.differences {
        let attribute = match difference {
            Difference::AttributeAdded { name, .. }
            | Difference::AttributeRemoved { name, .. }
            | Difference::AttributeChanged { name, .. } => Some(name.clone()),
            _ => None,
        };
        let key = (
            difference.path().map(ToString::to_string),
            difference.kind_name(),
            attribute,
        );
        assert!(seen.insert(key.clone()), "duplicate difference {:?}", key);
    }
}

#[test]
fn test_added_subtree_is_atomic() {
    let result = diff(
        "<ul><li>a</li></ul>",
        "<ul><li>a</li><li><b>deep</b> <i>tree</i></li></ul>",
    );

    assert_eq!(result.differences.len(), 1);
    match &result.differences[0] {
        Difference::Added { path: p, node } => {
            assert_eq!(p, &path("0/1"));
            assert_eq!(node.tag_name(), Some("li"));
            // whitespace between </b> and <i> is collapsed before parsing
            assert_eq!(node.children().len(), 2);
        }
        other => panic!("Expected added difference, got {:?}", other),
    }
}

#[test]
fn test_removed_subtree_is_atomic() {
    let result = diff("<div><p>a</p><p><em>b</em></p></div>", "<div><p>a</p></div>");
    assert_eq!(result.stats().removed, 1);
    assert_eq!(result.differences.len(), 1);
}

#[test]
fn test_text_diff_completeness() {
    let result = diff("<p>  the cat sat </p>", "<p>a cat stood</p>");
    let segments = result
        .textual()
        .find_map(|d| match d {
            Difference::Text { segments, .. } => Some(segments),
            _ => None,
        })
        .expect("text difference");

    assert_eq!(old_text(segments), "the cat sat");
    assert_eq!(new_text(segments), "a cat stood");
}

#[test]
fn test_changed_iff_differences() {
    for (a, b) in [("a", "b"), ("a", "a"), ("<p>a</p>", "<p>b</p>"), ("<p>a</p>", "<p>a</p>")] {
        let result = diff(a, b);
        assert_eq!(result.changed, !result.differences.is_empty());
    }
}

#[test]
fn test_flat_text_has_no_path() {
    let result = diff("version one", "version two");
    assert_eq!(result.differences.len(), 1);
    assert!(result.differences[0].path().is_none());
    assert!(result.differences[0].is_textual());
}

#[test]
fn test_markup_on_one_side_routes_to_tree() {
    let result = diff("just text", "<p>just text</p>");
    assert!(result.changed);
    assert!(result.differences.iter().all(|d| d.path().is_some()));
}

#[test]
fn test_forced_html_mode_on_plain_text() {
    let config = DiffConfig {
        content_kind: Some(ContentKind::Html),
        ..Default::default()
    };
    let result = diff_with_config("one", "two", &config);
    assert_eq!(result.differences.len(), 1);
    assert_eq!(result.differences[0].path(), Some(&path("0")));
}

#[test]
fn test_flatten_view() {
    let flat = diff(TABLE_OLD, TABLE_NEW).flatten();
    assert_eq!(flat.structural_differences.len(), 2);
    assert_eq!(flat.text_differences.len(), 1);
    assert!(flat.structural_differences.iter().all(Difference::is_structural));
}

#[test]
fn test_sibling_insertion_cascades() {
    let result = diff(
        "<p>a</p><p>b</p>",
        "<h1>title</h1><p>a</p><p>b</p>",
    );
    let stats = result.stats();
    assert_eq!(stats.changed, 1);
    assert_eq!(stats.text, 2);
    assert_eq!(stats.added, 1);
}
