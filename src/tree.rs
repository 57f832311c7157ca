//! Document tree representation for parsed markup.

use serde::Serialize;

/// Elements that never carry children or a closing tag when serialized.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// A single `name="value"` pair on an element, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A node in a parsed document tree.
///
/// Each tree is owned by the comparison call that parsed it; old and new trees
/// never share nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Node {
    Document {
        children: Vec<Node>,
    },
    Element {
        #[serde(rename = "tagName")]
        tag_name: String,
        attributes: Vec<Attribute>,
        children: Vec<Node>,
    },
    Text {
        value: String,
    },
}

impl Node {
    pub fn document(children: Vec<Node>) -> Self {
        Node::Document { children }
    }

    pub fn element(
        tag_name: impl Into<String>,
        attributes: Vec<Attribute>,
        children: Vec<Node>,
    ) -> Self {
        Node::Element {
            tag_name: tag_name.into(),
            attributes,
            children,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Node::Document { .. } => "document",
            Node::Element { .. } => "element",
            Node::Text { .. } => "text",
        }
    }

    /// DOM-style node name: the tag for elements, `#text` and `#document` otherwise.
    pub fn node_name(&self) -> &str {
        match self {
            Node::Document { .. } => "#document",
            Node::Element { tag_name, .. } => tag_name,
            Node::Text { .. } => "#text",
        }
    }

    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Node::Element { tag_name, .. } => Some(tag_name),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text { .. })
    }

    pub fn text_value(&self) -> Option<&str> {
        match self {
            Node::Text { value } => Some(value),
            _ => None,
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Node::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes()
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Child nodes in document order. Text nodes have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children } | Node::Element { children, .. } => children,
            Node::Text { .. } => &[],
        }
    }

    /// Serializes the subtree back to markup.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        match self {
            Node::Document { children } => {
                for child in children {
                    child.write_markup(out);
                }
            }
            Node::Element {
                tag_name,
                attributes,
                children,
            } => {
                out.push_str(&open_tag(tag_name, attributes));
                if is_void_element(tag_name) {
                    return;
                }
                for child in children {
                    child.write_markup(out);
                }
                out.push_str(&close_tag(tag_name));
            }
            Node::Text { value } => out.push_str(&escape_text(value)),
        }
    }

    /// Returns a short preview of the node, truncated to max_len characters.
    pub fn preview(&self, max_len: usize) -> String {
        let preview = match self {
            Node::Text { value } => format!("\"{}\"", value.trim()),
            _ => self.to_markup(),
        };

        if preview.chars().count() > max_len {
            let kept: String = preview.chars().take(max_len.saturating_sub(3)).collect();
            format!("{}...", kept)
        } else {
            preview
        }
    }
}

pub(crate) fn is_void_element(tag_name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(tag_name))
}

pub(crate) fn open_tag(tag_name: &str, attributes: &[Attribute]) -> String {
    let mut out = format!("<{}", tag_name);
    for attr in attributes {
        out.push_str(&format!(" {}=\"{}\"", attr.name, escape_attribute(&attr.value)));
    }
    out.push('>');
    out
}

pub(crate) fn close_tag(tag_name: &str) -> String {
    format!("</{}>", tag_name)
}

pub(crate) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::document(vec![Node::element(
            "p",
            vec![Attribute::new("class", "lead")],
            vec![
                Node::text("a < b"),
                Node::element("br", vec![], vec![]),
                Node::text("done"),
            ],
        )])
    }

    #[test]
    fn test_node_names() {
        assert_eq!(Node::document(vec![]).node_name(), "#document");
        assert_eq!(Node::text("x").node_name(), "#text");
        assert_eq!(Node::element("td", vec![], vec![]).node_name(), "td");
        assert_eq!(Node::text("x").tag_name(), None);
    }

    #[test]
    fn test_to_markup_escapes_and_skips_void_close() {
        assert_eq!(
            sample().to_markup(),
            r#"<p class="lead">a &lt; b<br>done</p>"#
        );
    }

    #[test]
    fn test_attribute_escaping() {
        let node = Node::element("a", vec![Attribute::new("title", "say \"hi\"")], vec![]);
        assert_eq!(node.to_markup(), "<a title=\"say &quot;hi&quot;\"></a>");
    }

    #[test]
    fn test_attribute_lookup() {
        let root = sample();
        let p = &root.children()[0];
        assert_eq!(p.attribute("class"), Some("lead"));
        assert_eq!(p.attribute("id"), None);
        assert_eq!(p.children().len(), 3);
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let node = Node::text("héllo wörld, this is long");
        let preview = node.preview(10);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 10);
    }
}
