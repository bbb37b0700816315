use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use quick_xml::escape::escape;
use serde::Serialize;

/// The kind of a parsed node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Document,
    Element,
    Text,
    CData,
    Comment,
    ProcessingInstruction,
}

/// A node in a parsed XML tree.
///
/// Elements and the document node hold their text through `Text`/`CData`
/// children; every other kind keeps its own text in [`XmlNode::text`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XmlNode {
    /// Node kind.
    pub kind: NodeKind,
    /// Tag name for elements, target for processing instructions, and a
    /// fixed DOM-style name (`document`, `text`, `#cdata-section`, `comment`)
    /// otherwise.
    pub name: String,
    /// XML attributes keyed by name. Rendered but never compared.
    pub attributes: BTreeMap<String, String>,
    /// Child nodes in document order.
    pub children: Vec<XmlNode>,
    /// Own text for non-container nodes.
    pub text: Option<String>,
}

impl XmlNode {
    fn with_kind(kind: NodeKind, name: impl Into<String>, text: Option<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            text,
        }
    }

    /// Create an empty document node.
    pub fn document() -> Self {
        Self::with_kind(NodeKind::Document, "document", None)
    }

    /// Create an element with no attributes or children.
    pub fn element(name: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Element, name, None)
    }

    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Text, "text", Some(text.into()))
    }

    pub fn cdata(text: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::CData, "#cdata-section", Some(text.into()))
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Comment, "comment", Some(text.into()))
    }

    pub fn processing_instruction(target: impl Into<String>, data: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::ProcessingInstruction, target, Some(data.into()))
    }

    /// Append a child and return `self`, for building trees inline.
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set an attribute and return `self`.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// True for elements and the document node.
    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Document | NodeKind::Element)
    }

    /// Return the document's root element, if any.
    pub fn root_element(&self) -> Option<&XmlNode> {
        match self.kind {
            NodeKind::Document => self
                .children
                .iter()
                .find(|child| child.kind == NodeKind::Element),
            NodeKind::Element => Some(self),
            _ => None,
        }
    }

    /// Text content: own text for leaf kinds; for containers, the
    /// concatenated text and CDATA children (not deeper descendants).
    pub fn text_content(&self) -> Cow<'_, str> {
        if !self.is_container() {
            return Cow::Borrowed(self.text.as_deref().unwrap_or_default());
        }

        let mut texts = self
            .children
            .iter()
            .filter(|child| matches!(child.kind, NodeKind::Text | NodeKind::CData))
            .filter_map(|child| child.text.as_deref());

        match (texts.next(), texts.next()) {
            (None, _) => Cow::Borrowed(""),
            (Some(only), None) => Cow::Borrowed(only),
            (Some(first), Some(second)) => {
                let mut out = String::from(first);
                out.push_str(second);
                texts.for_each(|text| out.push_str(text));
                Cow::Owned(out)
            }
        }
    }
}

impl Drop for XmlNode {
    // Flattens the subtree first so deeply nested trees are released without
    // recursing once per level.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Read-only view of a tree node, as needed by the comparator.
pub trait CompareNode {
    /// Node name; compared with exact string equality.
    fn name(&self) -> &str;
    /// Text content; compared after optional whitespace normalization.
    fn content(&self) -> Cow<'_, str>;
    /// Children in document order.
    fn children(&self) -> impl Iterator<Item = &Self>;
    /// True for plain text nodes, the only kind dropped when whitespace-only.
    fn is_text(&self) -> bool;
}

impl CompareNode for XmlNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn content(&self) -> Cow<'_, str> {
        self.text_content()
    }

    fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter()
    }

    fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }
}

impl Display for XmlNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = self.text.as_deref().unwrap_or_default();
        match self.kind {
            NodeKind::Document => self.children.iter().try_for_each(|c| write!(f, "{c}")),
            NodeKind::Text => write!(f, "{}", escape(text)),
            NodeKind::CData => write!(f, "<![CDATA[{text}]]>"),
            NodeKind::Comment => write!(f, "<!--{text}-->"),
            NodeKind::ProcessingInstruction if text.is_empty() => write!(f, "<?{}?>", self.name),
            NodeKind::ProcessingInstruction => write!(f, "<?{} {text}?>", self.name),
            NodeKind::Element => {
                write!(f, "<{}", self.name)?;
                for (key, value) in &self.attributes {
                    write!(f, " {}=\"{}\"", key, escape(value.as_str()))?;
                }

                if self.children.is_empty() {
                    return write!(f, "/>");
                }

                write!(f, ">")?;
                for child in &self.children {
                    write!(f, "{}", child)?;
                }
                write!(f, "</{}>", self.name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CompareNode, XmlNode};

    #[test]
    fn content_joins_own_text_children_only() {
        let root = XmlNode::element("root")
            .with_child(XmlNode::text("a"))
            .with_child(XmlNode::element("b").with_child(XmlNode::text("nested")))
            .with_child(XmlNode::comment("skipped"))
            .with_child(XmlNode::cdata("c"))
            .with_child(XmlNode::text("d"));

        assert_eq!(root.content(), "acd");
        assert_eq!(XmlNode::element("empty").content(), "");
        assert_eq!(XmlNode::comment("note").content(), "note");
    }

    #[test]
    fn deeply_nested_tree_drops_without_overflow() {
        let mut node = XmlNode::element("leaf");
        for _ in 0..200_000 {
            node = XmlNode::element("level").with_child(node);
        }
        drop(node);
    }

    #[test]
    fn display_renders_markup() {
        let node = XmlNode::element("a")
            .with_attribute("id", "1 & 2")
            .with_child(XmlNode::text("x<y"))
            .with_child(XmlNode::element("b"));

        assert_eq!(node.to_string(), "<a id=\"1 &amp; 2\">x&lt;y<b/></a>");
    }

    #[test]
    fn only_plain_text_counts_as_text() {
        assert!(XmlNode::text(" ").is_text());
        assert!(!XmlNode::cdata(" ").is_text());
        assert!(!XmlNode::element("text").is_text());
    }
}
