//! SVG document tree.
//!
//! Nodes live in a flat arena and refer to their parent by index, so walking
//! from a `<path>` up to the document never fights the borrow checker while
//! the same tree is being mutated and serialized.

use std::borrow::Cow;

use quick_xml::escape::{escape, unescape};

/// Index of a node in its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A parsed SVG document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    /// Top-level nodes (declaration, doctype, comments, the root element, ...)
    pub children: Vec<NodeId>,
}

/// A node and its back-reference to the parent element.
#[derive(Debug, Clone)]
pub struct Node {
    /// `None` for top-level nodes, whose parent is the document itself
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

/// Node payloads. Text-like content is kept exactly as written, entities included.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Element(Element),
    Text(String),
    Comment(String),
    CData(String),
    /// Processing instruction body, e.g. `xml-stylesheet href="a.css"`
    ProcessingInstruction(String),
    /// XML declaration body, e.g. `xml version="1.0"`
    Declaration(String),
    DocType(String),
}

/// A qualified name (possibly with namespace prefix).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace prefix (e.g., "svg", "xlink")
    pub prefix: Option<String>,
    /// Local name (e.g., "path", "href")
    pub local: String,
}

impl QName {
    pub fn new(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            local: local.into(),
        }
    }

    /// Parse a qualified name from a string like "prefix:local" or just "local".
    pub fn parse(s: &str) -> Self {
        if let Some((prefix, local)) = s.split_once(':') {
            Self::with_prefix(prefix, local)
        } else {
            Self::new(s)
        }
    }

    /// Get the full name as a string.
    pub fn full_name(&self) -> String {
        match &self.prefix {
            Some(p) => format!("{}:{}", p, self.local),
            None => self.local.clone(),
        }
    }
}

/// An attribute on an element. The value is stored escaped, as it appears in markup.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QName,
    pub raw_value: String,
}

impl Attribute {
    /// Build an attribute from an unescaped value.
    pub fn new(name: impl Into<String>, value: &str) -> Self {
        Self {
            name: QName::parse(&name.into()),
            raw_value: escape(value).into_owned(),
        }
    }

    /// The value with character and entity references resolved. Values with
    /// references we cannot resolve are returned as written.
    pub fn value(&self) -> Cow<'_, str> {
        unescape(&self.raw_value).unwrap_or(Cow::Borrowed(self.raw_value.as_str()))
    }
}

/// An SVG/XML element.
#[derive(Debug, Clone)]
pub struct Element {
    pub name: QName,
    pub attributes: Vec<Attribute>,
    pub children: Vec<NodeId>,
    /// Start tag text between `<` and `>` (or `/>`) as it was read. Cleared as
    /// soon as an attribute changes so the tag gets rendered from `attributes`.
    pub source: Option<String>,
    /// Written as `<name/>` rather than `<name></name>`
    pub self_closing: bool,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: QName::parse(&name.into()),
            attributes: Vec::new(),
            children: Vec::new(),
            source: None,
            self_closing: true,
        }
    }

    /// Get an unescaped attribute value by local name.
    pub fn attr(&self, name: &str) -> Option<Cow<'_, str>> {
        self.attributes
            .iter()
            .find(|a| a.name.local == name)
            .map(Attribute::value)
    }

    /// Set an attribute value, replacing any existing one in place.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(attr) = self.attributes.iter_mut().find(|a| a.name.local == name) {
            attr.raw_value = escape(value).into_owned();
        } else {
            self.attributes.push(Attribute::new(name, value));
        }
        self.source = None;
    }

    /// Check if this element has a specific local name.
    pub fn is(&self, name: &str) -> bool {
        self.name.local == name
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node under `parent` (or at the top level) and return its id.
    pub fn append(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { parent, kind });
        match parent {
            Some(p) => {
                if let NodeKind::Element(elem) = &mut self.nodes[p.0].kind {
                    elem.children.push(id);
                    elem.self_closing = false;
                }
            }
            None => self.children.push(id),
        }
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].kind {
            NodeKind::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Walk from `id` (inclusive) up through its ancestors to the top level.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: Some(id),
        }
    }

    /// All nodes in document order.
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        // Pending nodes, next one on top
        let mut stack: Vec<NodeId> = self.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(elem) = self.element(id) {
                stack.extend(elem.children.iter().rev());
            }
        }
        out
    }

    /// First element with the given local name, in document order.
    pub fn find_first(&self, name: &str) -> Option<NodeId> {
        self.descendants()
            .into_iter()
            .find(|&id| self.element(id).is_some_and(|e| e.is(name)))
    }

    /// Every element with the given local name, in document order.
    pub fn find_all(&self, name: &str) -> Vec<NodeId> {
        self.descendants()
            .into_iter()
            .filter(|&id| self.element(id).is_some_and(|e| e.is(name)))
            .collect()
    }
}

/// Iterator returned by [`Document::ancestors`].
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.doc.parent(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(name: &str) -> NodeKind {
        NodeKind::Element(Element::new(name))
    }

    #[test]
    fn test_ancestors_stop_at_document() {
        let mut doc = Document::new();
        let svg = doc.append(None, element("svg"));
        let g = doc.append(Some(svg), element("g"));
        let path = doc.append(Some(g), element("path"));

        let chain: Vec<_> = doc.ancestors(path).collect();
        assert_eq!(chain, vec![path, g, svg]);
    }

    #[test]
    fn test_find_in_document_order() {
        let mut doc = Document::new();
        let svg = doc.append(None, element("svg"));
        let a = doc.append(Some(svg), element("path"));
        let g = doc.append(Some(svg), element("g"));
        let b = doc.append(Some(g), element("path"));
        let c = doc.append(Some(svg), element("path"));

        assert_eq!(doc.find_first("svg"), Some(svg));
        assert_eq!(doc.find_all("path"), vec![a, b, c]);
        assert_eq!(doc.find_first("rect"), None);
    }

    #[test]
    fn test_set_attr_escapes_and_invalidates_source() {
        let mut elem = Element::new("svg");
        elem.source = Some("svg".into());
        elem.set_attr("data-x", "a<b");
        assert_eq!(elem.attributes[0].raw_value, "a&lt;b");
        assert_eq!(elem.attr("data-x").as_deref(), Some("a<b"));
        assert!(elem.source.is_none());

        elem.set_attr("data-x", "c");
        assert_eq!(elem.attributes.len(), 1);
    }

    #[test]
    fn test_unknown_entity_kept_raw() {
        let attr = Attribute {
            name: QName::new("d"),
            raw_value: "&custom;".into(),
        };
        assert_eq!(attr.value(), "&custom;");
    }

    #[test]
    fn test_deep_nesting() {
        let mut doc = Document::new();
        let mut parent = doc.append(None, element("svg"));
        for _ in 0..200_000 {
            parent = doc.append(Some(parent), element("g"));
        }
        let path = doc.append(Some(parent), element("path"));

        assert_eq!(doc.descendants().len(), 200_002);
        assert_eq!(doc.find_all("path"), vec![path]);
    }
}
