//! DOM Adapter
//!
//! The in-memory tree the slimming pass works on. Nodes live in an
//! [`ego_tree`] arena addressed by stable [`NodeId`]s; parent, child and
//! sibling relations are id links, so excising a subtree is a single
//! `detach` that relinks its neighbours.
//!
//! Parsing lives in [`crate::parser`] and rendering in [`crate::serialize`];
//! this module only describes the shape of the tree and offers read access.

// Re-export arena types for external use
pub use ego_tree::{NodeId, NodeRef};

use ego_tree::Tree;
use html5ever::{Namespace, QualName};
use tendril::StrTendril;

/// A single node payload.
#[derive(Debug, Clone)]
pub enum Node {
    /// Root container. Exactly one per tree, never detached.
    Document,
    /// `<!DOCTYPE ...>` declaration.
    Doctype(Doctype),
    /// Tagged element with attributes.
    Element(Element),
    /// Character data.
    Text(StrTendril),
    /// `<!-- ... -->` comment. Contents are never modified.
    Comment(StrTendril),
}

impl Node {
    /// Element payload, if this is an element.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Mutable element payload, if this is an element.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Text payload, if this is a text node.
    #[must_use]
    pub fn as_text(&self) -> Option<&StrTendril> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_document(&self) -> bool {
        matches!(self, Node::Document)
    }

    #[must_use]
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    #[must_use]
    pub fn is_comment(&self) -> bool {
        matches!(self, Node::Comment(_))
    }
}

/// Doctype declaration. Only the name is rendered back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Doctype {
    pub name: Option<StrTendril>,
}

/// Element payload: qualified tag name plus attributes.
///
/// Local names are stored as the parser produced them (lower-cased); the
/// namespace is HTML, SVG or MathML. Attribute names are unique within one
/// element; document order is kept for output.
#[derive(Debug, Clone)]
pub struct Element {
    name: QualName,
    attrs: Vec<(QualName, StrTendril)>,
}

impl Element {
    /// Create an element, dropping repeated attribute names after the first.
    #[must_use]
    pub fn new(name: QualName, attrs: Vec<(QualName, StrTendril)>) -> Self {
        let mut unique: Vec<(QualName, StrTendril)> = Vec::with_capacity(attrs.len());
        for (key, value) in attrs {
            if !unique.iter().any(|(k, _)| *k == key) {
                unique.push((key, value));
            }
        }
        Self { name, attrs: unique }
    }

    /// Local tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name.local
    }

    #[must_use]
    pub fn qual_name(&self) -> &QualName {
        &self.name
    }

    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.name.ns
    }

    /// Value of the attribute `name`, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| &*k.local == name)
            .map(|(_, v)| &**v)
    }

    /// All attributes in document order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (&*k.local, &**v))
    }

    /// All attributes with their qualified names, in document order.
    pub fn qual_attrs(&self) -> impl Iterator<Item = (&QualName, &str)> {
        self.attrs.iter().map(|(k, v)| (k, &**v))
    }

    /// Whitespace-separated `class` list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class))
    }

    /// Keep only the attributes for which `keep` returns true.
    ///
    /// Returns the number of attributes removed.
    pub fn retain_attrs(&mut self, mut keep: impl FnMut(&str, &str) -> bool) -> usize {
        let before = self.attrs.len();
        self.attrs.retain(|(k, v)| keep(&k.local, v));
        before - self.attrs.len()
    }
}

/// A parsed document: an arena tree rooted at a [`Node::Document`].
///
/// Detached subtrees stay allocated in the arena but are unreachable from
/// the root, so they are invisible to traversal and serialization.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) tree: Tree<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: Tree::new(Node::Document),
        }
    }

    /// Parse HTML leniently. Never fails.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        crate::parser::parse(html)
    }

    /// Render the tree back to HTML.
    #[must_use]
    pub fn html(&self) -> String {
        crate::serialize::render(self)
    }

    /// The document root.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_, Node> {
        self.tree.root()
    }

    /// Node by id. Detached nodes are still returned.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, Node>> {
        self.tree.get(id)
    }

    /// Top-level element children of the root.
    pub fn root_elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.root().children().filter_map(ElementRef::wrap)
    }

    /// Every element reachable from the root, in document order.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.root().descendants().filter_map(ElementRef::wrap)
    }
}

/// Read-only view of an element node inside a [`Document`].
///
/// This is what selectors, built-in rules and the `walk` hook receive; it is
/// the same node the tree holds, not a copy.
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    node: NodeRef<'a, Node>,
    element: &'a Element,
}

impl<'a> ElementRef<'a> {
    /// Wrap `node` if it is an element.
    #[must_use]
    pub fn wrap(node: NodeRef<'a, Node>) -> Option<Self> {
        node.value()
            .as_element()
            .map(|element| Self { node, element })
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.node.id()
    }

    /// Underlying tree node.
    #[must_use]
    pub fn node(&self) -> NodeRef<'a, Node> {
        self.node
    }

    #[must_use]
    pub fn value(&self) -> &'a Element {
        self.element
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        self.element.name()
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.attr(name)
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.element.attrs()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.element.has_class(class)
    }

    /// Parent element; `None` when the parent is the document root.
    #[must_use]
    pub fn parent_element(&self) -> Option<ElementRef<'a>> {
        self.node.parent().and_then(ElementRef::wrap)
    }

    /// Whether the parent is the document root.
    #[must_use]
    pub fn is_root_child(&self) -> bool {
        self.node.parent().is_some_and(|p| p.value().is_document())
    }

    #[must_use]
    pub fn prev_sibling_element(&self) -> Option<ElementRef<'a>> {
        self.node.prev_siblings().find_map(ElementRef::wrap)
    }

    #[must_use]
    pub fn next_sibling_element(&self) -> Option<ElementRef<'a>> {
        self.node.next_siblings().find_map(ElementRef::wrap)
    }

    pub fn child_elements(&self) -> impl Iterator<Item = ElementRef<'a>> {
        self.node.children().filter_map(ElementRef::wrap)
    }

    /// Serialized element including its own tag.
    #[must_use]
    pub fn html(&self) -> String {
        crate::serialize::outer_html(self)
    }

    /// Concatenated text of all descendant text nodes.
    #[must_use]
    pub fn text(&self) -> String {
        self.node
            .descendants()
            .filter_map(|n| n.value().as_text())
            .map(|t| &**t)
            .collect()
    }
}

/// Parse HTML string into document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::parse(html)
}
