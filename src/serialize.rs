//! HTML Serializer
//!
//! [`Document`] and [`ElementRef`] implement html5ever's [`Serialize`], so
//! escaping, void elements and raw-text parents follow `HtmlSerializer`.
//! Only what is reachable from the root is written, so detached (removed)
//! subtrees never reappear. The walk uses `ego_tree`'s edge traversal and
//! never recurses.

use std::io;

use ego_tree::iter::Edge;
use html5ever::serialize::{serialize, Serialize, SerializeOpts, Serializer, TraversalScope};

use crate::dom::{Document, ElementRef, Node, NodeRef};

impl Serialize for Document {
    fn serialize<S: Serializer>(
        &self,
        serializer: &mut S,
        traversal_scope: TraversalScope,
    ) -> io::Result<()> {
        serialize_node(self.root(), serializer, &traversal_scope)
    }
}

impl Serialize for ElementRef<'_> {
    fn serialize<S: Serializer>(
        &self,
        serializer: &mut S,
        traversal_scope: TraversalScope,
    ) -> io::Result<()> {
        serialize_node(self.node(), serializer, &traversal_scope)
    }
}

fn serialize_node<S: Serializer>(
    node: NodeRef<'_, Node>,
    serializer: &mut S,
    traversal_scope: &TraversalScope,
) -> io::Result<()> {
    let skip_self = *traversal_scope != TraversalScope::IncludeNode;

    for edge in node.traverse() {
        match edge {
            Edge::Open(current) => {
                if skip_self && current == node {
                    continue;
                }
                match current.value() {
                    Node::Doctype(doctype) => {
                        serializer.write_doctype(doctype.name.as_deref().unwrap_or_default())?;
                    }
                    Node::Comment(text) => serializer.write_comment(text)?,
                    Node::Text(text) => serializer.write_text(text)?,
                    Node::Element(el) => {
                        serializer.start_elem(el.qual_name().clone(), el.qual_attrs())?;
                    }
                    Node::Document => {}
                }
            }
            Edge::Close(current) => {
                if skip_self && current == node {
                    continue;
                }
                if let Some(el) = current.value().as_element() {
                    serializer.end_elem(el.qual_name().clone())?;
                }
            }
        }
    }
    Ok(())
}

fn to_html<T: Serialize>(node: &T, traversal_scope: TraversalScope) -> String {
    let opts = SerializeOpts {
        // `noscript` content is parsed as markup, so it is written as markup.
        scripting_enabled: false,
        traversal_scope,
        create_missing_parent: false,
    };
    let mut buf = Vec::new();
    if let Err(err) = serialize(&mut buf, node, opts) {
        log::warn!("serialization stopped early: {err}");
    }
    String::from_utf8(buf).unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

/// Render the whole document.
#[must_use]
pub fn render(doc: &Document) -> String {
    to_html(doc, TraversalScope::ChildrenOnly(None))
}

/// Render an element and its subtree.
#[must_use]
pub fn outer_html(el: &ElementRef<'_>) -> String {
    to_html(el, TraversalScope::IncludeNode)
}
