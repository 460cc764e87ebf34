//! Tree walk: removal, whitespace normalization and attribute filtering.
//!
//! One depth-first pass over the arena, driven by an explicit stack of
//! containers so nesting depth never touches the call stack. Per container,
//! children are visited last to first:
//!
//! 1. a child flagged by any active rule is detached with its subtree;
//! 2. a surviving element is descended into;
//! 3. with `space`, a text child absorbs the text sibling that follows it
//!    (already normalized, since it was visited first) and is collapsed.
//!
//! Afterwards a container whose only child is blank text has that text
//! cleared, and an element container has its attributes filtered.
//!
//! Visiting in reverse means a detach never disturbs children still to be
//! visited, and a text child always sees its final right-hand neighbour.

use std::borrow::Cow;

use ego_tree::NodeId;
use log::trace;
use tendril::StrTendril;

use crate::dom::{Document, ElementRef, Node};
use crate::patterns::EVENT_HANDLER_ATTR;
use crate::selector;
use crate::slimmer::{Report, Slimmer};
use crate::whitespace;

/// A container being walked and the children it has left to visit.
struct Frame {
    container: NodeId,
    preserve: bool,
    /// Remaining children in document order; popped from the end.
    pending: Vec<NodeId>,
}

impl Frame {
    fn new(doc: &Document, container: NodeId) -> Self {
        let node = doc.get(container);
        let preserve = node
            .and_then(|n| n.value().as_element())
            .is_some_and(|el| whitespace::is_preserved(el.name()));
        let pending = node
            .map(|n| n.children().map(|c| c.id()).collect())
            .unwrap_or_default();
        Self {
            container,
            preserve,
            pending,
        }
    }
}

pub(crate) struct Walker<'s> {
    slimmer: &'s Slimmer,
    report: Report,
}

impl<'s> Walker<'s> {
    pub(crate) fn new(slimmer: &'s Slimmer) -> Self {
        Self {
            slimmer,
            report: Report::default(),
        }
    }

    /// Walk the whole document and return what was done.
    pub(crate) fn run(mut self, doc: &mut Document) -> Report {
        let root = doc.root().id();
        let mut stack = vec![Frame::new(doc, root)];

        while let Some(frame) = stack.last_mut() {
            let Some(child) = frame.pending.pop() else {
                let container = frame.container;
                stack.pop();
                self.finish_container(doc, container);
                continue;
            };
            let preserve = frame.preserve;

            if self.should_remove(doc, child) {
                if let Some(mut node) = doc.tree.get_mut(child) {
                    node.detach();
                }
                self.report.removed_nodes += 1;
                continue;
            }

            let (is_element, is_text) = match doc.get(child).map(|n| n.value()) {
                Some(value) => (value.is_element(), value.is_text()),
                None => continue,
            };
            if is_element {
                stack.push(Frame::new(doc, child));
            } else if is_text && self.slimmer.space {
                self.normalize_text(doc, child, preserve);
            }
        }

        if self.slimmer.space {
            strip_leading_break(doc);
        }
        self.report
    }

    /// Runs once every child of `container` has been visited.
    fn finish_container(&mut self, doc: &mut Document, container: NodeId) {
        if self.slimmer.space {
            clear_lone_blank_text(doc, container);
        }
        self.filter_attrs(doc, container);
    }

    /// The removal OR chain. The `walk` hook runs first and at most once.
    fn should_remove(&self, doc: &Document, id: NodeId) -> bool {
        let Some(node) = doc.get(id) else {
            return false;
        };
        if node.value().is_comment() {
            if self.slimmer.comment {
                trace!("removing comment");
                return true;
            }
            return false;
        }
        let Some(element) = ElementRef::wrap(node) else {
            return false;
        };
        let remove = self.matches_element(&element);
        if remove {
            trace!("removing <{}>", element.name());
        }
        remove
    }

    fn matches_element(&self, element: &ElementRef) -> bool {
        let s = self.slimmer;
        if s.hooks.as_ref().is_some_and(|hooks| hooks.walk(element)) {
            return true;
        }
        if s.selector.as_ref().is_some_and(|sel| sel.matches(element)) {
            return true;
        }
        if s.tag.as_ref().is_some_and(|tag| tag.is_match(element.name())) {
            return true;
        }
        selector::any_rule(&s.element_rules, element)
    }

    /// Merge the following text sibling into `id`, then collapse.
    fn normalize_text(&mut self, doc: &mut Document, id: NodeId, preserve: bool) {
        let next = doc
            .get(id)
            .and_then(|n| n.next_sibling())
            .and_then(|n| n.value().as_text().map(|t| (n.id(), t.clone())));

        let Some(mut node) = doc.tree.get_mut(id) else {
            return;
        };
        let Node::Text(text) = node.value() else {
            return;
        };
        if let Some((_, next_text)) = &next {
            text.push_tendril(next_text);
        }
        let collapsed = match whitespace::collapse(text, preserve) {
            Cow::Owned(collapsed) => Some(collapsed),
            Cow::Borrowed(_) => None,
        };
        if let Some(collapsed) = collapsed {
            *text = StrTendril::from_slice(&collapsed);
        }

        if let Some((next_id, _)) = next {
            if let Some(mut next) = doc.tree.get_mut(next_id) {
                next.detach();
            }
            self.report.merged_text += 1;
        }
    }

    fn filter_attrs(&mut self, doc: &mut Document, id: NodeId) {
        let s = self.slimmer;
        if !s.style && !s.script && s.attr.is_none() {
            return;
        }
        let Some(mut node) = doc.tree.get_mut(id) else {
            return;
        };
        let Some(element) = node.value().as_element_mut() else {
            return;
        };
        let removed = element.retain_attrs(|name, _| {
            let drop = (s.style && name == "style")
                || (s.script && EVENT_HANDLER_ATTR.is_match(name))
                || s.attr.as_ref().is_some_and(|attr| attr.is_match(name));
            if drop {
                trace!("removing attribute {name}");
            }
            !drop
        });
        self.report.removed_attrs += removed;
    }
}

/// A container holding nothing but whitespace text ends up holding "".
fn clear_lone_blank_text(doc: &mut Document, container: NodeId) {
    let lone = doc.get(container).and_then(|n| {
        let first = n.first_child()?;
        let single = first.next_sibling().is_none();
        let blank = first.value().as_text().is_some_and(|t| whitespace::is_blank(t));
        (single && blank).then_some(first.id())
    });
    if let Some(id) = lone {
        if let Some(mut node) = doc.tree.get_mut(id) {
            if let Node::Text(text) = node.value() {
                text.clear();
            }
        }
    }
}

/// Drop the blank line(s) before the first tag of the document.
fn strip_leading_break(doc: &mut Document) {
    let root = doc.root().id();
    let Some(mut root) = doc.tree.get_mut(root) else {
        return;
    };
    let Some(mut first) = root.first_child() else {
        return;
    };
    if let Node::Text(text) = first.value() {
        let stripped = match whitespace::strip_leading_break(text) {
            Cow::Owned(stripped) => Some(stripped),
            Cow::Borrowed(_) => None,
        };
        if let Some(stripped) = stripped {
            *text = StrTendril::from_slice(&stripped);
        }
    }
}
