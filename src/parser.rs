//! Lenient HTML Parser
//!
//! Tokenization is delegated to the `html5ever` tokenizer, which handles
//! entity decoding and the raw-text states of `<script>`, `<style>` and
//! friends. Tree construction is deliberately simpler than the HTML5 tree
//! builder: nothing is implied or reparented, so `<div>x</div>` parses to a
//! document with a single `div`, and the output mirrors the input's shape.
//!
//! Rules:
//! - void elements never take children;
//! - a start tag may close the current element first (`<li>` closes `<li>`,
//!   a block start closes `<p>`, ...);
//! - an end tag closes the nearest matching open element and everything
//!   above it; unmatched end tags are dropped, except `</p>` and `</br>`;
//! - anything still open at EOF is closed.
//!
//! Elements are put in the HTML, SVG or MathML namespace as they open; the
//! serializer relies on that for void and raw-text handling.

use std::collections::HashMap;

use ego_tree::NodeId;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use html5ever::{namespace_url, ns, LocalName, Namespace, QualName};
use tendril::StrTendril;

use crate::dom::{Doctype, Document, Element, Node};

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Check if a tag name is a void element.
#[must_use]
fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Start tags that close an open `<p>`.
const CLOSES_P: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "dialog", "div", "dl", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hgroup", "hr", "main", "menu", "nav", "ol", "p", "pre", "section", "table", "ul",
];

const FORM_TAGS: &[&str] = &["input", "option", "optgroup", "select", "button", "datalist", "textarea"];

/// Open elements that `name` closes when it starts, checked against the top
/// of the stack repeatedly.
fn implied_closes(name: &str) -> &'static [&'static str] {
    match name {
        "tr" => &["tr", "th", "td"],
        "th" => &["th"],
        "td" => &["thead", "th", "td"],
        "body" => &["head", "link", "script"],
        "li" => &["li"],
        "option" => &["option"],
        "optgroup" => &["optgroup", "option"],
        "dd" | "dt" => &["dt", "dd"],
        "rt" | "rp" => &["rb", "rt", "rtc", "rp"],
        "tbody" | "tfoot" => &["thead", "tbody"],
        "select" | "input" | "output" | "button" | "datalist" | "textarea" => FORM_TAGS,
        _ if CLOSES_P.contains(&name) => &["p"],
        _ => &[],
    }
}

/// Tokenizer state to switch to after a start tag, if any.
fn raw_kind(name: &str) -> Option<RawKind> {
    match name {
        "script" => Some(RawKind::ScriptData),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => Some(RawKind::Rawtext),
        "textarea" | "title" => Some(RawKind::Rcdata),
        _ => None,
    }
}

/// Parse HTML into a [`Document`]. Never fails; malformed markup yields a
/// best-effort tree.
#[must_use]
pub fn parse(html: &str) -> Document {
    let mut doc = Document::new();
    {
        let builder = TreeBuilder::new(&mut doc);
        let mut tokenizer = Tokenizer::new(builder, TokenizerOpts::default());
        let mut input = BufferQueue::default();
        input.push_back(StrTendril::from_slice(html));
        let _ = tokenizer.feed(&mut input);
        tokenizer.end();
    }
    doc
}

fn html_name(local: &str) -> QualName {
    QualName::new(None, ns!(html), LocalName::from(local))
}

/// An entry on the stack of open elements.
struct OpenElement {
    id: NodeId,
    name: LocalName,
    /// Namespace that children of this element start in.
    child_ns: Namespace,
}

/// Token sink building the arena tree.
struct TreeBuilder<'a> {
    doc: &'a mut Document,
    /// Open elements, innermost last.
    open: Vec<OpenElement>,
    /// Number of open elements per name, so unmatched end tags skip the
    /// stack scan.
    open_counts: HashMap<LocalName, usize>,
}

impl<'a> TreeBuilder<'a> {
    fn new(doc: &'a mut Document) -> Self {
        Self {
            doc,
            open: Vec::new(),
            open_counts: HashMap::new(),
        }
    }

    fn current(&self) -> NodeId {
        self.open
            .last()
            .map_or_else(|| self.doc.tree.root().id(), |open| open.id)
    }

    /// Namespace a new child of the current node goes in.
    fn insertion_ns(&self) -> Namespace {
        self.open
            .last()
            .map_or_else(|| ns!(html), |open| open.child_ns.clone())
    }

    fn push(&mut self, open: OpenElement) {
        *self.open_counts.entry(open.name.clone()).or_insert(0) += 1;
        self.open.push(open);
    }

    fn pop(&mut self) {
        if let Some(open) = self.open.pop() {
            self.release(&open.name);
        }
    }

    fn release(&mut self, name: &LocalName) {
        if let Some(count) = self.open_counts.get_mut(name) {
            *count = count.saturating_sub(1);
        }
    }

    fn is_open(&self, name: &LocalName) -> bool {
        self.open_counts.get(name).is_some_and(|count| *count > 0)
    }

    fn append(&mut self, node: Node) -> Option<NodeId> {
        let parent = self.current();
        self.doc
            .tree
            .get_mut(parent)
            .map(|mut parent| parent.append(node).id())
    }

    fn append_text(&mut self, text: &StrTendril) {
        let parent = self.current();
        let Some(mut parent) = self.doc.tree.get_mut(parent) else {
            return;
        };
        if let Some(mut last) = parent.last_child() {
            if let Node::Text(existing) = last.value() {
                existing.push_tendril(text);
                return;
            }
        }
        parent.append(Node::Text(text.clone()));
    }

    fn start_tag(&mut self, tag: Tag) -> TokenSinkResult<()> {
        let name = tag.name;

        let html = self.insertion_ns() == ns!(html);
        if html {
            let closes = implied_closes(&name);
            while self
                .open
                .last()
                .is_some_and(|top| closes.contains(&&*top.name))
            {
                self.pop();
            }
        }

        let ns = match &*name {
            "svg" => ns!(svg),
            "math" => ns!(mathml),
            _ => self.insertion_ns(),
        };
        let foreign = ns != ns!(html);
        let attrs = tag
            .attrs
            .into_iter()
            .map(|attr| (attr.name, attr.value))
            .collect();
        let element = Element::new(QualName::new(None, ns.clone(), name.clone()), attrs);
        let Some(id) = self.append(Node::Element(element)) else {
            return TokenSinkResult::Continue;
        };

        if foreign {
            if tag.self_closing {
                return TokenSinkResult::Continue;
            }
        } else if is_void_element(&name) {
            return TokenSinkResult::Continue;
        }

        let raw = if foreign { None } else { raw_kind(&name) };
        let child_ns = match &*name {
            "foreignobject" | "desc" | "title" if ns == ns!(svg) => ns!(html),
            _ => ns,
        };
        self.push(OpenElement { id, name, child_ns });

        raw.map_or(TokenSinkResult::Continue, TokenSinkResult::RawData)
    }

    fn end_tag(&mut self, tag: &Tag) {
        let name = &tag.name;

        if self.is_open(name) {
            if let Some(pos) = self.open.iter().rposition(|open| open.name == *name) {
                for closed in self.open.split_off(pos) {
                    self.release(&closed.name);
                }
                return;
            }
        }

        match &**name {
            "p" | "br" => {
                self.append(Node::Element(Element::new(html_name(name), Vec::new())));
            }
            _ => log::trace!("ignoring stray end tag </{name}>"),
        }
    }
}

impl TokenSink for TreeBuilder<'_> {
    type Handle = ();

    fn process_token(&mut self, token: Token, line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => return self.start_tag(tag),
                TagKind::EndTag => self.end_tag(&tag),
            },
            Token::CharacterTokens(text) => self.append_text(&text),
            Token::CommentToken(text) => {
                self.append(Node::Comment(text));
            }
            Token::DoctypeToken(doctype) => {
                self.append(Node::Doctype(Doctype { name: doctype.name }));
            }
            Token::ParseError(reason) => log::trace!("line {line_number}: {reason}"),
            Token::NullCharacterToken | Token::EOFToken => {}
        }
        TokenSinkResult::Continue
    }

    fn adjusted_current_node_present_but_not_in_html_namespace(&self) -> bool {
        self.insertion_ns() != ns!(html)
    }
}
