//! CSS Selector Matching
//!
//! The `selector` option is parsed once with `cssparser` and `selectors`
//! into a [`CssSelector`]. [`ElementRef`] implements [`selectors::Element`],
//! so the compiled list is matched directly against the live tree.
//!
//! Supported are selector lists, type, `*`, `#id`, `.class`, every attribute
//! operator with the ` i` / ` s` flags, all four combinators, the structural
//! pseudo-classes (`:first-child`, `:nth-child()`, `:nth-of-type()`,
//! `:empty`, `:root`, ...) and `:not()`, `:is()`, `:where()`. Pseudo-elements,
//! dynamic pseudo-classes and `:has()` are rejected with
//! [`Error::InvalidSelector`].

use std::fmt;

use cssparser::{BasicParseErrorKind, ParseError, ParseErrorKind, ParserInput, ToCss};
use html5ever::{LocalName, Namespace};
use precomputed_hash::PrecomputedHash;
use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::matching::{self, ElementSelectorFlags, MatchingContext};
use selectors::parser::{self, ParseRelative, SelectorList, SelectorParseErrorKind};
use selectors::{NthIndexCache, OpaqueElement};

use crate::dom::{ElementRef, Node};
use crate::error::{Error, Result};

/// A compiled selector list.
#[derive(Clone)]
pub struct CssSelector {
    source: String,
    selectors: SelectorList<Simple>,
}

impl fmt::Debug for CssSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CssSelector").field(&self.source).finish()
    }
}

impl CssSelector {
    /// Parse a selector list.
    pub fn compile(source: &str) -> Result<Self> {
        let mut input = ParserInput::new(source);
        let mut css = cssparser::Parser::new(&mut input);
        let selectors = SelectorList::parse(&SelectorParser, &mut css, ParseRelative::No)
            .map_err(|err| Error::InvalidSelector {
                selector: source.to_string(),
                reason: describe(&err),
            })?;
        Ok(Self {
            source: source.to_string(),
            selectors,
        })
    }

    /// Selector text as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether any selector in the list matches `element`.
    #[must_use]
    pub fn matches(&self, element: &ElementRef) -> bool {
        let mut nth_index_cache = NthIndexCache::default();
        let mut context = MatchingContext::new(
            matching::MatchingMode::Normal,
            None,
            &mut nth_index_cache,
            matching::QuirksMode::NoQuirks,
            matching::NeedsSelectorFlags::No,
            matching::IgnoreNthChildForInvalidation::No,
        );
        self.selectors
            .0
            .iter()
            .any(|selector| matching::matches_selector(selector, 0, None, element, &mut context))
    }
}

fn describe(err: &ParseError<'_, SelectorParseErrorKind<'_>>) -> String {
    let what = match &err.kind {
        ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
            format!("unexpected `{}`", token.to_css_string())
        }
        ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => "unexpected end of input".to_string(),
        ParseErrorKind::Custom(SelectorParseErrorKind::EmptySelector) => "empty selector".to_string(),
        ParseErrorKind::Custom(SelectorParseErrorKind::DanglingCombinator) => {
            "combinator without a selector".to_string()
        }
        ParseErrorKind::Custom(SelectorParseErrorKind::UnsupportedPseudoClassOrElement(name)) => {
            format!("unsupported pseudo-class or pseudo-element `{}`", &**name)
        }
        other => format!("{other:?}"),
    };
    format!("{what} at column {}", err.location.column)
}

// =============================================================================
// Selector Implementation
// =============================================================================

/// Selector types for the arena DOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Simple;

impl parser::SelectorImpl for Simple {
    type AttrValue = CssString;
    type Identifier = CssLocalName;
    type LocalName = CssLocalName;
    type NamespacePrefix = CssLocalName;
    type NamespaceUrl = Namespace;
    type BorrowedNamespaceUrl = Namespace;
    type BorrowedLocalName = CssLocalName;

    type NonTSPseudoClass = NonTSPseudoClass;
    type PseudoElement = PseudoElement;

    type ExtraMatchingData<'a> = ();
}

struct SelectorParser;

impl<'i> parser::Parser<'i> for SelectorParser {
    type Impl = Simple;
    type Error = SelectorParseErrorKind<'i>;

    fn parse_is_and_where(&self) -> bool {
        true
    }
}

/// Attribute value in a selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CssString(pub String);

impl<'a> From<&'a str> for CssString {
    fn from(value: &'a str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for CssString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ToCss for CssString {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        cssparser::serialize_string(&self.0, dest)
    }
}

/// Name, id or class in a selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CssLocalName(pub LocalName);

impl<'a> From<&'a str> for CssLocalName {
    fn from(value: &'a str) -> Self {
        Self(value.into())
    }
}

impl ToCss for CssLocalName {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(&self.0)
    }
}

impl PrecomputedHash for CssLocalName {
    fn precomputed_hash(&self) -> u32 {
        self.0.precomputed_hash()
    }
}

/// No non-tree-structural pseudo-classes are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonTSPseudoClass {}

impl parser::NonTSPseudoClass for NonTSPseudoClass {
    type Impl = Simple;

    fn is_active_or_hover(&self) -> bool {
        match *self {}
    }

    fn is_user_action_state(&self) -> bool {
        match *self {}
    }
}

impl ToCss for NonTSPseudoClass {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

/// No pseudo-elements are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoElement {}

impl parser::PseudoElement for PseudoElement {
    type Impl = Simple;
}

impl ToCss for PseudoElement {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

// =============================================================================
// Element Matching
// =============================================================================

impl selectors::Element for ElementRef<'_> {
    type Impl = Simple;

    fn opaque(&self) -> OpaqueElement {
        OpaqueElement::new(self.node().value())
    }

    fn parent_element(&self) -> Option<Self> {
        ElementRef::parent_element(self)
    }

    fn parent_node_is_shadow_root(&self) -> bool {
        false
    }

    fn containing_shadow_host(&self) -> Option<Self> {
        None
    }

    fn is_pseudo_element(&self) -> bool {
        false
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        ElementRef::prev_sibling_element(self)
    }

    fn next_sibling_element(&self) -> Option<Self> {
        ElementRef::next_sibling_element(self)
    }

    fn first_element_child(&self) -> Option<Self> {
        self.child_elements().next()
    }

    // Names are stored lower-cased whatever their namespace.
    fn is_html_element_in_html_document(&self) -> bool {
        true
    }

    fn has_local_name(&self, local_name: &CssLocalName) -> bool {
        self.value().qual_name().local == local_name.0
    }

    fn has_namespace(&self, ns: &Namespace) -> bool {
        self.value().namespace() == ns
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.value().qual_name() == other.value().qual_name()
    }

    fn attr_matches(
        &self,
        ns: &NamespaceConstraint<&Namespace>,
        local_name: &CssLocalName,
        operation: &AttrSelectorOperation<&CssString>,
    ) -> bool {
        self.value().qual_attrs().any(|(key, value)| {
            !matches!(*ns, NamespaceConstraint::Specific(url) if *url != key.ns)
                && key.local == local_name.0
                && operation.eval_str(value)
        })
    }

    fn match_non_ts_pseudo_class(
        &self,
        pc: &NonTSPseudoClass,
        _context: &mut MatchingContext<Simple>,
    ) -> bool {
        match *pc {}
    }

    fn match_pseudo_element(
        &self,
        pe: &PseudoElement,
        _context: &mut MatchingContext<Simple>,
    ) -> bool {
        match *pe {}
    }

    fn apply_selector_flags(&self, _flags: ElementSelectorFlags) {}

    fn is_link(&self) -> bool {
        false
    }

    fn is_html_slot_element(&self) -> bool {
        false
    }

    fn has_id(&self, id: &CssLocalName, case_sensitivity: CaseSensitivity) -> bool {
        self.attr("id")
            .is_some_and(|value| case_sensitivity.eq(value.as_bytes(), id.0.as_bytes()))
    }

    fn has_class(&self, name: &CssLocalName, case_sensitivity: CaseSensitivity) -> bool {
        self.attr("class").is_some_and(|classes| {
            classes
                .split_ascii_whitespace()
                .any(|class| case_sensitivity.eq(class.as_bytes(), name.0.as_bytes()))
        })
    }

    fn imported_part(&self, _name: &CssLocalName) -> Option<CssLocalName> {
        None
    }

    fn is_part(&self, _name: &CssLocalName) -> bool {
        false
    }

    /// No element children and no text.
    fn is_empty(&self) -> bool {
        !self.node().children().any(|child| match child.value() {
            Node::Element(_) => true,
            Node::Text(text) => !text.is_empty(),
            _ => false,
        })
    }

    // Fragments have no single root, so every top-level element counts.
    fn is_root(&self) -> bool {
        self.is_root_child()
    }
}
