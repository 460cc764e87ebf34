//! Selector Infrastructure
//!
//! Everything that decides whether an element (or attribute) is a removal
//! target:
//!
//! - [`rules`]: built-in category predicates (scripts, styles, preload links...)
//! - [`pattern`]: `tag` / `attr` regular-expression matchers
//! - [`css`]: the `selector` option, compiled with the `selectors` crate

use crate::dom::ElementRef;

pub mod css;
pub mod pattern;
pub mod rules;

pub use css::CssSelector;
pub use pattern::{NameMatcher, Pattern};

/// A rule that tests whether an element matches certain criteria.
///
/// Rules are plain predicate functions, grouped into static tables per
/// removal category.
pub type Rule = fn(&ElementRef) -> bool;

/// True if any rule in the table matches.
#[must_use]
pub fn any_rule(rules: &[Rule], element: &ElementRef) -> bool {
    rules.iter().any(|rule| rule(element))
}
