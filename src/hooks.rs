//! Caller hooks.
//!
//! [`Hooks`] is the escape hatch for removal logic the built-in options
//! cannot express. Both methods have no-op defaults, so an implementation
//! only overrides what it needs.

use crate::dom::{Document, ElementRef};

/// Callbacks invoked by the slimming pass.
///
/// Hooks are shared across calls (a [`crate::Slimmer`] is `Send + Sync`), so
/// implementations that record state need interior mutability.
pub trait Hooks: Send + Sync {
    /// Called once with the freshly parsed document, before the walk.
    fn root(&self, _document: &Document) {}

    /// Called for each visited element, before any other removal rule.
    ///
    /// Returning `true` removes the element and its subtree; its children
    /// are then never visited. Elements inside an already removed subtree
    /// are never passed here.
    fn walk(&self, _element: &ElementRef) -> bool {
        false
    }
}

/// Adapts a closure into a `walk`-only hook.
///
/// ```rust
/// use html_slim::{dom::ElementRef, Options, Slimmer, WalkFn};
///
/// let options = Options::default()
///     .with_hooks(WalkFn(|el: &ElementRef| el.attr("hidden").is_some()));
/// let slimmer = Slimmer::new(&options)?;
/// assert_eq!(slimmer.slim("<p>a</p><p hidden>b</p>"), "<p>a</p>");
/// # Ok::<(), html_slim::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WalkFn<F>(pub F);

impl<F> Hooks for WalkFn<F>
where
    F: Fn(&ElementRef) -> bool + Send + Sync,
{
    fn walk(&self, element: &ElementRef) -> bool {
        (self.0)(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    struct Nothing;
    impl Hooks for Nothing {}

    #[test]
    fn test_default_hooks_do_nothing() {
        let doc = dom::parse("<p>x</p>");
        let hooks = Nothing;
        hooks.root(&doc);
        assert!(doc.elements().all(|el| !hooks.walk(&el)));
    }

    #[test]
    fn test_walk_fn_forwards_to_closure() {
        let doc = dom::parse(r#"<p class="ad">x</p><p>y</p>"#);
        let hook = WalkFn(|el: &ElementRef| el.has_class("ad"));
        let flagged: Vec<bool> = doc.elements().map(|el| hook.walk(&el)).collect();
        assert_eq!(flagged, [true, false]);
    }
}
