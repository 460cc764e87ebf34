//! Configuration options for slimming.
//!
//! The `Options` struct selects which removal categories are active and
//! carries the caller's custom patterns, selector and hooks. It is resolved
//! once into a [`crate::Slimmer`], which compiles everything up front.

use std::fmt;
use std::sync::Arc;

use crate::hooks::Hooks;
use crate::selector::Pattern;

/// Configuration options for slimming.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use html_slim::Options;
///
/// // Use defaults: only comments are removed, whitespace is collapsed
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     script: true,
///     style: true,
///     attr: Some("^data-v-".into()),
///     ..Options::default()
/// };
/// ```
#[derive(Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Remove `<script>` elements other than JSON-LD, inline `on*` event
    /// handler attributes and `<link rel="preload" as="script">`.
    ///
    /// Default: `false`
    pub script: bool,

    /// Remove `<script type="application/ld+json">` blocks.
    ///
    /// Independent of `script`.
    ///
    /// Default: `false`
    pub ld_json: bool,

    /// Remove `<style>`, `style` attributes, `<link rel="stylesheet">` and
    /// `<link rel="preload" as="style">`.
    ///
    /// Default: `false`
    pub style: bool,

    /// Remove HTML comments.
    ///
    /// Default: `true`
    pub comment: bool,

    /// Remove `<template>` elements.
    ///
    /// Default: `false`
    pub template: bool,

    /// Elements whose tag name matches are removed with their subtree.
    ///
    /// Default: `None`
    pub tag: Option<Pattern>,

    /// Attributes whose name matches are removed; the element stays.
    ///
    /// Default: `None`
    pub attr: Option<Pattern>,

    /// Elements matching this CSS selector are removed with their subtree.
    ///
    /// Default: `None`
    pub selector: Option<String>,

    /// Merge adjacent text nodes and collapse insignificant whitespace.
    ///
    /// Text directly inside `pre`, `script`, `style` and `textarea` keeps its
    /// interior formatting; only a trailing newline run is collapsed there.
    ///
    /// Default: `true`
    pub space: bool,

    /// Caller-defined `root` / `walk` callbacks.
    ///
    /// Default: `None`
    pub hooks: Option<Arc<dyn Hooks>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            script: false,
            ld_json: false,
            style: false,
            comment: true,
            template: false,
            tag: None,
            attr: None,
            selector: None,
            space: true,
            hooks: None,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("script", &self.script)
            .field("ld_json", &self.ld_json)
            .field("style", &self.style)
            .field("comment", &self.comment)
            .field("template", &self.template)
            .field("tag", &self.tag.as_ref().map(Pattern::as_str))
            .field("attr", &self.attr.as_ref().map(Pattern::as_str))
            .field("selector", &self.selector)
            .field("space", &self.space)
            .field("hooks", &self.hooks.is_some())
            .finish()
    }
}

impl Options {
    /// Enable every built-in removal category.
    ///
    /// Scripts, JSON-LD, styles, comments and templates are all removed.
    #[must_use]
    pub fn aggressive() -> Self {
        Self {
            script: true,
            ld_json: true,
            style: true,
            comment: true,
            template: true,
            ..Self::default()
        }
    }

    /// Attach hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: impl Hooks + 'static) -> Self {
        self.hooks = Some(Arc::new(hooks));
        self
    }
}
