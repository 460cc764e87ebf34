//! # html-slim
//!
//! Rule-based HTML slimming.
//!
//! The document is parsed into a lenient tree, nodes and attributes matching
//! the configured rules are removed, insignificant whitespace is collapsed,
//! and the tree is serialized back to HTML.
//!
//! ## Quick Start
//!
//! ```rust
//! use html_slim::{slim, slim_with_options, Options};
//!
//! // Defaults remove comments and collapse whitespace.
//! assert_eq!(slim("<div>\n  <!-- note -->\n  <p>Hi</p>\n</div>"), "<div>\n<p>Hi</p>\n</div>");
//!
//! let options = Options {
//!     script: true,
//!     style: true,
//!     attr: Some("^data-v-".into()),
//!     ..Options::default()
//! };
//! let html = r#"<p data-v-1a2b style="color:red" onclick="go()">Hi</p><script>go()</script>"#;
//! assert_eq!(slim_with_options(html, &options)?, "<p>Hi</p>");
//! # Ok::<(), html_slim::Error>(())
//! ```
//!
//! ## Removal Rules
//!
//! - **Scripts**: `<script>` (except JSON-LD), `on*` attributes, script preloads
//! - **JSON-LD**: `<script type="application/ld+json">`, independently of scripts
//! - **Styles**: `<style>`, `style` attributes, stylesheet links and style preloads
//! - **Comments** and **templates**
//! - **Custom**: tag-name and attribute-name regexes, a CSS selector, a `walk` hook
//!
//! Configuration errors (bad regex or selector) surface from [`Slimmer::new`];
//! malformed HTML never fails.

mod error;
mod hooks;
mod options;
mod parser;
mod patterns;
mod serialize;
mod slimmer;
mod walker;

/// Arena DOM: node types, documents and read-only element views.
pub mod dom;

/// Built-in rules, name patterns and the CSS selector engine.
pub mod selector;

/// Text-level whitespace rules.
pub mod whitespace;

/// Character encoding detection for byte input.
pub mod encoding;

/// JSON configuration files.
pub mod config;

// Public API - re-exports
pub use config::Config;
pub use dom::{Document, ElementRef};
pub use error::{Error, Result};
pub use hooks::{Hooks, WalkFn};
pub use options::Options;
pub use selector::{CssSelector, Pattern};
pub use slimmer::{Report, Slimmer};

/// Slim `html` with [`Options::default`].
///
/// Default options contain no patterns, so this cannot fail.
#[must_use]
pub fn slim(html: &str) -> String {
    default_slimmer().slim(html)
}

/// Slim `html` with the given options.
pub fn slim_with_options(html: &str, options: &Options) -> Result<String> {
    Ok(Slimmer::new(options)?.slim(html))
}

/// Decode and slim `html` bytes with [`Options::default`].
#[must_use]
pub fn slim_bytes(html: &[u8]) -> String {
    default_slimmer().slim_bytes(html)
}

/// Decode and slim `html` bytes with the given options.
pub fn slim_bytes_with_options(html: &[u8], options: &Options) -> Result<String> {
    Ok(Slimmer::new(options)?.slim_bytes(html))
}

fn default_slimmer() -> &'static Slimmer {
    use std::sync::LazyLock;

    static DEFAULT: LazyLock<Slimmer> = LazyLock::new(Slimmer::from_defaults);
    &DEFAULT
}
