//! The configured transform.
//!
//! [`Slimmer::new`] resolves [`Options`] once: patterns and the selector are
//! compiled and the active rule tables are gathered. The result is immutable,
//! `Send + Sync`, and can slim any number of documents.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::dom::{self, Document};
use crate::encoding;
use crate::error::Result;
use crate::hooks::Hooks;
use crate::options::Options;
use crate::selector::{rules, CssSelector, NameMatcher, Rule};
use crate::walker::Walker;

/// What one pass removed or merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    /// Detached nodes (elements and comments), not counting their descendants.
    pub removed_nodes: usize,
    /// Attributes deleted from surviving elements.
    pub removed_attrs: usize,
    /// Text nodes folded into their preceding text sibling.
    pub merged_text: usize,
}

/// Options resolved into a reusable HTML-to-HTML transform.
///
/// # Example
///
/// ```rust
/// use html_slim::{Options, Slimmer};
///
/// let slimmer = Slimmer::new(&Options {
///     script: true,
///     ..Options::default()
/// })?;
///
/// let html = r#"<p onclick="track()">Hi</p><script>track()</script>"#;
/// assert_eq!(slimmer.slim(html), "<p>Hi</p>");
/// # Ok::<(), html_slim::Error>(())
/// ```
pub struct Slimmer {
    pub(crate) script: bool,
    pub(crate) style: bool,
    pub(crate) comment: bool,
    pub(crate) space: bool,
    pub(crate) tag: Option<NameMatcher>,
    pub(crate) attr: Option<NameMatcher>,
    pub(crate) selector: Option<CssSelector>,
    pub(crate) hooks: Option<Arc<dyn Hooks>>,
    /// Built-in element rules of every enabled category.
    pub(crate) element_rules: Vec<Rule>,
}

impl fmt::Debug for Slimmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slimmer")
            .field("script", &self.script)
            .field("style", &self.style)
            .field("comment", &self.comment)
            .field("space", &self.space)
            .field("tag", &self.tag.as_ref().map(NameMatcher::as_str))
            .field("attr", &self.attr.as_ref().map(NameMatcher::as_str))
            .field("selector", &self.selector.as_ref().map(CssSelector::as_str))
            .field("hooks", &self.hooks.is_some())
            .field("element_rules", &self.element_rules.len())
            .finish()
    }
}

impl Slimmer {
    /// Resolve options. Fails on an invalid `tag`/`attr` pattern or
    /// `selector`; nothing is parsed here.
    pub fn new(options: &Options) -> Result<Self> {
        let tag = options.tag.as_ref().map(|p| p.compile("tag")).transpose()?;
        let attr = options.attr.as_ref().map(|p| p.compile("attr")).transpose()?;
        let selector = options
            .selector
            .as_deref()
            .map(CssSelector::compile)
            .transpose()?;

        debug!("resolved options: {options:?}");

        Ok(Self {
            script: options.script,
            style: options.style,
            comment: options.comment,
            space: options.space,
            tag,
            attr,
            selector,
            hooks: options.hooks.clone(),
            element_rules: active_rules(options),
        })
    }

    /// `Options::default()` has nothing to compile.
    pub(crate) fn from_defaults() -> Self {
        let options = Options::default();
        Self {
            script: options.script,
            style: options.style,
            comment: options.comment,
            space: options.space,
            tag: None,
            attr: None,
            selector: None,
            hooks: None,
            element_rules: active_rules(&options),
        }
    }

    /// Parse, slim and re-serialize `html`.
    #[must_use]
    pub fn slim(&self, html: &str) -> String {
        let mut doc = dom::parse(html);
        self.slim_document(&mut doc);
        doc.html()
    }

    /// Decode `html` (BOM, then `<meta charset>`, UTF-8 fallback) and slim it.
    #[must_use]
    pub fn slim_bytes(&self, html: &[u8]) -> String {
        self.slim(&encoding::decode_html(html))
    }

    /// Run the `root` hook and the walk on an already parsed document.
    pub fn slim_document(&self, doc: &mut Document) -> Report {
        if let Some(hooks) = &self.hooks {
            hooks.root(doc);
        }
        let report = Walker::new(self).run(doc);
        debug!(
            "slimmed document: {} nodes removed, {} attributes removed, {} text nodes merged",
            report.removed_nodes, report.removed_attrs, report.merged_text
        );
        report
    }
}

/// Built-in rule tables of the enabled categories, concatenated.
fn active_rules(options: &Options) -> Vec<Rule> {
    let tables = [
        (options.script, rules::SCRIPT_RULES),
        (options.ld_json, rules::LD_JSON_RULES),
        (options.style, rules::STYLE_RULES),
        (options.template, rules::TEMPLATE_RULES),
    ];
    tables
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .flat_map(|(_, table)| table.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_slimmer_is_send_sync() {
        assert_send_sync::<Slimmer>();
    }

    #[test]
    fn test_invalid_tag_pattern_fails_at_configuration() {
        let opts = Options {
            tag: Some("[".into()),
            ..Options::default()
        };
        assert!(matches!(
            Slimmer::new(&opts),
            Err(Error::InvalidPattern { option: "tag", .. })
        ));
    }

    #[test]
    fn test_invalid_attr_pattern_names_attr() {
        let opts = Options {
            attr: Some("(?<".into()),
            ..Options::default()
        };
        assert!(matches!(
            Slimmer::new(&opts),
            Err(Error::InvalidPattern { option: "attr", .. })
        ));
    }

    #[test]
    fn test_invalid_selector_fails_at_configuration() {
        let opts = Options {
            selector: Some("div >".into()),
            ..Options::default()
        };
        assert!(matches!(Slimmer::new(&opts), Err(Error::InvalidSelector { .. })));
    }

    #[test]
    fn test_rule_tables_follow_flags() {
        let Ok(none) = Slimmer::new(&Options::default()) else {
            panic!("defaults rejected");
        };
        assert!(none.element_rules.is_empty());

        let Ok(all) = Slimmer::new(&Options::aggressive()) else {
            panic!("aggressive rejected");
        };
        let expected = rules::SCRIPT_RULES.len()
            + rules::LD_JSON_RULES.len()
            + rules::STYLE_RULES.len()
            + rules::TEMPLATE_RULES.len();
        assert_eq!(all.element_rules.len(), expected);
    }

    #[test]
    fn test_slimmer_is_reusable() {
        let Ok(slimmer) = Slimmer::new(&Options::default()) else {
            panic!("defaults rejected");
        };
        assert_eq!(slimmer.slim("<p>a<!--x--></p>"), "<p>a</p>");
        assert_eq!(slimmer.slim("<p>b<!--y--></p>"), "<p>b</p>");
    }

    #[test]
    fn test_slim_document_reports() {
        let Ok(slimmer) = Slimmer::new(&Options::aggressive()) else {
            panic!("aggressive rejected");
        };
        let mut doc = dom::parse(
            r#"<head><style>p{}</style><link rel="stylesheet" href="a.css"></head><p style="x">t</p>"#,
        );
        let report = slimmer.slim_document(&mut doc);
        assert_eq!(
            report,
            Report {
                removed_nodes: 2,
                removed_attrs: 1,
                merged_text: 0,
            }
        );
        assert_eq!(doc.html(), "<head></head><p>t</p>");
    }
}
