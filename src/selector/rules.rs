//! Built-in Removal Rules
//!
//! Stateless classifiers over element shape. Tag names are compared as
//! stored (the parser lower-cases them); attribute values are compared
//! case-insensitively.

use crate::dom::ElementRef;
use crate::selector::Rule;

/// JSON-LD structured data MIME type.
pub const LD_JSON_TYPE: &str = "application/ld+json";

fn attr_eq_ignore_case(el: &ElementRef, name: &str, expected: &str) -> bool {
    el.attr(name).is_some_and(|v| v.eq_ignore_ascii_case(expected))
}

#[must_use]
pub fn is_script(el: &ElementRef) -> bool {
    el.name() == "script"
}

/// `<script>` whose `type`, lower-cased and cut at the first `;`, is
/// `application/ld+json`.
#[must_use]
pub fn is_ld_json_script(el: &ElementRef) -> bool {
    is_script(el)
        && el.attr("type").is_some_and(|ty| {
            ty.split(';')
                .next()
                .is_some_and(|mime| mime.eq_ignore_ascii_case(LD_JSON_TYPE))
        })
}

/// Any `<script>` that is not JSON-LD.
#[must_use]
pub fn is_plain_script(el: &ElementRef) -> bool {
    is_script(el) && !is_ld_json_script(el)
}

#[must_use]
pub fn is_style(el: &ElementRef) -> bool {
    el.name() == "style"
}

#[must_use]
pub fn is_template(el: &ElementRef) -> bool {
    el.name() == "template"
}

#[must_use]
pub fn is_link(el: &ElementRef) -> bool {
    el.name() == "link"
}

/// `<link rel="stylesheet">`
#[must_use]
pub fn is_link_stylesheet(el: &ElementRef) -> bool {
    is_link(el) && attr_eq_ignore_case(el, "rel", "stylesheet")
}

/// `<link rel="preload" as="{kind}">`
#[must_use]
pub fn is_link_preload_as(el: &ElementRef, kind: &str) -> bool {
    is_link(el) && attr_eq_ignore_case(el, "rel", "preload") && attr_eq_ignore_case(el, "as", kind)
}

#[must_use]
pub fn is_preload_script(el: &ElementRef) -> bool {
    is_link_preload_as(el, "script")
}

#[must_use]
pub fn is_preload_style(el: &ElementRef) -> bool {
    is_link_preload_as(el, "style")
}

// === Rule Tables ===

/// Removed when `script` is enabled.
pub static SCRIPT_RULES: &[Rule] = &[is_plain_script, is_preload_script];

/// Removed when `ldJson` is enabled.
pub static LD_JSON_RULES: &[Rule] = &[is_ld_json_script];

/// Removed when `style` is enabled.
pub static STYLE_RULES: &[Rule] = &[is_style, is_link_stylesheet, is_preload_style];

/// Removed when `template` is enabled.
pub static TEMPLATE_RULES: &[Rule] = &[is_template];
