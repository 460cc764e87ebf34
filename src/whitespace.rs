//! Whitespace Normalization
//!
//! Text-level rules applied by the walker when `space` is enabled. The
//! container-level steps (merging adjacent text siblings, clearing a lone
//! blank child) live in [`crate::walker`]; the functions here only rewrite a
//! single payload.

use std::borrow::Cow;

use crate::patterns::{LEADING_NEWLINE_RUN, NEWLINE_RUN, SPACE_RUN, TRAILING_NEWLINE_RUN};

/// Elements whose text formatting is significant.
pub const PRESERVE_ELEMENTS: &[&str] = &["pre", "script", "style", "textarea"];

/// Whether text directly inside `name` keeps its interior whitespace.
#[must_use]
pub fn is_preserved(name: &str) -> bool {
    PRESERVE_ELEMENTS.contains(&name)
}

/// Collapse whitespace in one text payload.
///
/// With `preserve`, only a trailing whitespace run that contains a newline
/// becomes a single `\n`. Otherwise every run containing a newline becomes
/// `\n` and every remaining run of 2+ spaces/tabs becomes one space.
#[must_use]
pub fn collapse(text: &str, preserve: bool) -> Cow<'_, str> {
    if preserve {
        return TRAILING_NEWLINE_RUN.replace(text, "\n");
    }
    match NEWLINE_RUN.replace_all(text, "\n") {
        Cow::Borrowed(text) => SPACE_RUN.replace_all(text, " "),
        Cow::Owned(text) => {
            if SPACE_RUN.is_match(&text) {
                Cow::Owned(SPACE_RUN.replace_all(&text, " ").into_owned())
            } else {
                Cow::Owned(text)
            }
        }
    }
}

/// Non-empty and made only of whitespace.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_whitespace)
}

/// Drop the blank line(s) before the first tag of a document.
#[must_use]
pub fn strip_leading_break(text: &str) -> Cow<'_, str> {
    LEADING_NEWLINE_RUN.replace(text, "")
}
