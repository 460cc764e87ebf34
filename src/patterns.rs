//! Compiled regex patterns used by the slimming pass.
//!
//! All patterns are compiled once on first use via `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Attribute Patterns
// =============================================================================

/// Inline event handler attributes (`onclick`, `onload`, ...).
pub static EVENT_HANDLER_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^on\w+$").expect("EVENT_HANDLER_ATTR regex"));

// =============================================================================
// Whitespace Patterns
// =============================================================================

/// Any whitespace run containing at least one newline.
pub static NEWLINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\n+\s*").expect("NEWLINE_RUN regex"));

/// Two or more horizontal spaces or tabs.
pub static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("SPACE_RUN regex"));

/// Trailing whitespace run containing a newline.
pub static TRAILING_NEWLINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\n\s*$").expect("TRAILING_NEWLINE_RUN regex"));

/// Leading whitespace up to and including its last newline.
pub static LEADING_NEWLINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\n").expect("LEADING_NEWLINE_RUN regex"));

// =============================================================================
// Charset Prescan Patterns
// =============================================================================

/// `<meta charset="...">`
pub static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s[^>]*?\bcharset\s*=\s*["']?\s*([^"'\s/>;]+)"#).expect("META_CHARSET regex")
});

/// `<meta http-equiv="Content-Type" content="...; charset=...">`
pub static META_CONTENT_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta\s[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?\bcontent\s*=\s*["'][^"'>]*?charset\s*=\s*([^"'\s>;]+)"#,
    )
    .expect("META_CONTENT_TYPE regex")
});
