//! Character encoding detection for byte input.
//!
//! Order of precedence: a byte order mark, then a `<meta>` charset
//! declaration in the first 1024 bytes, then UTF-8. Decoding is lossy;
//! malformed sequences become U+FFFD.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, X_USER_DEFINED, WINDOWS_1252};
use log::trace;

use crate::patterns::{META_CHARSET, META_CONTENT_TYPE};

/// Bytes examined by the `<meta>` prescan.
pub const PRESCAN_LIMIT: usize = 1024;

/// Detect the encoding of an HTML byte stream.
///
/// # Example
///
/// ```rust
/// use html_slim::encoding::detect_encoding;
///
/// let html = br#"<meta charset="windows-1251"><p>x</p>"#;
/// assert_eq!(detect_encoding(html).name(), "windows-1251");
/// ```
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }
    prescan_meta(html).unwrap_or(UTF_8)
}

/// Charset named by a `<meta>` tag near the start of the document.
///
/// A declared UTF-16 variant means UTF-8 (the bytes could not have been
/// read as ASCII otherwise), and `x-user-defined` means windows-1252.
#[must_use]
pub fn prescan_meta(html: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&html[..html.len().min(PRESCAN_LIMIT)]);

    let label = META_CHARSET
        .captures(&head)
        .or_else(|| META_CONTENT_TYPE.captures(&head))
        .and_then(|caps| caps.get(1))?;

    let encoding = Encoding::for_label(label.as_str().as_bytes())?;
    Some(if encoding == UTF_16LE || encoding == UTF_16BE {
        UTF_8
    } else if encoding == X_USER_DEFINED {
        WINDOWS_1252
    } else {
        encoding
    })
}

/// Decode HTML bytes to a string using [`detect_encoding`].
#[must_use]
pub fn decode_html(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    // `decode` strips a BOM itself and lets it override `encoding`.
    let (decoded, used, had_errors) = encoding.decode(html);
    if had_errors {
        trace!("malformed {} input replaced with U+FFFD", used.name());
    }
    decoded.into_owned()
}
