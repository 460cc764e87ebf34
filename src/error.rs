//! Error types for html-slim.
//!
//! Every error here is a configuration error: it is raised while options are
//! resolved, before any HTML is parsed. Parsing itself never fails.

use std::path::PathBuf;

/// Error type for option resolution and configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `tag` or `attr` pattern is not a valid regular expression.
    #[error("invalid {option} pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// Option the pattern was given for (`tag` or `attr`).
        option: &'static str,
        /// The offending pattern source.
        pattern: String,
        /// Underlying regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// The `selector` option is not a supported CSS selector.
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector {
        /// The offending selector source.
        selector: String,
        /// What the selector parser stumbled over.
        reason: String,
    },

    /// A configuration document could not be deserialized.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A configuration file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for html-slim operations.
pub type Result<T> = std::result::Result<T, Error>;
