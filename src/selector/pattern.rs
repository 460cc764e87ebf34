//! Name Patterns
//!
//! The `tag` and `attr` options accept either a regular-expression source or
//! an already compiled [`Regex`]. Both are resolved once, at configuration
//! time, into a [`NameMatcher`].

use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};

/// A tag-name or attribute-name pattern as given by the caller.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Regular-expression source, compiled when options are resolved.
    Source {
        source: String,
        case_insensitive: bool,
    },
    /// Pre-compiled expression, used as is.
    Compiled(Regex),
}

impl Pattern {
    /// Case-insensitive pattern from a regex source.
    pub fn new(source: impl Into<String>) -> Self {
        Self::Source {
            source: source.into(),
            case_insensitive: true,
        }
    }

    /// Case-sensitive pattern from a regex source.
    pub fn case_sensitive(source: impl Into<String>) -> Self {
        Self::Source {
            source: source.into(),
            case_insensitive: false,
        }
    }

    /// Pattern text for diagnostics.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Source { source, .. } => source,
            Self::Compiled(re) => re.as_str(),
        }
    }

    /// Compile into a matcher. `option` names the option for error messages.
    pub fn compile(&self, option: &'static str) -> Result<NameMatcher> {
        match self {
            Self::Source {
                source,
                case_insensitive,
            } => RegexBuilder::new(source)
                .case_insensitive(*case_insensitive)
                .build()
                .map(NameMatcher)
                .map_err(|err| Error::InvalidPattern {
                    option,
                    pattern: source.clone(),
                    source: err,
                }),
            Self::Compiled(re) => Ok(NameMatcher(re.clone())),
        }
    }
}

impl From<&str> for Pattern {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for Pattern {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}

impl From<Regex> for Pattern {
    fn from(re: Regex) -> Self {
        Self::Compiled(re)
    }
}

/// Compiled name test: unanchored regex search over a tag or attribute name.
#[derive(Debug, Clone)]
pub struct NameMatcher(Regex);

impl NameMatcher {
    #[inline]
    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        self.0.is_match(name)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
