//! JSON configuration files.
//!
//! [`Config`] mirrors the option table with its conventional camel-case
//! names (`ldJson`, `selector` / `select`). Every field is optional so that
//! several sources can be layered with [`Config::merge`] before being turned
//! into [`Options`].
//!
//! ```json
//! {
//!   "script": true,
//!   "ldJson": false,
//!   "attr": "^data-v-",
//!   "selector": "body > header"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::options::Options;

/// Partial option set as read from a file or assembled by a front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<bool>,
    #[serde(default, alias = "ldjson", alias = "ld_json", skip_serializing_if = "Option::is_none")]
    pub ld_json: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<bool>,
    /// Case-insensitive regex source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Case-insensitive regex source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr: Option<String>,
    #[serde(default, alias = "select", skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<bool>,
}

impl Config {
    /// Parse a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Layer `other` on top of `self`: fields set in `other` win.
    #[must_use]
    pub fn merge(self, other: Config) -> Config {
        Config {
            script: other.script.or(self.script),
            ld_json: other.ld_json.or(self.ld_json),
            style: other.style.or(self.style),
            comment: other.comment.or(self.comment),
            template: other.template.or(self.template),
            tag: other.tag.or(self.tag),
            attr: other.attr.or(self.attr),
            selector: other.selector.or(self.selector),
            space: other.space.or(self.space),
        }
    }

    /// Fill unset fields from [`Options::default`].
    ///
    /// Patterns are not compiled here; that happens in [`crate::Slimmer::new`].
    #[must_use]
    pub fn into_options(self) -> Options {
        let defaults = Options::default();
        Options {
            script: self.script.unwrap_or(defaults.script),
            ld_json: self.ld_json.unwrap_or(defaults.ld_json),
            style: self.style.unwrap_or(defaults.style),
            comment: self.comment.unwrap_or(defaults.comment),
            template: self.template.unwrap_or(defaults.template),
            tag: self.tag.map(Into::into),
            attr: self.attr.map(Into::into),
            selector: self.selector,
            space: self.space.unwrap_or(defaults.space),
            hooks: None,
        }
    }
}
