//! Options schema definitions

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use super::ConfigError;

/// Custom naming callback: raw request path in, chunk name out.
///
/// Returning `None` means "no opinion" and the host falls back to its own
/// default id for that chunk.
pub type NameResolver = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// How picky the namer is about the shape of a chunk's dependency metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// First group only, first block only, exactly one dependency of an
    /// async-import kind
    Strict,

    /// Scan every group; the first block needs at least one dependency,
    /// and synchronous `require` dependencies also qualify
    Lenient,
}

impl Default for Strictness {
    fn default() -> Self {
        Strictness::Strict
    }
}

/// Constructor options for the chunk namer
#[derive(Clone, Default, Deserialize)]
pub struct NamerOptions {
    /// Overrides the default app-name extraction pattern.
    ///
    /// Must contain at least one capture group; the app name is taken from
    /// capture group 1. Only consulted when `multi_app_mode` is on.
    #[serde(default)]
    pub app_name_regex: Option<String>,

    /// Enable app-name extraction and `"{app}."` prefixing
    #[serde(default)]
    pub multi_app_mode: bool,

    /// Dependency-shape check level
    #[serde(default)]
    pub strictness: Strictness,

    /// Replaces the built-in naming wholesale.
    ///
    /// Cannot be combined with `app_name_regex` or `multi_app_mode`; not
    /// representable in declarative configuration.
    #[serde(skip)]
    pub name_resolver: Option<NameResolver>,
}

impl NamerOptions {
    /// Build options from a plugin options table in the bundler config
    pub fn from_table(table: toml::Table) -> Result<Self, ConfigError> {
        Ok(table.try_into()?)
    }
}

impl fmt::Debug for NamerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamerOptions")
            .field("app_name_regex", &self.app_name_regex)
            .field("multi_app_mode", &self.multi_app_mode)
            .field("strictness", &self.strictness)
            .field("name_resolver", &self.name_resolver.as_ref().map(|_| ".."))
            .finish()
    }
}
