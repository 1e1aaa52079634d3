//! Configuration handling for the chunk namer
//!
//! Options are validated once, at construction time. A misconfigured namer
//! never reaches a compilation.

mod schema;

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub use schema::*;

/// Default app-name extraction pattern: a path segment literally named
/// `apps`, a separator, a non-greedy capture, a separator. The app name is
/// capture group 2; group 1 is consumed by the separator alternation.
const DEFAULT_APP_NAME_PATTERN: &str = r"apps(/|\\)(.*?)(/|\\)";

static DEFAULT_APP_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_APP_NAME_PATTERN).expect("default pattern is valid"));

/// Configuration errors, all raised before any compilation runs
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "`app_name_regex` and `multi_app_mode` have no effect when `name_resolver` \
         is also specified; only the resolver would be used to name chunks"
    )]
    ResolverConflict,

    #[error("invalid `app_name_regex`: {0}")]
    InvalidAppNameRegex(#[from] regex::Error),

    #[error("`app_name_regex` must contain at least one capture group")]
    MissingCaptureGroup,

    #[error("invalid namer options: {0}")]
    InvalidOptions(#[from] toml::de::Error),
}

/// Validated namer configuration, immutable for the life of the namer
pub struct NamerConfig {
    pub(crate) multi_app_mode: bool,
    pub(crate) strictness: Strictness,
    pub(crate) name_resolver: Option<NameResolver>,

    /// Custom app-name pattern; `None` means the built-in default
    app_regex: Option<Regex>,
}

impl NamerConfig {
    /// Validate options and build the runtime configuration
    pub fn new(options: NamerOptions) -> Result<Self, ConfigError> {
        if options.name_resolver.is_some()
            && (options.app_name_regex.is_some() || options.multi_app_mode)
        {
            return Err(ConfigError::ResolverConflict);
        }

        let app_regex = match options.app_name_regex.as_deref() {
            Some(pattern) => {
                let regex = Regex::new(pattern)?;
                // captures_len counts the implicit whole-match group 0
                if regex.captures_len() < 2 {
                    return Err(ConfigError::MissingCaptureGroup);
                }
                Some(regex)
            }
            None => None,
        };

        Ok(Self {
            multi_app_mode: options.multi_app_mode,
            strictness: options.strictness,
            name_resolver: options.name_resolver,
            app_regex,
        })
    }

    /// Active app-name pattern and the capture group holding the app name.
    ///
    /// A custom pattern puts the app name in group 1; the default pattern
    /// puts it in group 2.
    pub(crate) fn app_name_pattern(&self) -> (&Regex, usize) {
        match &self.app_regex {
            Some(regex) => (regex, 1),
            None => (&DEFAULT_APP_NAME_REGEX, 2),
        }
    }
}

impl fmt::Debug for NamerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamerConfig")
            .field("multi_app_mode", &self.multi_app_mode)
            .field("strictness", &self.strictness)
            .field("app_regex", &self.app_regex)
            .field("name_resolver", &self.name_resolver.as_ref().map(|_| ".."))
            .finish()
    }
}
