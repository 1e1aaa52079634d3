//! Path-to-name transformation
//!
//! Pure derivation of a candidate chunk name from a request path. `None`
//! anywhere means "no opinion" and the host's default id applies.

use crate::config::NamerConfig;

/// Derive a candidate chunk name from a request path.
///
/// A configured `name_resolver` replaces the built-in derivation wholesale
/// and its return value is used verbatim.
pub fn derive_name(file_path: &str, config: &NamerConfig) -> Option<String> {
    if let Some(resolver) = &config.name_resolver {
        return resolver(file_path);
    }

    let mut module_name = parse_module_name(file_path)?;

    let app_name = if config.multi_app_mode {
        parse_app_name(file_path, config)
    } else {
        None
    };

    match app_name {
        Some(app_name) => {
            // Drop an app-name prefix already baked into the file name so
            // `apps/app1/app1-foo.js` becomes `app1.foo`, not `app1.app1-foo`.
            if let Some(stripped) = module_name.strip_prefix(&format!("{app_name}-")) {
                module_name = stripped.to_string();
            }
            Some(format!("{app_name}.{module_name}"))
        }
        None => Some(module_name),
    }
}

/// Base name of the path with bundler-specific suffixes removed.
///
/// Strips, from the end: a `.js`/`.ts` extension, a `.ngfactory` suffix,
/// and a `.module` suffix. An empty result yields `None`.
fn parse_module_name(file_path: &str) -> Option<String> {
    // Both separators are in play: requests keep whatever style the
    // authoring platform used.
    let base = file_path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_path);

    let mut name = base;
    if let Some(stripped) = name.strip_suffix(".js").or_else(|| name.strip_suffix(".ts")) {
        name = stripped;
    }
    if let Some(stripped) = name.strip_suffix(".ngfactory") {
        name = stripped;
    }
    if let Some(stripped) = name.strip_suffix(".module") {
        name = stripped;
    }

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Extract an application name from the original path, if the active
/// pattern matches. No match is not an error.
fn parse_app_name(file_path: &str, config: &NamerConfig) -> Option<String> {
    let (regex, group) = config.app_name_pattern();

    regex
        .captures(file_path)?
        .get(group)
        .map(|m| m.as_str())
        .filter(|app_name| !app_name.is_empty())
        .map(str::to_string)
}
