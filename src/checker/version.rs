//! Version specifier normalization.

/// Prefix characters that carry range intent but no version content.
const RANGE_PREFIXES: [char; 2] = ['^', '~'];

/// Strips the leading run of `^`/`~` characters and surrounding whitespace.
///
/// Only the leading run is removed; a `^` or `~` inside the version is kept.
/// A specifier made only of prefix characters normalizes to an empty string,
/// which never matches an advisory entry.
///
/// # Example
///
/// ```
/// use lockwatch::checker::normalize_version;
///
/// assert_eq!(normalize_version("^1.2.3"), "1.2.3");
/// assert_eq!(normalize_version("~~1.0.0-rc~1"), "1.0.0-rc~1");
/// assert_eq!(normalize_version("^~"), "");
/// ```
pub fn normalize_version(version: &str) -> &str {
    version
        .trim_start()
        .trim_start_matches(RANGE_PREFIXES)
        .trim()
}
