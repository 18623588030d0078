//! Advisory list loading and lookup.
//!
//! The advisory list is a plain text file with one package per line:
//!
//! ```text
//! left-pad=1.0.0||1.0.1
//! evil-pkg = =2.2.0 || 2.2.1
//! ```
//!
//! Everything before the first `=` is the package name. The rest is split on
//! `||`; each piece is trimmed and loses any leading `=` characters. Blank
//! lines and lines without `=` are ignored. When a name appears on more than
//! one line the last line wins outright; version lists are not merged.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use super::version::normalize_version;
use crate::error::ScanError;

/// Separator between accepted versions on one advisory line.
const VERSION_SEPARATOR: &str = "||";

/// Immutable map from package name to its known-bad exact versions.
///
/// Built once per run and shared by reference with every extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvisoryRegistry {
    entries: HashMap<String, BTreeSet<String>>,
}

impl AdvisoryRegistry {
    /// Loads the advisory list from a file.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::AdvisoryLoad`] if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, ScanError> {
        let content = fs::read_to_string(path).map_err(|source| ScanError::AdvisoryLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let registry = Self::parse(&content);
        if registry.is_empty() {
            warn!(path = %path.display(), "advisory list has no entries, nothing can match");
        }
        info!(
            path = %path.display(),
            packages = registry.len(),
            "loaded advisory list"
        );
        Ok(registry)
    }

    /// Parses advisory text. Malformed lines are skipped, never rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use lockwatch::AdvisoryRegistry;
    ///
    /// let registry = AdvisoryRegistry::parse("left-pad=1.0.0||1.0.1");
    /// assert!(registry.is_bad("left-pad", "^1.0.1"));
    /// assert!(!registry.is_bad("left-pad", "1.0.2"));
    /// ```
    pub fn parse(content: &str) -> Self {
        let mut entries = HashMap::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            let Some((name, versions)) = line.split_once('=') else {
                if !line.is_empty() {
                    debug!(line = line_no + 1, "skipping advisory line without '='");
                }
                continue;
            };

            // Each version is trimmed again after its `=` run so `= =1.0.0`
            // still registers `1.0.0`.
            let versions: BTreeSet<String> = versions
                .split(VERSION_SEPARATOR)
                .map(|part| part.trim().trim_start_matches('=').trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect();

            // Later lines replace earlier ones for the same name.
            entries.insert(name.trim().to_string(), versions);
        }

        Self { entries }
    }

    /// True iff `name` is listed and the normalized `version` is one of its
    /// bad versions. Versions are compared as exact strings.
    pub fn is_bad(&self, name: &str, version: &str) -> bool {
        self.entries
            .get(name)
            .is_some_and(|versions| versions.contains(normalize_version(version)))
    }

    /// Returns the bad versions listed for `name`, if any.
    pub fn versions(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(name)
    }

    /// Number of distinct package names on the list.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
