//! Inventory mode: every distinct package name in a tree.
//!
//! No advisory list is involved and versions are discarded.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::IgnoreConfig;
use crate::discovery::{discover_projects, project_file};
use crate::error::ScanError;
use crate::scanner::{all_extractors, names_or_empty};

/// Collects package names from every project under `root`.
///
/// The result is sorted and deduplicated.
///
/// # Errors
///
/// Returns [`ScanError::InvalidRoot`] if `root` is not a directory.
pub fn collect_inventory(root: &Path, ignore: &IgnoreConfig) -> Result<Vec<String>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::InvalidRoot(root.to_path_buf()));
    }

    let projects = discover_projects(root, ignore);
    let names = inventory_projects(&projects);
    info!(projects = projects.len(), packages = names.len(), "inventory finished");
    Ok(names)
}

/// Collects package names from the given project directories.
pub fn inventory_projects(projects: &[PathBuf]) -> Vec<String> {
    let extractors = all_extractors();
    let mut found = BTreeSet::new();

    for dir in projects {
        for extractor in &extractors {
            let path = project_file(dir, extractor.file_name());
            if path.is_file() {
                found.extend(names_or_empty(extractor.as_ref(), &path));
            }
        }
    }

    found.into_iter().collect()
}
