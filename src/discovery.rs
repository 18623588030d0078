//! Project discovery.
//!
//! A project is any directory that directly contains a `package.json` or a
//! `package-lock.json`. Discovery walks the whole tree, `node_modules`
//! included, unless a directory name matches `ignore.paths`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::IgnoreConfig;
use crate::scanner::{LOCKFILE_NAME, MANIFEST_NAME};

/// Returns every project directory under `root`, sorted by path string.
///
/// When `root` is `.` the results are relative (`app`, not `./app`), and
/// the root project itself is `.`.
pub fn discover_projects(root: &Path, ignore: &IgnoreConfig) -> Vec<PathBuf> {
    let mut projects = BTreeSet::new();

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_ignored_dir(entry, ignore));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if entry.file_type().is_dir() || !is_project_file(&entry) {
            continue;
        }

        if let Some(parent) = entry.path().parent() {
            projects.insert(tidy_path(root, parent));
        }
    }

    let mut projects: Vec<PathBuf> = projects.into_iter().collect();
    projects.sort_by_cached_key(|p| p.to_string_lossy().into_owned());
    debug!(root = %root.display(), count = projects.len(), "discovered projects");
    projects
}

/// Path of `file_name` inside project `dir`, without a `./` prefix.
pub fn project_file(dir: &Path, file_name: &str) -> PathBuf {
    if dir == Path::new(".") {
        PathBuf::from(file_name)
    } else {
        dir.join(file_name)
    }
}

fn tidy_path(root: &Path, path: &Path) -> PathBuf {
    if root != Path::new(".") {
        return path.to_path_buf();
    }
    match path.strip_prefix(".") {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
        _ => path.to_path_buf(),
    }
}

fn is_project_file(entry: &DirEntry) -> bool {
    matches!(
        entry.file_name().to_str(),
        Some(MANIFEST_NAME) | Some(LOCKFILE_NAME)
    )
}

fn is_ignored_dir(entry: &DirEntry, ignore: &IgnoreConfig) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| ignore.should_ignore_dir(name))
}
