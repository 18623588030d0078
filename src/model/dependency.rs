use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The file format a dependency declaration was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencySource {
    /// `package.json`
    Manifest,
    /// `package-lock.json` with a root `dependencies` tree (lockfileVersion 1)
    LockV1,
    /// `package-lock.json` with a flat `packages` map (lockfileVersion 2+)
    LockV2,
}

impl DependencySource {
    /// The label printed in front of each finding.
    pub fn label(&self) -> &'static str {
        match self {
            DependencySource::Manifest => "package.json",
            DependencySource::LockV1 => "package-lock.json (v1)",
            DependencySource::LockV2 => "package-lock.json (v2)",
        }
    }
}

impl std::fmt::Display for DependencySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A dependency as written in a manifest or lockfile.
///
/// `raw_version` is kept exactly as declared (a manifest specifier may still
/// carry `^` or `~`); normalization happens at match time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredDependency {
    pub name: String,
    pub raw_version: String,
    pub source: DependencySource,
    pub file_path: PathBuf,
}

impl DeclaredDependency {
    pub fn new(
        name: impl Into<String>,
        raw_version: impl Into<String>,
        source: DependencySource,
        file_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            raw_version: raw_version.into(),
            source,
            file_path: file_path.into(),
        }
    }
}
