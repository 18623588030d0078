use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{DeclaredDependency, DependencySource};

/// A declared dependency whose version is on the advisory list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub source: DependencySource,
    pub file_path: PathBuf,
    pub package_name: String,
    pub raw_version: String,
}

impl Finding {
    pub fn source_kind(&self) -> &'static str {
        self.source.label()
    }
}

impl From<&DeclaredDependency> for Finding {
    fn from(dep: &DeclaredDependency) -> Self {
        Self {
            source: dep.source,
            file_path: dep.file_path.clone(),
            package_name: dep.name.clone(),
            raw_version: dep.raw_version.clone(),
        }
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {}@{}",
            self.source_kind(),
            self.file_path.display(),
            self.package_name,
            self.raw_version
        )
    }
}

/// Results of scanning one directory tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan_time: DateTime<Utc>,
    pub root: PathBuf,
    pub projects: Vec<PathBuf>,
    pub findings: Vec<Finding>,
    /// Findings dropped by the configured ignore list.
    pub suppressed: usize,
}

impl ScanReport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            scan_time: Utc::now(),
            root: root.into(),
            projects: Vec::new(),
            findings: Vec::new(),
            suppressed: 0,
        }
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_display_line() {
        let dep = DeclaredDependency::new(
            "evil-pkg",
            "~2.2.0",
            DependencySource::Manifest,
            "app/package.json",
        );
        let finding = Finding::from(&dep);
        assert_eq!(
            finding.to_string(),
            "package.json | app/package.json | evil-pkg@~2.2.0"
        );
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(DependencySource::Manifest.label(), "package.json");
        assert_eq!(DependencySource::LockV1.label(), "package-lock.json (v1)");
        assert_eq!(DependencySource::LockV2.label(), "package-lock.json (v2)");
    }

    #[test]
    fn test_report_starts_empty() {
        let report = ScanReport::new(".");
        assert!(!report.has_findings());
        assert_eq!(report.suppressed, 0);
        assert!(report.projects.is_empty());
    }
}
