//! Scan orchestration.
//!
//! The advisory registry is built once by the caller and passed in by
//! reference; each project is then scanned independently.

use std::path::Path;

use tracing::info;

use crate::checker::Checker;
use crate::config::Config;
use crate::discovery::{discover_projects, project_file};
use crate::error::ScanError;
use crate::model::{Finding, ScanReport};
use crate::scanner::{all_extractors, extract_or_empty, Extractor};

/// Scans one project directory with the given extractors.
///
/// Manifest findings come before lockfile findings. Missing or malformed
/// files contribute nothing.
pub fn scan_project(
    dir: &Path,
    extractors: &[Box<dyn Extractor>],
    checker: &dyn Checker,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for extractor in extractors {
        let path = project_file(dir, extractor.file_name());
        if !path.is_file() {
            continue;
        }
        let deps = extract_or_empty(extractor.as_ref(), &path);
        findings.extend(checker.check(&deps));
    }

    findings
}

/// Discovers and scans every project under `root`.
///
/// `on_project` is called with (index, total, dir) before each project is
/// scanned, for progress display. Findings for packages on the ignore list
/// are counted in [`ScanReport::suppressed`] instead of being reported.
///
/// # Errors
///
/// Returns [`ScanError::InvalidRoot`] if `root` is not a directory.
pub fn run_scan(
    root: &Path,
    checker: &dyn Checker,
    config: &Config,
    mut on_project: impl FnMut(usize, usize, &Path),
) -> Result<ScanReport, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::InvalidRoot(root.to_path_buf()));
    }

    let mut report = ScanReport::new(root);
    report.projects = discover_projects(root, &config.ignore);
    let extractors = all_extractors();

    let total = report.projects.len();
    for (index, dir) in report.projects.iter().enumerate() {
        on_project(index, total, dir);

        for finding in scan_project(dir, &extractors, checker) {
            if config.ignore.should_ignore_package(&finding.package_name) {
                report.suppressed += 1;
            } else {
                report.findings.push(finding);
            }
        }
    }

    info!(
        checker = checker.name(),
        projects = total,
        findings = report.findings.len(),
        suppressed = report.suppressed,
        "scan finished"
    );

    Ok(report)
}
