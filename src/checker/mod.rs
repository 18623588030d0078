//! Advisory matching.
//!
//! [`AdvisoryRegistry`] holds the advisory list; the [`Checker`] trait turns
//! extracted dependencies into [`Finding`]s.

mod advisory;
mod version;

pub use advisory::AdvisoryRegistry;
pub use version::normalize_version;

use crate::model::{DeclaredDependency, Finding};

/// Decides which declared dependencies are findings.
pub trait Checker: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns one finding per matching dependency, in input order.
    ///
    /// No deduplication happens here: the same package declared in a
    /// manifest and a lockfile yields two findings.
    fn check(&self, deps: &[DeclaredDependency]) -> Vec<Finding>;
}

impl Checker for AdvisoryRegistry {
    fn name(&self) -> &'static str {
        "Advisory list"
    }

    fn check(&self, deps: &[DeclaredDependency]) -> Vec<Finding> {
        match_dependencies(self, deps)
    }
}

/// Matches dependencies against the registry.
pub fn match_dependencies(
    registry: &AdvisoryRegistry,
    deps: &[DeclaredDependency],
) -> Vec<Finding> {
    deps.iter()
        .filter(|dep| registry.is_bad(&dep.name, &dep.raw_version))
        .map(Finding::from)
        .collect()
}
