//! Core data types for declared dependencies, findings, and scan reports.
//!
//! - [`DeclaredDependency`] - A (name, version) pair read from a manifest or lockfile
//! - [`DependencySource`] - Which file format a dependency was declared in
//! - [`Finding`] - A declared dependency that matches the advisory list
//! - [`ScanReport`] - Complete results of one scan invocation
//!
//! # Example
//!
//! ```
//! use lockwatch::{DeclaredDependency, DependencySource};
//!
//! let dep = DeclaredDependency::new("left-pad", "^1.0.1", DependencySource::Manifest, "app/package.json");
//! assert_eq!(dep.source.label(), "package.json");
//! ```

mod dependency;
mod finding;

pub use dependency::*;
pub use finding::*;
