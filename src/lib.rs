//! # lockwatch
//!
//! Audits a directory tree of npm projects for dependencies pinned to
//! versions on a curated advisory list.
//!
//! ```no_run
//! use std::path::Path;
//! use lockwatch::{audit, AdvisoryRegistry, Config};
//!
//! let config = Config::default();
//! let registry = AdvisoryRegistry::load(&config.advisory_file)?;
//! let report = audit::run_scan(Path::new("."), &registry, &config, |_, _, dir| {
//!     println!("Checking {}", dir.display());
//! })?;
//! for finding in &report.findings {
//!     println!("{finding}");
//! }
//! # Ok::<(), lockwatch::ScanError>(())
//! ```

pub mod audit;
pub mod checker;
pub mod config;
pub mod discovery;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod model;
pub mod output;
pub mod scanner;

pub use checker::{AdvisoryRegistry, Checker};
pub use config::Config;
pub use error::ScanError;
pub use model::{DeclaredDependency, DependencySource, Finding, ScanReport};
pub use scanner::Extractor;
