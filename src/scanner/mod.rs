//! Dependency extractors for npm project files.
//!
//! Each [`Extractor`] reads one file format from a project directory and
//! returns the dependencies it declares.
//!
//! | Extractor | File | Shapes |
//! |-----------|------|--------|
//! | [`ManifestExtractor`] | `package.json` | `dependencies`, `devDependencies`, `peerDependencies`, `optionalDependencies` |
//! | [`LockfileExtractor`] | `package-lock.json` | `packages` map (v2+), nested `dependencies` tree (v1) |
//!
//! Extraction is fail-open: a missing, unreadable or malformed file
//! contributes nothing and never interrupts a scan. Callers that want the
//! error use [`Extractor::extract`] directly; the scan loop goes through
//! [`extract_or_empty`].
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use lockwatch::scanner::{all_extractors, extract_or_empty};
//!
//! let project = Path::new("./my-app");
//! for extractor in all_extractors() {
//!     let path = project.join(extractor.file_name());
//!     for dep in extract_or_empty(extractor.as_ref(), &path) {
//!         println!("{}: {}@{}", extractor.name(), dep.name, dep.raw_version);
//!     }
//! }
//! ```

mod lockfile;
mod manifest;

pub use lockfile::{LockfileExtractor, LockfileShape, LOCKFILE_NAME};
pub use manifest::{ManifestExtractor, PackageManifest, MANIFEST_NAME};

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ScanError;
use crate::model::DeclaredDependency;

/// Reads declared dependencies from one kind of project file.
pub trait Extractor: Send + Sync {
    /// Human-readable name of this extractor.
    fn name(&self) -> &'static str;

    /// File name this extractor reads inside a project directory.
    fn file_name(&self) -> &'static str;

    /// Extracts (name, version) pairs from the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Read`] or [`ScanError::Parse`] if the file cannot
    /// be read or is not valid JSON of the expected shape.
    fn extract(&self, path: &Path) -> Result<Vec<DeclaredDependency>, ScanError>;

    /// Extracts only package names, including entries without a version.
    fn package_names(&self, path: &Path) -> Result<Vec<String>, ScanError>;
}

/// Returns every extractor, manifest first.
pub fn all_extractors() -> Vec<Box<dyn Extractor>> {
    vec![Box::new(ManifestExtractor), Box::new(LockfileExtractor)]
}

/// Runs `extractor` on `path`, turning any failure into an empty result.
pub fn extract_or_empty(extractor: &dyn Extractor, path: &Path) -> Vec<DeclaredDependency> {
    match extractor.extract(path) {
        Ok(deps) => {
            debug!(path = %path.display(), count = deps.len(), "extracted dependencies");
            deps
        }
        Err(e) => {
            log_skipped(&e);
            Vec::new()
        }
    }
}

/// Like [`extract_or_empty`] but for [`Extractor::package_names`].
pub fn names_or_empty(extractor: &dyn Extractor, path: &Path) -> Vec<String> {
    extractor.package_names(path).unwrap_or_else(|e| {
        log_skipped(&e);
        Vec::new()
    })
}

/// Unreadable files are worth a warning; malformed ones are routine.
fn log_skipped(err: &ScanError) {
    match err {
        ScanError::Read { .. } => warn!(error = %err, "skipping unreadable file"),
        _ => debug!(error = %err, "skipping file"),
    }
}

fn read_file(path: &Path) -> Result<String, ScanError> {
    fs::read_to_string(path).map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses JSON without a nesting limit.
///
/// v1 lockfiles nest one object level per dependency hop, which overruns
/// serde_json's default limit of 128 on real trees. `serde_stacker` grows
/// the stack on demand instead.
fn parse_json<T: DeserializeOwned>(content: &str, path: &Path) -> Result<T, ScanError> {
    let parse_error = |source| ScanError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let mut de = serde_json::Deserializer::from_str(content);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de)).map_err(parse_error)?;
    de.end().map_err(parse_error)?;
    Ok(value)
}
