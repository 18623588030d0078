use crate::error::ScanError;
use crate::model::{DeclaredDependency, DependencySource};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub const MANIFEST_NAME: &str = "package.json";

pub struct ManifestExtractor;

/// The parts of `package.json` that declare dependencies.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub dependencies: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub dev_dependencies: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub peer_dependencies: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub optional_dependencies: Option<BTreeMap<String, String>>,
}

impl PackageManifest {
    pub fn parse(content: &str, path: &Path) -> Result<Self, ScanError> {
        super::parse_json(content, path)
    }

    /// Iterates (name, specifier) over runtime, dev, peer and optional
    /// dependencies, in that order. Absent sections count as empty.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        [
            &self.dependencies,
            &self.dev_dependencies,
            &self.peer_dependencies,
            &self.optional_dependencies,
        ]
        .into_iter()
        .flatten()
        .flat_map(|section| section.iter().map(|(n, v)| (n.as_str(), v.as_str())))
    }

    pub fn into_dependencies(self, path: &Path) -> Vec<DeclaredDependency> {
        self.entries()
            .map(|(name, version)| {
                DeclaredDependency::new(name, version, DependencySource::Manifest, path)
            })
            .collect()
    }
}

impl super::Extractor for ManifestExtractor {
    fn name(&self) -> &'static str {
        "npm manifest"
    }

    fn file_name(&self) -> &'static str {
        MANIFEST_NAME
    }

    fn extract(&self, path: &Path) -> Result<Vec<DeclaredDependency>, ScanError> {
        let content = super::read_file(path)?;
        Ok(PackageManifest::parse(&content, path)?.into_dependencies(path))
    }

    fn package_names(&self, path: &Path) -> Result<Vec<String>, ScanError> {
        let content = super::read_file(path)?;
        let manifest = PackageManifest::parse(&content, path)?;
        Ok(manifest.entries().map(|(name, _)| name.to_string()).collect())
    }
}
