//! `package-lock.json` extraction.
//!
//! Two incompatible layouts exist in the wild:
//!
//! ```json
//! { "name": "app", "lockfileVersion": 3,
//!   "packages": { "": { "version": "1.0.0" },
//!                 "node_modules/foo": { "version": "1.2.3" } } }
//! ```
//!
//! ```json
//! { "name": "app", "lockfileVersion": 1,
//!   "dependencies": { "foo": { "version": "1.2.3",
//!                              "dependencies": { "bar": { "version": "0.1.0" } } } } }
//! ```
//!
//! A file with an object-valued `packages` key is read as the flat layout
//! only, even when it also carries the legacy `dependencies` tree.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::ScanError;
use crate::model::{DeclaredDependency, DependencySource};

pub const LOCKFILE_NAME: &str = "package-lock.json";

pub struct LockfileExtractor;

/// The layout of a lockfile, decided once per file.
///
/// Entries are kept as raw JSON so that one malformed entry (a non-string
/// version, an array where a nested tree belongs) is skipped on its own
/// instead of failing the whole file.
#[derive(Debug, Clone)]
pub enum LockfileShape {
    /// lockfileVersion 2+: install path -> package.
    V2 {
        root_name: Option<String>,
        packages: Map<String, Value>,
    },
    /// lockfileVersion 1: name -> node, nested to any depth.
    V1 { dependencies: Map<String, Value> },
    /// Neither root marker is present.
    Unrecognized,
}

impl LockfileShape {
    pub fn parse(content: &str, path: &Path) -> Result<Self, ScanError> {
        let root: Value = super::parse_json(content, path)?;
        Ok(Self::from_value(root))
    }

    pub fn from_value(root: Value) -> Self {
        let Value::Object(mut obj) = root else {
            return Self::Unrecognized;
        };

        if let Some(Value::Object(packages)) = obj.remove("packages") {
            let root_name = obj.get("name").and_then(Value::as_str).map(str::to_string);
            return Self::V2 {
                root_name,
                packages,
            };
        }

        if let Some(Value::Object(dependencies)) = obj.remove("dependencies") {
            return Self::V1 { dependencies };
        }

        Self::Unrecognized
    }

    pub fn source(&self) -> Option<DependencySource> {
        match self {
            Self::V2 { .. } => Some(DependencySource::LockV2),
            Self::V1 { .. } => Some(DependencySource::LockV1),
            Self::Unrecognized => None,
        }
    }

    /// Flattens the lockfile into (name, resolved version) pairs.
    ///
    /// Entries without a string version are skipped. For v1 the tree is
    /// walked with an explicit stack, so output order is not declaration
    /// order.
    pub fn into_dependencies(self, path: &Path) -> Vec<DeclaredDependency> {
        let mut deps = Vec::new();

        match self {
            Self::V2 { root_name, packages } => {
                for (key, package) in &packages {
                    let Some(version) = version_of(package) else {
                        continue;
                    };
                    if let Some(name) = package_name_from_key(key, root_name.as_deref()) {
                        deps.push(DeclaredDependency::new(
                            name,
                            version,
                            DependencySource::LockV2,
                            path,
                        ));
                    }
                }
            }
            Self::V1 { dependencies } => {
                walk_tree(dependencies, |name, node| {
                    if let Some(version) = version_of(node) {
                        deps.push(DeclaredDependency::new(
                            name,
                            version,
                            DependencySource::LockV1,
                            path,
                        ));
                    }
                });
            }
            Self::Unrecognized => {}
        }

        deps
    }

    /// Collects every package name, with or without a version.
    pub fn into_package_names(self) -> Vec<String> {
        let mut names = Vec::new();

        match self {
            Self::V2 { root_name, packages } => {
                names.extend(
                    packages
                        .keys()
                        .filter_map(|key| package_name_from_key(key, root_name.as_deref()))
                        .map(str::to_string),
                );
            }
            Self::V1 { dependencies } => {
                walk_tree(dependencies, |name, _| names.push(name.to_string()));
            }
            Self::Unrecognized => {}
        }

        names
    }
}

/// Non-empty `version` string of a lockfile entry.
fn version_of(entry: &Value) -> Option<&str> {
    entry
        .get("version")
        .and_then(Value::as_str)
        .filter(|v| !v.is_empty())
}

/// Derives a package name from a `packages` key.
///
/// The name is the last path segment, so `node_modules/a/node_modules/b`
/// yields `b`. The empty key is the root project and falls back to the
/// lockfile's top-level `name`.
fn package_name_from_key<'a>(key: &'a str, root_name: Option<&'a str>) -> Option<&'a str> {
    let name = if key.is_empty() {
        root_name?
    } else {
        key.rsplit('/').next().unwrap_or(key)
    };

    (!name.is_empty()).then_some(name)
}

/// Visits every node of a v1 tree as (name, node), depth first.
///
/// Children are only followed when a node's `dependencies` is an object.
fn walk_tree(roots: Map<String, Value>, mut visit: impl FnMut(&str, &Value)) {
    let mut stack: Vec<(String, Value)> = roots.into_iter().collect();

    while let Some((name, mut node)) = stack.pop() {
        let children = node.as_object_mut().and_then(|obj| obj.remove("dependencies"));
        visit(&name, &node);
        if let Some(Value::Object(children)) = children {
            stack.extend(children);
        }
    }
}

impl super::Extractor for LockfileExtractor {
    fn name(&self) -> &'static str {
        "npm lockfile"
    }

    fn file_name(&self) -> &'static str {
        LOCKFILE_NAME
    }

    fn extract(&self, path: &Path) -> Result<Vec<DeclaredDependency>, ScanError> {
        let content = super::read_file(path)?;
        let shape = LockfileShape::parse(&content, path)?;
        match shape.source() {
            Some(layout) => tracing::debug!(path = %path.display(), %layout, "lockfile layout"),
            None => tracing::debug!(path = %path.display(), "unrecognized lockfile layout"),
        }
        Ok(shape.into_dependencies(path))
    }

    fn package_names(&self, path: &Path) -> Result<Vec<String>, ScanError> {
        let content = super::read_file(path)?;
        Ok(LockfileShape::parse(&content, path)?.into_package_names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const V2_LOCK: &str = r#"{
  "name": "my-app",
  "version": "1.0.0",
  "lockfileVersion": 3,
  "packages": {
    "": { "name": "my-app", "version": "1.0.0" },
    "node_modules/foo": { "version": "1.2.3" },
    "node_modules/foo/node_modules/bar": { "version": "0.4.0" },
    "node_modules/@scope/pkg": { "version": "2.0.0" },
    "node_modules/linked": { "resolved": "../linked", "link": true }
  },
  "dependencies": {
    "legacy": { "version": "9.9.9" }
  }
}"#;

    const V1_LOCK: &str = r#"{
  "name": "old-app",
  "lockfileVersion": 1,
  "dependencies": {
    "a": {
      "version": "1.0.0",
      "requires": { "b": "^2.0.0" },
      "dependencies": {
        "b": {
          "version": "2.0.0",
          "dependencies": {
            "c": {
              "version": "3.0.0",
              "dependencies": {
                "d": { "version": "4.0.0" }
              }
            }
          }
        }
      }
    },
    "e": { "dependencies": { "f": { "version": "5.0.0" } } }
  }
}"#;

    fn pairs(deps: &[DeclaredDependency]) -> Vec<(String, String)> {
        let mut pairs: Vec<_> = deps
            .iter()
            .map(|d| (d.name.clone(), d.raw_version.clone()))
            .collect();
        pairs.sort();
        pairs
    }

    fn parse(content: &str) -> LockfileShape {
        LockfileShape::parse(content, Path::new(LOCKFILE_NAME)).unwrap()
    }

    #[test]
    fn test_detect_v2_takes_precedence() {
        let shape = parse(V2_LOCK);
        assert_eq!(shape.source(), Some(DependencySource::LockV2));

        let deps = shape.into_dependencies(Path::new(LOCKFILE_NAME));
        // The legacy "dependencies" tree is not read when "packages" exists.
        assert!(deps.iter().all(|d| d.name != "legacy"));
        assert!(deps.iter().all(|d| d.source == DependencySource::LockV2));
    }

    #[test]
    fn test_v2_names_from_last_segment() {
        let deps = parse(V2_LOCK).into_dependencies(Path::new(LOCKFILE_NAME));
        assert_eq!(
            pairs(&deps),
            vec![
                ("bar".to_string(), "0.4.0".to_string()),
                ("foo".to_string(), "1.2.3".to_string()),
                ("my-app".to_string(), "1.0.0".to_string()),
                ("pkg".to_string(), "2.0.0".to_string()),
            ]
        );
    }

    #[test]
    fn test_v2_root_without_name_is_skipped() {
        let shape = parse(r#"{ "packages": { "": { "version": "1.0.0" }, "node_modules/x/": { "version": "1.0.0" } } }"#);
        assert!(shape.into_dependencies(Path::new(LOCKFILE_NAME)).is_empty());
    }

    #[test]
    fn test_v1_walks_nested_tree() {
        let shape = parse(V1_LOCK);
        assert_eq!(shape.source(), Some(DependencySource::LockV1));

        let deps = shape.into_dependencies(Path::new(LOCKFILE_NAME));
        assert_eq!(
            pairs(&deps),
            vec![
                ("a".to_string(), "1.0.0".to_string()),
                ("b".to_string(), "2.0.0".to_string()),
                ("c".to_string(), "3.0.0".to_string()),
                ("d".to_string(), "4.0.0".to_string()),
                ("f".to_string(), "5.0.0".to_string()),
            ]
        );
    }

    #[test]
    fn test_v1_package_names_include_versionless_nodes() {
        let mut names = parse(V1_LOCK).into_package_names();
        names.sort();
        assert_eq!(names, vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn test_v2_package_names_include_versionless_entries() {
        let mut names = parse(V2_LOCK).into_package_names();
        names.sort();
        assert_eq!(names, vec!["bar", "foo", "linked", "my-app", "pkg"]);
    }

    #[test]
    fn test_unrecognized_shapes() {
        for content in [
            r#"{ "name": "app", "lockfileVersion": 2 }"#,
            r#"{ "packages": [], "dependencies": "nope" }"#,
            r#"[1, 2, 3]"#,
        ] {
            let shape = parse(content);
            assert!(matches!(shape, LockfileShape::Unrecognized));
            assert!(shape.into_dependencies(Path::new(LOCKFILE_NAME)).is_empty());
        }
    }

    #[test]
    fn test_non_object_packages_falls_back_to_v1() {
        let shape = parse(r#"{ "packages": null, "dependencies": { "a": { "version": "1.0.0" } } }"#);
        assert_eq!(shape.source(), Some(DependencySource::LockV1));
    }

    #[test]
    fn test_v1_non_object_children_are_skipped() {
        let shape = parse(
            r#"{ "dependencies": {
                "evil": { "version": "1.0.0" },
                "a": { "version": "1.0.0", "dependencies": [] },
                "b": { "version": "2.0.0", "dependencies": "nope" },
                "c": "not a node"
            } }"#,
        );
        let deps = shape.into_dependencies(Path::new(LOCKFILE_NAME));
        assert_eq!(
            pairs(&deps),
            vec![
                ("a".to_string(), "1.0.0".to_string()),
                ("b".to_string(), "2.0.0".to_string()),
                ("evil".to_string(), "1.0.0".to_string()),
            ]
        );
    }

    #[test]
    fn test_non_string_versions_are_skipped() {
        let v2 = parse(r#"{ "packages": { "node_modules/x": { "version": 1 }, "node_modules/y": { "version": "1.0.0" } } }"#);
        assert_eq!(
            pairs(&v2.into_dependencies(Path::new(LOCKFILE_NAME))),
            vec![("y".to_string(), "1.0.0".to_string())]
        );

        let v1 = parse(r#"{ "dependencies": { "x": { "version": null }, "y": { "version": "1.0.0" } } }"#);
        assert_eq!(
            pairs(&v1.into_dependencies(Path::new(LOCKFILE_NAME))),
            vec![("y".to_string(), "1.0.0".to_string())]
        );
    }

    /// A v1 lockfile whose tree is a single chain `p0 -> p1 -> ... -> p{depth-1}`.
    fn chain_lockfile(depth: usize) -> String {
        let mut node = r#"{"version":"1.0.0"}"#.to_string();
        for i in (1..depth).rev() {
            node = format!(r#"{{"version":"1.0.0","dependencies":{{"p{i}":{node}}}}}"#);
        }
        format!(r#"{{"lockfileVersion":1,"dependencies":{{"p0":{node}}}}}"#)
    }

    #[test]
    fn test_v1_deep_chain_is_fully_walked() {
        let deps = parse(&chain_lockfile(200)).into_dependencies(Path::new(LOCKFILE_NAME));
        assert_eq!(deps.len(), 200);
        assert!(deps.iter().any(|d| d.name == "p0"));
        assert!(deps.iter().any(|d| d.name == "p199"));
    }

    #[test]
    fn test_package_name_from_key() {
        assert_eq!(package_name_from_key("node_modules/foo", None), Some("foo"));
        assert_eq!(package_name_from_key("packages/lib", None), Some("lib"));
        assert_eq!(package_name_from_key("", Some("root")), Some("root"));
        assert_eq!(package_name_from_key("", None), None);
        assert_eq!(package_name_from_key("node_modules/foo/", None), None);
    }
}
