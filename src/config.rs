//! Configuration file handling.
//!
//! This module provides loading and saving of lockwatch configuration
//! from a TOML file.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/lockwatch/config.toml`
//! - macOS: `~/Library/Application Support/lockwatch/config.toml`
//! - Windows: `%APPDATA%\lockwatch\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! advisory_file = "bad-packages.txt"
//! default_format = "text"
//! fail_on_findings = false
//! log_level = "warn"
//!
//! [ignore]
//! packages = ["@internal/*"]
//! paths = ["node_modules", ".git"]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ScanError;

/// Conventional advisory list name, resolved against the working directory.
pub const DEFAULT_ADVISORY_FILE: &str = "bad-packages.txt";

/// Application configuration.
///
/// Every field has a default, so a partial file (or no file) is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the advisory list.
    ///
    /// Default: `bad-packages.txt`
    pub advisory_file: PathBuf,

    /// Output format when no `--format` flag is provided.
    ///
    /// Valid values: "text", "table", "json"
    /// Default: "text"
    pub default_format: String,

    /// Exit with a distinct status when findings are present.
    ///
    /// Default: false
    pub fail_on_findings: bool,

    /// Log level used when `RUST_LOG` is not set.
    ///
    /// Default: "warn"
    pub log_level: String,

    #[serde(default)]
    pub ignore: IgnoreConfig,
}

/// Suppression rules for findings and discovery.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Package names whose findings are suppressed.
    ///
    /// Supports glob patterns (e.g., "lodash*", "@types/*").
    pub packages: Vec<String>,

    /// Directory names that discovery does not descend into.
    ///
    /// Supports glob patterns (e.g., "node_modules", ".*").
    pub paths: Vec<String>,
}

impl IgnoreConfig {
    /// Check if findings for a package should be suppressed.
    pub fn should_ignore_package(&self, name: &str) -> bool {
        matches_any(&self.packages, name)
    }

    /// Check if a directory should be skipped during discovery.
    pub fn should_ignore_dir(&self, dir_name: &str) -> bool {
        matches_any(&self.paths, dir_name)
    }
}

fn matches_any(patterns: &[String], text: &str) -> bool {
    patterns.iter().any(|pattern| {
        if pattern.contains('*') {
            glob_match(pattern, text)
        } else {
            pattern == text
        }
    })
}

/// Simple glob matching (supports * as wildcard).
fn glob_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();

    if parts.len() == 1 {
        return pattern == text;
    }

    // Prefix and suffix must not overlap, so "ab*ba" rejects "aba".
    let first = parts[0];
    let last = parts[parts.len() - 1];
    if text.len() < first.len() + last.len() || !text.starts_with(first) || !text.ends_with(last)
    {
        return false;
    }

    let mut remaining = &text[first.len()..text.len() - last.len()];

    for part in &parts[1..parts.len() - 1] {
        if part.is_empty() {
            continue;
        }
        match remaining.find(part) {
            Some(pos) => remaining = &remaining[pos + part.len()..],
            None => return false,
        }
    }

    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            advisory_file: PathBuf::from(DEFAULT_ADVISORY_FILE),
            default_format: "text".to_string(),
            fail_on_findings: false,
            log_level: "warn".to_string(),
            ignore: IgnoreConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Loads configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content).map_err(|e| ScanError::Config {
            path: path.to_path_buf(),
            reason: e.message().to_string(),
        })?;
        Ok(config)
    }

    /// Saves the configuration to the default config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    ///
    /// # Example
    ///
    /// ```
    /// use lockwatch::Config;
    ///
    /// let path = Config::config_path();
    /// assert!(path.ends_with("lockwatch/config.toml"));
    /// ```
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lockwatch")
            .join("config.toml")
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}
