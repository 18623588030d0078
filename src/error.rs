//! Error types.
//!
//! [`ScanError`] covers every failure the library can report. Advisory,
//! config and scan-root errors abort a run; read and parse errors on
//! individual project files are swallowed by the scanners and turned into
//! an empty contribution (see [`crate::scanner::extract_or_empty`]).

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The advisory list could not be read.
    #[error("failed to load advisory list {}: {source}", .path.display())]
    AdvisoryLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A manifest or lockfile could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A manifest or lockfile is not valid JSON of the expected shape.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The config file exists but does not describe a valid configuration.
    #[error("invalid config {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },

    /// The scan root does not exist or is not a directory.
    #[error("scan root is not a directory: {}", .0.display())]
    InvalidRoot(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisory_load_names_the_file() {
        let err = ScanError::AdvisoryLoad {
            path: PathBuf::from("bad-packages.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(
            err.to_string(),
            "failed to load advisory list bad-packages.txt: missing"
        );
    }

    #[test]
    fn test_config_error_message() {
        let err = ScanError::Config {
            path: PathBuf::from("config.toml"),
            reason: "expected a boolean".to_string(),
        };
        assert_eq!(err.to_string(), "invalid config config.toml: expected a boolean");
    }
}
