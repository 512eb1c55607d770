//! Configuration validation.
//!
//! # Responsibilities
//! - Check the content directory exists
//! - Validate the metrics path
//! - Warn about a missing fallback document
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: StaticConfig → Result<(), Vec<ValidationError>>
//! - A missing `index.html` is a warning, the server still starts

use std::path::{Path, PathBuf};

use crate::config::schema::{StaticConfig, INDEX_FILE};

/// A semantic problem with an otherwise well-formed configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The content directory does not exist.
    MissingContentDir(PathBuf),
    /// The metrics path is not absolute.
    InvalidMetricsPath(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingContentDir(dir) => {
                write!(f, "{:?} cannot be hosted: directory does not exist", dir)
            }
            ValidationError::InvalidMetricsPath(path) => {
                write!(f, "metrics path {:?} must start with '/'", path)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a configuration before the server is built.
pub fn validate_config(config: &StaticConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.content.dir.exists() {
        errors.push(ValidationError::MissingContentDir(config.content.dir.clone()));
    }

    // Addresses are resolved at bind time, host names and `:port` included.
    if config.observability.metrics_enabled && !config.observability.metrics_path.starts_with('/') {
        errors.push(ValidationError::InvalidMetricsPath(
            config.observability.metrics_path.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Peek whether the fallback document exists in `dir`.
///
/// Returns a human readable warning when it is missing.
pub fn check_index_document(dir: &Path) -> Option<String> {
    if dir.join(INDEX_FILE).exists() {
        None
    } else {
        Some(format!("cannot find {:?} in {}", INDEX_FILE, dir.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StaticConfig::default();
        config.content.dir = dir.path().to_path_buf();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = StaticConfig::default();
        config.content.dir = PathBuf::from("/definitely/not/here");
        config.observability.metrics_enabled = true;
        config.observability.metrics_path = "metrics".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ValidationError::MissingContentDir(_)));
        assert!(matches!(errors[1], ValidationError::InvalidMetricsPath(_)));
    }

    #[test]
    fn test_metrics_settings_ignored_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StaticConfig::default();
        config.content.dir = dir.path().to_path_buf();
        config.observability.metrics_path = "garbage".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_accepts_port_shorthand_and_host_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StaticConfig::default();
        config.content.dir = dir.path().to_path_buf();
        config.listener.bind_address = ":8080".into();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "localhost:9090".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_index_document_warning() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_index_document(dir.path()).is_some());

        std::fs::write(dir.path().join(INDEX_FILE), "<html></html>").unwrap();
        assert!(check_index_document(dir.path()).is_none());
    }
}
