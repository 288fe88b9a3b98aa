//! Error types for the fc-core crate.
//!
//! This module provides the [`ConfigError`] type for configuration-related
//! errors shared across the workspace.

use camino::Utf8PathBuf;

/// Errors that can occur during configuration construction and validation.
///
/// # Examples
///
/// ```
/// use fc_core::ConfigError;
/// use camino::Utf8PathBuf;
///
/// let error = ConfigError::MissingDirectory(Utf8PathBuf::from("/some/path"));
/// assert!(error.to_string().contains("/some/path"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configured project root does not exist.
    #[error("directory does not exist: {0}")]
    MissingDirectory(Utf8PathBuf),

    /// The configured project root exists but is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(Utf8PathBuf),

    /// A path is not valid UTF-8.
    ///
    /// The workspace uses UTF-8 paths throughout; a non-UTF-8 working
    /// directory cannot be processed.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotADirectory(Utf8PathBuf::from("/etc/hosts"));
        assert_eq!(err.to_string(), "not a directory: /etc/hosts");
    }

    #[test]
    fn test_non_utf8_display() {
        let err = ConfigError::NonUtf8Path(std::path::PathBuf::from("weird"));
        assert!(err.to_string().contains("weird"));
    }
}
