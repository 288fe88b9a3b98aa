//! Error types for the fc-scanner crate.

use camino::Utf8PathBuf;

/// Errors that can occur during file discovery.
///
/// # Error Recovery Strategy
///
/// - **Walker errors** ([`ScanError::Walk`]): fatal - propagate immediately
/// - **Read errors** ([`ScanError::Read`]): surfaced to the driver, which
///   applies the configured strictness
///
/// # Examples
///
/// ```
/// use fc_scanner::ScanError;
///
/// let err = ScanError::config("search root does not exist: /tmp/x");
/// assert!(err.to_string().contains("/tmp/x"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Failed to walk a directory.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    Read {
        /// The path of the file that couldn't be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid walker configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A path is not valid UTF-8.
    ///
    /// This crate uses UTF-8 paths throughout. If a non-UTF-8 path is
    /// encountered, it cannot be processed.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),
}

impl ScanError {
    /// Creates a new [`ScanError::Read`] error.
    #[inline]
    pub fn read(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`ScanError::Config`] error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns the file path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::Read { path, .. } => Some(path),
            Self::Walk(_) | Self::Config(_) | Self::NonUtf8Path(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_read_error_carries_path() {
        let err = ScanError::read(
            "app/User.php",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.path().map(|p| p.as_str()), Some("app/User.php"));
        assert!(err.to_string().contains("app/User.php"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ScanError::config("bad root");
        assert_eq!(err.to_string(), "invalid configuration: bad root");
        assert!(err.path().is_none());
    }
}
