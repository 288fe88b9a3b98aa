//! Error types for the fc-migrate crate.

use camino::Utf8PathBuf;
use fc_rewrite::RewriteError;
use fc_scanner::ScanError;

/// Errors that can occur during a migration run.
///
/// # Error Recovery Strategy
///
/// - [`MigrateError::ManifestMissing`] and [`MigrateError::FilesNotMoved`]
///   are the two named fatal errors: the first aborts before any file is
///   touched, the second before any conversion occurs
/// - Everything else is either fatal (manifest parse, artifact writes) or
///   governed by the configured [`Strictness`](fc_core::Strictness), in
///   which case it only reaches this type under strict mode
///
/// # Examples
///
/// ```
/// use fc_migrate::MigrateError;
/// use camino::Utf8PathBuf;
///
/// let err = MigrateError::ManifestMissing {
///     path: Utf8PathBuf::from("/project/composer.json"),
/// };
/// assert!(err.to_string().contains("composer.json"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// The project root lacks a `composer.json`.
    #[error("composer.json could not be found at {path}")]
    ManifestMissing {
        /// The expected manifest location.
        path: Utf8PathBuf,
    },

    /// The manifest exists but is not valid JSON (or not a JSON object).
    #[error("failed to parse manifest {path}: {source}")]
    ManifestParse {
        /// The manifest location.
        path: Utf8PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// No files could be moved from the legacy factory directory to the
    /// holding directory, so the conversion phases would have nothing to
    /// read.
    #[error("no files were moved from {from} before converting")]
    FilesNotMoved {
        /// The legacy factory directory.
        from: Utf8PathBuf,
    },

    /// A filesystem operation failed.
    #[error("filesystem operation failed on {path}: {source}")]
    Io {
        /// The path the operation targeted.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// File discovery failed.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Content conversion failed.
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
}

impl MigrateError {
    /// Creates a new [`MigrateError::Io`] error.
    #[inline]
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`MigrateError::ManifestParse`] error.
    #[inline]
    pub fn manifest_parse(path: impl Into<Utf8PathBuf>, source: serde_json::Error) -> Self {
        Self::ManifestParse {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_not_moved_display() {
        let err = MigrateError::FilesNotMoved {
            from: Utf8PathBuf::from("/p/database/factories"),
        };
        assert_eq!(
            err.to_string(),
            "no files were moved from /p/database/factories before converting"
        );
    }

    #[test]
    fn test_io_error_carries_path() {
        let err = MigrateError::io(
            "/p/database/Factories/UserFactory.php",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("UserFactory.php"));
    }
}
