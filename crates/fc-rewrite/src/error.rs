//! Error types for the fc-rewrite crate.

use camino::Utf8PathBuf;

/// Errors that can occur while converting file contents.
///
/// # Error Recovery Strategy
///
/// - [`RewriteError::UnrecognizedFactory`]: recoverable - under best-effort
///   strictness the driver logs a warning and skips the file
///
/// # Examples
///
/// ```
/// use fc_rewrite::RewriteError;
/// use camino::Utf8Path;
///
/// let err = RewriteError::unrecognized_factory(Utf8Path::new("database/old-factories/X.php"));
/// assert!(err.is_recoverable());
/// assert!(err.to_string().contains("X.php"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// A file in the legacy factory directory did not contain a
    /// `$factory->define(...)` registration the converter recognizes.
    #[error("no recognizable factory definition in {path}")]
    UnrecognizedFactory {
        /// The file that could not be converted.
        path: Utf8PathBuf,
    },
}

impl RewriteError {
    /// Creates a new [`RewriteError::UnrecognizedFactory`] error.
    #[inline]
    pub fn unrecognized_factory(path: impl Into<Utf8PathBuf>) -> Self {
        Self::UnrecognizedFactory { path: path.into() }
    }

    /// Returns `true` if conversion of other files can continue.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnrecognizedFactory { .. })
    }

    /// Returns the file path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Utf8PathBuf {
        match self {
            Self::UnrecognizedFactory { path } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_factory_display() {
        let err = RewriteError::unrecognized_factory("old-factories/Broken.php");
        assert_eq!(
            err.to_string(),
            "no recognizable factory definition in old-factories/Broken.php"
        );
        assert_eq!(err.path().as_str(), "old-factories/Broken.php");
    }
}
