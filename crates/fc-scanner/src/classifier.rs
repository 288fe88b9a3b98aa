//! File classification.
//!
//! Each discovered file is assigned at most one processing category per
//! run. Directory-based classification wins over the content scan: a file
//! in the holding directory is a factory and a file in the legacy seed
//! directory is a seeder regardless of contents, while everything else is
//! a call site only when its contents mention the legacy `factory(`
//! invocation.

use camino::Utf8Path;
use fc_core::{FileKind, ProjectPaths};

/// The substring that marks a file as containing legacy invocations.
pub const LEGACY_INVOCATION: &str = "factory(";

/// Classifies a discovered file.
///
/// Returns `None` for files the migration does not touch.
///
/// # Examples
///
/// ```
/// use fc_core::{FileKind, ProjectPaths};
/// use fc_scanner::classify;
/// use camino::Utf8Path;
///
/// let paths = ProjectPaths::new(Utf8Path::new("/p"));
/// let kind = classify(
///     Utf8Path::new("/p/tests/UserTest.php"),
///     "factory(App\\User::class)->create();",
///     &paths,
/// );
/// assert_eq!(kind, Some(FileKind::CallSite));
/// ```
#[must_use]
pub fn classify(path: &Utf8Path, contents: &str, paths: &ProjectPaths) -> Option<FileKind> {
    if path.starts_with(&paths.holding) || path.starts_with(&paths.legacy_factories) {
        return Some(FileKind::Factory);
    }

    if path.starts_with(&paths.legacy_seeds) {
        return Some(FileKind::Seeder);
    }

    if contents.contains(LEGACY_INVOCATION) {
        return Some(FileKind::CallSite);
    }

    None
}
