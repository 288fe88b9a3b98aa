//! Directory traversal for PHP files.
//!
//! This module provides [`FileWalker`], which uses the `ignore` crate to
//! walk a search root while respecting `.gitignore` patterns, collecting
//! the `.php` files the conversion phases operate on.
//!
//! Traversal is strictly single-threaded; the migration processes files
//! sequentially and in a deterministic order, so collected paths are
//! sorted before they are returned.

use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;

use crate::error::ScanError;

/// Directories never worth descending into for a Laravel project.
const SKIP_DIRECTORIES: &[&str] = &["vendor", "node_modules", ".git", "storage"];

/// A file walker that discovers PHP files under a search root.
///
/// # Examples
///
/// ```ignore
/// use fc_scanner::FileWalker;
/// use camino::Utf8Path;
///
/// let walker = FileWalker::new(Utf8Path::new("/project/app"))?;
/// for path in walker.collect_paths()? {
///     println!("Found: {path}");
/// }
/// ```
#[derive(Debug)]
pub struct FileWalker {
    /// The root directory to walk.
    root: Utf8PathBuf,
}

impl FileWalker {
    /// Creates a walker for the given root directory.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Config`] if the root does not exist or is not
    /// a directory.
    pub fn new(root: &Utf8Path) -> Result<Self, ScanError> {
        if !root.exists() {
            return Err(ScanError::config(format!(
                "search root does not exist: {root}"
            )));
        }
        if !root.is_dir() {
            return Err(ScanError::config(format!(
                "search root is not a directory: {root}"
            )));
        }

        Ok(Self {
            root: root.to_owned(),
        })
    }

    /// Collects every PHP file under the root, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Walk`] if traversal fails and
    /// [`ScanError::NonUtf8Path`] for a path that is not valid UTF-8.
    pub fn collect_paths(&self) -> Result<Vec<Utf8PathBuf>, ScanError> {
        let mut paths = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(true)
            .follow_links(false)
            .threads(1)
            .require_git(false)
            .build();

        for result in walker {
            let entry = result?;

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let utf8_path =
                Utf8Path::from_path(path).ok_or_else(|| ScanError::NonUtf8Path(path.to_owned()))?;

            if !is_php_file(utf8_path) || should_skip_path(utf8_path) {
                continue;
            }

            paths.push(utf8_path.to_owned());
        }

        paths.sort();
        Ok(paths)
    }

    /// Returns the root directory being walked.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

/// Checks if a path is a PHP file based on extension.
fn is_php_file(path: &Utf8Path) -> bool {
    path.extension() == Some("php")
}

/// Checks if any path component names a skipped directory.
fn should_skip_path(path: &Utf8Path) -> bool {
    path.components()
        .any(|component| SKIP_DIRECTORIES.contains(&component.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_is_php_file() {
        assert!(is_php_file(Utf8Path::new("UserFactory.php")));
        assert!(is_php_file(Utf8Path::new("database/seeds/Seeder.php")));
        assert!(!is_php_file(Utf8Path::new("composer.json")));
        assert!(!is_php_file(Utf8Path::new("script.sh")));
        assert!(!is_php_file(Utf8Path::new("php")));
    }

    #[test]
    fn test_should_skip_path() {
        assert!(should_skip_path(Utf8Path::new("vendor/laravel/src/Model.php")));
        assert!(should_skip_path(Utf8Path::new("storage/framework/views/x.php")));
        assert!(should_skip_path(Utf8Path::new("app/vendor/x.php")));
        assert!(!should_skip_path(Utf8Path::new("app/Models/User.php")));
        assert!(!should_skip_path(Utf8Path::new("tests/Feature/UserTest.php")));
    }

    #[test]
    fn test_missing_root_is_config_error() {
        let result = FileWalker::new(Utf8Path::new("/definitely/not/here"));
        assert!(matches!(result, Err(ScanError::Config(_))));
    }

    #[test]
    fn test_collects_sorted_php_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();

        fs::create_dir_all(root.join("sub").as_std_path()).unwrap();
        fs::create_dir_all(root.join("vendor").as_std_path()).unwrap();
        fs::write(root.join("b.php").as_std_path(), "<?php\n").unwrap();
        fs::write(root.join("a.php").as_std_path(), "<?php\n").unwrap();
        fs::write(root.join("sub/c.php").as_std_path(), "<?php\n").unwrap();
        fs::write(root.join("notes.txt").as_std_path(), "skip me").unwrap();
        fs::write(root.join("vendor/d.php").as_std_path(), "<?php\n").unwrap();

        let walker = FileWalker::new(root).unwrap();
        let paths = walker.collect_paths().unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().as_str())
            .collect();

        assert_eq!(names, vec!["a.php", "b.php", "sub/c.php"]);
    }
}
