//! Configuration structures for the factory converter.
//!
//! This module provides the configuration types consumed by every phase of
//! the migration:
//!
//! - [`ProjectPaths`] - Every path the migration touches, derived once from
//!   the project root
//! - [`ConvertOptions`] - Output options (doc blocks, formatter hook)
//! - [`Strictness`] - How failures of non-critical filesystem operations
//!   are handled
//! - [`MigrationConfig`] - Root configuration combining all settings
//!
//! Configuration is constructed once by the caller and passed by reference
//! to each phase. Nothing in this module is mutated after construction.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How failures of non-critical filesystem operations are handled.
///
/// The migration has two named fatal errors (missing manifest, empty
/// relocation) that abort the run at either level. Everything else -
/// directory creation, the seeds rename, holding-directory removal - is
/// governed by this setting.
///
/// # Examples
///
/// ```
/// use fc_core::Strictness;
///
/// assert_eq!(Strictness::default(), Strictness::BestEffort);
/// assert!(!Strictness::BestEffort.is_strict());
/// assert!(Strictness::Strict.is_strict());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// Log a warning for each failed operation and continue.
    ///
    /// This reproduces the legacy converter's unchecked shell calls, except
    /// that every failure is at least visible in the log.
    #[default]
    BestEffort,
    /// Treat any failed filesystem operation as fatal.
    Strict,
}

impl Strictness {
    /// Returns `true` if failures should abort the run.
    #[inline]
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Every filesystem location the migration reads or writes.
///
/// All paths are derived from the project root exactly once, at
/// construction. Phases receive this struct by reference and never mutate
/// it, so a path observed in phase 6 is the same path that was logged in
/// phase 1.
///
/// # Examples
///
/// ```
/// use fc_core::ProjectPaths;
/// use camino::Utf8Path;
///
/// let paths = ProjectPaths::new(Utf8Path::new("/project"));
/// assert_eq!(paths.manifest, "/project/composer.json");
/// assert_eq!(paths.legacy_factories, "/project/database/factories");
/// assert_eq!(paths.new_seeders, "/project/database/Seeders");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPaths {
    /// The project root (the directory containing `composer.json`).
    pub root: Utf8PathBuf,

    /// The composer manifest, `<root>/composer.json`.
    pub manifest: Utf8PathBuf,

    /// The pre-Laravel-8 factory directory, `<root>/database/factories`.
    pub legacy_factories: Utf8PathBuf,

    /// Temporary holding directory for legacy factories during conversion,
    /// `<root>/database/old-factories`.
    pub holding: Utf8PathBuf,

    /// The class-factory target directory, `<root>/database/Factories`.
    pub new_factories: Utf8PathBuf,

    /// The pre-Laravel-8 seed directory, `<root>/database/seeds`.
    pub legacy_seeds: Utf8PathBuf,

    /// The namespaced seeder target directory, `<root>/database/Seeders`.
    pub new_seeders: Utf8PathBuf,

    /// Directories searched for legacy `factory(...)` call sites.
    ///
    /// `app`, `database` and `tests` under the root. Roots that do not
    /// exist in a given project are skipped at scan time.
    pub call_site_roots: Vec<Utf8PathBuf>,
}

impl ProjectPaths {
    /// Derives all migration paths from the project root.
    #[must_use]
    pub fn new(root: &Utf8Path) -> Self {
        let database = root.join("database");

        Self {
            root: root.to_owned(),
            manifest: root.join("composer.json"),
            legacy_factories: database.join("factories"),
            holding: database.join("old-factories"),
            new_factories: database.join("Factories"),
            legacy_seeds: database.join("seeds"),
            new_seeders: database.join("Seeders"),
            call_site_roots: vec![root.join("app"), database, root.join("tests")],
        }
    }

    /// Validates that the root exists and is a directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDirectory`] if the root does not
    /// exist, or [`ConfigError::NotADirectory`] if it is a file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.root.exists() {
            return Err(ConfigError::MissingDirectory(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(ConfigError::NotADirectory(self.root.clone()));
        }
        Ok(())
    }
}

/// Options controlling the generated and rewritten output.
///
/// # Examples
///
/// ```
/// use fc_core::ConvertOptions;
///
/// let options = ConvertOptions::default();
/// assert!(!options.without_doc_blocks);
/// assert!(!options.format);
/// assert_eq!(options.formatter_command, "php-cs-fixer fix");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Omit explanatory doc blocks from generated factory classes.
    pub without_doc_blocks: bool,

    /// Run the external formatter over every written file.
    pub format: bool,

    /// The formatter command line; the file path is appended as the final
    /// argument.
    pub formatter_command: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            without_doc_blocks: false,
            format: false,
            formatter_command: "php-cs-fixer fix".to_owned(),
        }
    }
}

/// Root configuration for a migration run.
///
/// Constructed once by the CLI (or a test harness) and passed by reference
/// to every phase.
///
/// # Examples
///
/// ```
/// use fc_core::MigrationConfig;
/// use camino::Utf8Path;
///
/// let config = MigrationConfig::new(Utf8Path::new("/project"));
/// assert_eq!(config.paths.root, "/project");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Filesystem locations.
    pub paths: ProjectPaths,

    /// Output options.
    pub options: ConvertOptions,

    /// Failure policy for non-critical filesystem operations.
    pub strictness: Strictness,
}

impl MigrationConfig {
    /// Creates a configuration with default options for the given root.
    #[must_use]
    pub fn new(root: &Utf8Path) -> Self {
        Self {
            paths: ProjectPaths::new(root),
            options: ConvertOptions::default(),
            strictness: Strictness::default(),
        }
    }

    /// Replaces the convert options.
    #[must_use]
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the strictness level.
    #[must_use]
    pub const fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_paths_derivation() {
        let paths = ProjectPaths::new(Utf8Path::new("/srv/app"));

        assert_eq!(paths.manifest, "/srv/app/composer.json");
        assert_eq!(paths.legacy_factories, "/srv/app/database/factories");
        assert_eq!(paths.holding, "/srv/app/database/old-factories");
        assert_eq!(paths.new_factories, "/srv/app/database/Factories");
        assert_eq!(paths.legacy_seeds, "/srv/app/database/seeds");
        assert_eq!(paths.new_seeders, "/srv/app/database/Seeders");
    }

    #[test]
    fn test_call_site_roots() {
        let paths = ProjectPaths::new(Utf8Path::new("/srv/app"));

        assert_eq!(
            paths.call_site_roots,
            vec![
                Utf8PathBuf::from("/srv/app/app"),
                Utf8PathBuf::from("/srv/app/database"),
                Utf8PathBuf::from("/srv/app/tests"),
            ]
        );
    }

    #[test]
    fn test_validate_missing_root() {
        let paths = ProjectPaths::new(Utf8Path::new("/nonexistent/project"));
        assert!(matches!(
            paths.validate(),
            Err(ConfigError::MissingDirectory(_))
        ));
    }

    #[test]
    fn test_convert_options_defaults() {
        let options = ConvertOptions::default();
        assert!(!options.without_doc_blocks);
        assert!(!options.format);
        assert_eq!(options.formatter_command, "php-cs-fixer fix");
    }

    #[test]
    fn test_strictness_serde_round_trip() {
        let json = serde_json::to_string(&Strictness::Strict).unwrap();
        assert_eq!(json, "\"strict\"");
        let parsed: Strictness = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Strictness::Strict);
    }

    #[test]
    fn test_config_builders() {
        let config = MigrationConfig::new(Utf8Path::new("/p"))
            .with_strictness(Strictness::Strict)
            .with_options(ConvertOptions {
                without_doc_blocks: true,
                ..ConvertOptions::default()
            });

        assert!(config.strictness.is_strict());
        assert!(config.options.without_doc_blocks);
    }
}
