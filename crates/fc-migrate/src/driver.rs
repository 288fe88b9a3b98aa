//! The migration driver: a strictly sequential phase state machine.
//!
//! [`Migration::run`] executes the six phases in order, emitting a numbered
//! progress line before each one. The first error halts the run; completed
//! phases are not rolled back, so a failed run leaves the filesystem in
//! whatever intermediate state the completed phases produced. That is an
//! accepted limitation of the migration, not a feature.

use std::borrow::Cow;
use std::fs;
use std::io::Write;

use camino::Utf8Path;
use fc_core::{FileKind, MigrationConfig, Phase};
use fc_rewrite::{FactoryDefinition, Formatter, RewriteError, RuleSet, call_site_rules, model, seeder};
use fc_scanner::{FileWalker, ScanError, classify};
use tracing::{debug, info, warn};

use crate::dirs;
use crate::error::MigrateError;
use crate::manifest;

/// A single migration run over one project directory.
///
/// Holds the immutable configuration, the formatter hook, and the progress
/// sink. The run assumes exclusive access to the project directory;
/// concurrent external modification produces undefined results.
///
/// # Examples
///
/// ```ignore
/// use fc_core::MigrationConfig;
/// use fc_migrate::Migration;
/// use camino::Utf8Path;
///
/// let config = MigrationConfig::new(Utf8Path::new("/project"));
/// Migration::new(&config, std::io::stdout()).run()?;
/// ```
#[derive(Debug)]
pub struct Migration<'a, W: Write> {
    config: &'a MigrationConfig,
    formatter: Formatter,
    call_site_rules: RuleSet,
    progress: W,
}

impl<'a, W: Write> Migration<'a, W> {
    /// Creates a migration for the given configuration.
    ///
    /// `progress` receives one numbered human-readable line per phase;
    /// the CLI passes a stdout handle, tests pass a buffer or
    /// [`std::io::sink`].
    #[must_use]
    pub fn new(config: &'a MigrationConfig, progress: W) -> Self {
        Self {
            config,
            formatter: Formatter::from_options(&config.options),
            call_site_rules: call_site_rules(),
            progress,
        }
    }

    /// Runs every phase in order.
    ///
    /// # Errors
    ///
    /// Returns the first phase's error; see [`MigrateError`] for the
    /// fatal/strictness-governed split.
    pub fn run(mut self) -> Result<(), MigrateError> {
        for phase in Phase::ALL {
            // Progress output is best-effort; a closed pipe must not abort
            // the migration itself.
            let _ = writeln!(self.progress, "{}. {}", phase.number(), phase.description());
            info!(phase = ?phase, "starting phase");
            self.run_phase(phase)?;
        }

        Ok(())
    }

    fn run_phase(&mut self, phase: Phase) -> Result<(), MigrateError> {
        let paths = &self.config.paths;
        let strictness = self.config.strictness;

        match phase {
            Phase::ManifestUpdate => manifest::update(&paths.manifest),
            Phase::FileRelocation => {
                dirs::relocate_legacy_factories(paths, strictness).map(|_| ())
            }
            Phase::DirectoryCreation => dirs::create_target_dirs(paths, strictness),
            Phase::FactoryAndModelConversion => self.convert_factories_and_models(),
            Phase::CallSiteConversion => self.convert_call_sites(),
            Phase::SeederConversion => self.convert_seeders(),
        }
    }

    /// Phase 4: convert each held legacy factory into a class factory and
    /// update the associated model, then drop the holding directory.
    fn convert_factories_and_models(&mut self) -> Result<(), MigrateError> {
        let paths = &self.config.paths;
        let walker = FileWalker::new(&paths.holding)?;

        for path in walker.collect_paths()? {
            let Some(contents) = self.read_tolerant(&path)? else {
                continue;
            };

            let definition = match FactoryDefinition::parse(&path, &contents) {
                Ok(definition) => definition,
                Err(error @ RewriteError::UnrecognizedFactory { .. })
                    if !self.config.strictness.is_strict() =>
                {
                    warn!(%path, %error, "skipping unconvertible factory file");
                    continue;
                }
                Err(error) => return Err(error.into()),
            };

            debug!(%path, model = %definition.model_fqcn, "converting factory");

            let target = paths.new_factories.join(definition.factory_file_name());
            let rendered = definition.render(self.config.options.without_doc_blocks);
            fs::write(&target, rendered).map_err(|source| MigrateError::io(&target, source))?;
            self.formatter.format(&target);

            self.update_model(&definition)?;
        }

        dirs::remove_holding_dir(paths, self.config.strictness)
    }

    /// Adds the `HasFactory` trait to the model belonging to a converted
    /// factory. Models that cannot be located or already carry the trait
    /// are left alone.
    fn update_model(&mut self, definition: &FactoryDefinition) -> Result<(), MigrateError> {
        let Some(model_path) = model::model_file_path(&self.config.paths.root, &definition.model_fqcn)
        else {
            warn!(model = %definition.model_fqcn, "model outside the App namespace, not updated");
            return Ok(());
        };

        if !model_path.is_file() {
            debug!(%model_path, "model file not found, skipping trait insertion");
            return Ok(());
        }

        let Some(contents) = self.read_tolerant(&model_path)? else {
            return Ok(());
        };

        match model::add_has_factory(&contents) {
            Some(updated) => {
                fs::write(&model_path, updated)
                    .map_err(|source| MigrateError::io(&model_path, source))?;
                self.formatter.format(&model_path);
                debug!(%model_path, "HasFactory trait added");
            }
            None => debug!(%model_path, "model already uses HasFactory"),
        }

        Ok(())
    }

    /// Phase 5: rewrite legacy `factory(...)` invocations across the
    /// search roots. Files whose contents the rules leave untouched are
    /// not rewritten on disk.
    fn convert_call_sites(&mut self) -> Result<(), MigrateError> {
        let paths = &self.config.paths;

        for root in &paths.call_site_roots {
            if !root.is_dir() {
                debug!(%root, "search root absent, skipping");
                continue;
            }

            let walker = FileWalker::new(root)?;
            for path in walker.collect_paths()? {
                let Some(contents) = self.read_tolerant(&path)? else {
                    continue;
                };

                if classify(&path, &contents, paths) != Some(FileKind::CallSite) {
                    continue;
                }

                if let Cow::Owned(rewritten) = self.call_site_rules.apply(&contents) {
                    fs::write(&path, rewritten)
                        .map_err(|source| MigrateError::io(&path, source))?;
                    self.formatter.format(&path);
                    debug!(%path, "call sites rewritten");
                }
            }
        }

        Ok(())
    }

    /// Phase 6: move the seeds into the new seeder directory and convert
    /// each one in place.
    fn convert_seeders(&mut self) -> Result<(), MigrateError> {
        let paths = &self.config.paths;
        dirs::relocate_seeds(paths, self.config.strictness)?;

        if !paths.new_seeders.is_dir() {
            debug!(path = %paths.new_seeders, "no seeder directory after relocation");
            return Ok(());
        }

        let walker = FileWalker::new(&paths.new_seeders)?;
        for path in walker.collect_paths()? {
            let Some(contents) = self.read_tolerant(&path)? else {
                continue;
            };

            let converted = seeder::convert(&contents);
            if converted != contents {
                fs::write(&path, converted).map_err(|source| MigrateError::io(&path, source))?;
                self.formatter.format(&path);
                debug!(%path, "seeder converted");
            }
        }

        Ok(())
    }

    /// Reads a file, applying the strictness policy to failures: strict
    /// propagates, best-effort warns and returns `None` so the caller can
    /// skip the file.
    fn read_tolerant(&self, path: &Utf8Path) -> Result<Option<String>, MigrateError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(source) if self.config.strictness.is_strict() => {
                Err(ScanError::read(path, source).into())
            }
            Err(source) => {
                warn!(%path, %source, "unreadable file skipped");
                Ok(None)
            }
        }
    }
}
