//! Directory migration.
//!
//! Pure filesystem operations, no business logic: relocating the legacy
//! factory files into a holding directory, creating the new target
//! directories, moving the seeds, and cleaning up afterwards.
//!
//! Every operation returns an explicit `Result`. The relocation of legacy
//! factories is fatal when it moves nothing (downstream phases assume the
//! holding directory is populated); everything else is routed through
//! [`tolerate`], where the configured [`Strictness`] decides between
//! propagating the failure and logging a warning.

use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use fc_core::{ProjectPaths, Strictness};
use tracing::{debug, warn};

use crate::error::MigrateError;

/// Applies the strictness policy to a non-critical filesystem result.
///
/// Under [`Strictness::Strict`] the failure is promoted to a fatal
/// [`MigrateError::Io`]; under [`Strictness::BestEffort`] it is logged and
/// swallowed. Either way the decision is visible here, not implicit.
pub(crate) fn tolerate(
    result: io::Result<()>,
    strictness: Strictness,
    path: &Utf8Path,
    action: &str,
) -> Result<(), MigrateError> {
    match result {
        Ok(()) => Ok(()),
        Err(source) if strictness.is_strict() => Err(MigrateError::io(path, source)),
        Err(source) => {
            warn!(%path, %source, "{action} failed, continuing");
            Ok(())
        }
    }
}

/// Moves every entry of the legacy factory directory into the holding
/// directory, then removes the emptied legacy directory.
///
/// Returns the number of entries moved.
///
/// # Errors
///
/// Returns [`MigrateError::FilesNotMoved`] when nothing could be moved -
/// the legacy directory is absent, empty, or every rename failed. The
/// conversion phases must not run against an unpopulated holding
/// directory.
pub fn relocate_legacy_factories(
    paths: &ProjectPaths,
    strictness: Strictness,
) -> Result<usize, MigrateError> {
    fs::create_dir_all(&paths.holding)
        .map_err(|source| MigrateError::io(&paths.holding, source))?;

    let mut moved = 0;
    for entry in entries(&paths.legacy_factories) {
        let target = paths.holding.join(entry.file_name().unwrap_or_default());
        match fs::rename(&entry, &target) {
            Ok(()) => moved += 1,
            Err(source) => warn!(from = %entry, to = %target, %source, "rename failed"),
        }
    }

    if moved == 0 {
        return Err(MigrateError::FilesNotMoved {
            from: paths.legacy_factories.clone(),
        });
    }

    debug!(count = moved, "legacy factories moved to holding directory");

    // The new convention has no lowercase factories directory at all.
    tolerate(
        fs::remove_dir(&paths.legacy_factories),
        strictness,
        &paths.legacy_factories,
        "removing legacy factory directory",
    )?;

    Ok(moved)
}

/// Creates the class-factory and seeder target directories.
pub fn create_target_dirs(
    paths: &ProjectPaths,
    strictness: Strictness,
) -> Result<(), MigrateError> {
    for dir in [&paths.new_factories, &paths.new_seeders] {
        tolerate(
            fs::create_dir_all(dir),
            strictness,
            dir,
            "creating target directory",
        )?;
    }
    Ok(())
}

/// Moves every entry of the legacy seed directory into the new seeder
/// directory, then removes the emptied legacy directory.
///
/// A project without a `database/seeds` directory is left alone. This
/// mirrors the legacy converter's unchecked `mv`, so individual failures
/// follow the strictness policy rather than aborting the run.
pub fn relocate_seeds(paths: &ProjectPaths, strictness: Strictness) -> Result<(), MigrateError> {
    if !paths.legacy_seeds.is_dir() {
        debug!(path = %paths.legacy_seeds, "no legacy seed directory, skipping");
        return Ok(());
    }

    for entry in entries(&paths.legacy_seeds) {
        let target = paths.new_seeders.join(entry.file_name().unwrap_or_default());
        tolerate(
            fs::rename(&entry, &target),
            strictness,
            &entry,
            "moving seed file",
        )?;
    }

    tolerate(
        fs::remove_dir(&paths.legacy_seeds),
        strictness,
        &paths.legacy_seeds,
        "removing legacy seed directory",
    )
}

/// Deletes the holding directory once conversion is complete.
pub fn remove_holding_dir(
    paths: &ProjectPaths,
    strictness: Strictness,
) -> Result<(), MigrateError> {
    tolerate(
        fs::remove_dir_all(&paths.holding),
        strictness,
        &paths.holding,
        "removing holding directory",
    )
}

/// Lists a directory's entries as UTF-8 paths, skipping anything
/// unreadable. An absent directory yields no entries.
fn entries(dir: &Utf8Path) -> Vec<Utf8PathBuf> {
    let Ok(read_dir) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut found: Vec<Utf8PathBuf> = read_dir
        .filter_map(Result::ok)
        .filter_map(|entry| Utf8PathBuf::from_path_buf(entry.path()).ok())
        .collect();
    found.sort();
    found
}
