//! Composer manifest update.
//!
//! The first migration phase removes the two legacy classmap entries from
//! `composer.json` and registers the new PSR-4 namespace mappings:
//!
//! ```json
//! {
//!     "autoload": {
//!         "psr-4": {
//!             "Database\\Factories\\": "database/Factories/",
//!             "Database\\Seeders\\": "database/Seeders/"
//!         }
//!     }
//! }
//! ```
//!
//! The manifest is written back pretty-printed. `serde_json` never escapes
//! forward slashes, and the `preserve_order` feature keeps unrelated keys
//! in their original order.

use std::fs;

use camino::Utf8Path;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::MigrateError;

/// Classmap entries removed from `autoload.classmap` when present.
const LEGACY_CLASSMAP_ENTRIES: &[&str] = &["database/factories", "database/seeds"];

/// PSR-4 mappings inserted into `autoload."psr-4"`.
const NEW_PSR4_MAPPINGS: &[(&str, &str)] = &[
    ("Database\\Factories\\", "database/Factories/"),
    ("Database\\Seeders\\", "database/Seeders/"),
];

/// Rewrites the manifest at `path` in place.
///
/// # Errors
///
/// Returns [`MigrateError::ManifestMissing`] when the file does not exist
/// (checked before anything else in the run is touched),
/// [`MigrateError::ManifestParse`] for invalid JSON, and
/// [`MigrateError::Io`] for read/write failures.
pub fn update(path: &Utf8Path) -> Result<(), MigrateError> {
    if !path.exists() {
        return Err(MigrateError::ManifestMissing {
            path: path.to_owned(),
        });
    }

    let raw = fs::read_to_string(path).map_err(|source| MigrateError::io(path, source))?;
    let mut manifest: Map<String, Value> =
        serde_json::from_str(&raw).map_err(|source| MigrateError::manifest_parse(path, source))?;

    apply(&mut manifest);

    // to_string_pretty on an in-memory map cannot fail.
    #[allow(clippy::unwrap_used)]
    let mut output = serde_json::to_string_pretty(&manifest).unwrap();
    output.push('\n');

    fs::write(path, output).map_err(|source| MigrateError::io(path, source))?;
    debug!(%path, "manifest updated");
    Ok(())
}

/// Applies the classmap removal and PSR-4 insertion to a parsed manifest.
fn apply(manifest: &mut Map<String, Value>) {
    remove_legacy_classmap(manifest);
    insert_psr4_mappings(manifest);
}

/// Removes the legacy classmap entries, pruning `classmap` and `autoload`
/// entirely when they become empty.
fn remove_legacy_classmap(manifest: &mut Map<String, Value>) {
    let Some(autoload) = manifest.get_mut("autoload").and_then(Value::as_object_mut) else {
        return;
    };

    if let Some(classmap) = autoload.get_mut("classmap").and_then(Value::as_array_mut) {
        classmap.retain(|entry| {
            !entry
                .as_str()
                .is_some_and(|s| LEGACY_CLASSMAP_ENTRIES.contains(&s))
        });

        if classmap.is_empty() {
            autoload.remove("classmap");
        }
    }

    if autoload.is_empty() {
        manifest.remove("autoload");
    }
}

/// Inserts the new namespace-to-directory mappings, creating the
/// `autoload` and `psr-4` sections as needed.
fn insert_psr4_mappings(manifest: &mut Map<String, Value>) {
    let autoload = manifest
        .entry("autoload")
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(autoload) = autoload.as_object_mut() else {
        return;
    };

    let psr4 = autoload
        .entry("psr-4")
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(psr4) = psr4.as_object_mut() else {
        return;
    };

    for (namespace, directory) in NEW_PSR4_MAPPINGS {
        psr4.insert((*namespace).to_owned(), Value::String((*directory).to_owned()));
    }
}
