//! Domain types for the factory converter.
//!
//! - [`FileKind`] - The processing category assigned to a discovered file
//! - [`Phase`] - The ordered phases of a migration run

use serde::{Deserialize, Serialize};

/// The processing category assigned to a discovered file.
///
/// Each file is visited by at most one category's conversion pass per run.
/// Location-based categories take precedence over the content-based
/// [`CallSite`](FileKind::CallSite) scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// A legacy closure-factory definition; produces a class factory and an
    /// update to the associated model.
    Factory,
    /// A legacy seeder; gains the `Database\Seeders` namespace.
    Seeder,
    /// Any other file containing a legacy `factory(` invocation.
    CallSite,
}

impl FileKind {
    /// Human-readable label for logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Factory => "factory",
            Self::Seeder => "seeder",
            Self::CallSite => "call-site",
        }
    }
}

/// A phase of the migration, in execution order.
///
/// Phases run strictly in sequence; a later phase may depend on filesystem
/// state left by an earlier one (the conversion phases read from the
/// holding directory created by [`Phase::FileRelocation`]). The first
/// failing phase halts the run. Completed phases are not rolled back.
///
/// # Examples
///
/// ```
/// use fc_core::Phase;
///
/// assert_eq!(Phase::ManifestUpdate.number(), 1);
/// assert_eq!(Phase::ManifestUpdate.next(), Some(Phase::FileRelocation));
/// assert_eq!(Phase::SeederConversion.next(), None);
/// assert_eq!(Phase::ALL.len(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Remove the legacy classmap entries from `composer.json` and add the
    /// new PSR-4 namespace mappings.
    ManifestUpdate,
    /// Move the legacy factory files into the holding directory.
    FileRelocation,
    /// Create the class-factory and seeder target directories.
    DirectoryCreation,
    /// Convert each held factory into a class factory and update its model.
    FactoryAndModelConversion,
    /// Rewrite `factory(...)` invocations across the search roots.
    CallSiteConversion,
    /// Relocate and namespace the seeders.
    SeederConversion,
}

impl Phase {
    /// All phases in execution order.
    pub const ALL: [Self; 6] = [
        Self::ManifestUpdate,
        Self::FileRelocation,
        Self::DirectoryCreation,
        Self::FactoryAndModelConversion,
        Self::CallSiteConversion,
        Self::SeederConversion,
    ];

    /// The 1-based position of this phase, used in progress output.
    #[must_use]
    pub const fn number(self) -> usize {
        match self {
            Self::ManifestUpdate => 1,
            Self::FileRelocation => 2,
            Self::DirectoryCreation => 3,
            Self::FactoryAndModelConversion => 4,
            Self::CallSiteConversion => 5,
            Self::SeederConversion => 6,
        }
    }

    /// Human-readable description emitted before the phase runs.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ManifestUpdate => "Updating composer.json",
            Self::FileRelocation => "Moving legacy factories to the holding directory",
            Self::DirectoryCreation => "Creating target directories",
            Self::FactoryAndModelConversion => "Converting factories and models",
            Self::CallSiteConversion => "Converting factory call sites",
            Self::SeederConversion => "Converting seeders",
        }
    }

    /// The phase that follows this one, or `None` after the last phase.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::ManifestUpdate => Some(Self::FileRelocation),
            Self::FileRelocation => Some(Self::DirectoryCreation),
            Self::DirectoryCreation => Some(Self::FactoryAndModelConversion),
            Self::FactoryAndModelConversion => Some(Self::CallSiteConversion),
            Self::CallSiteConversion => Some(Self::SeederConversion),
            Self::SeederConversion => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order_is_contiguous() {
        for (index, phase) in Phase::ALL.iter().enumerate() {
            assert_eq!(phase.number(), index + 1);
        }
    }

    #[test]
    fn test_phase_next_chain_visits_all() {
        let mut current = Some(Phase::ManifestUpdate);
        let mut visited = Vec::new();

        while let Some(phase) = current {
            visited.push(phase);
            current = phase.next();
        }

        assert_eq!(visited, Phase::ALL);
    }

    #[test]
    fn test_file_kind_labels() {
        assert_eq!(FileKind::Factory.label(), "factory");
        assert_eq!(FileKind::Seeder.label(), "seeder");
        assert_eq!(FileKind::CallSite.label(), "call-site");
    }

    #[test]
    fn test_phase_serde_round_trip() {
        let json = serde_json::to_string(&Phase::CallSiteConversion).unwrap();
        assert_eq!(json, "\"call_site_conversion\"");
        let parsed: Phase = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Phase::CallSiteConversion);
    }
}
