//! Formatter hook: optional external code-style formatting.
//!
//! When enabled, every written file is handed to an external formatter
//! (by default `php-cs-fixer fix`) as a subprocess. The formatter is an
//! opaque collaborator: a missing binary or a non-zero exit is logged and
//! never fails the migration.

use std::process::Command;

use camino::Utf8Path;
use fc_core::ConvertOptions;
use tracing::{debug, warn};

/// Runs the configured formatter command over converted files.
///
/// # Examples
///
/// ```
/// use fc_core::ConvertOptions;
/// use fc_rewrite::Formatter;
///
/// let formatter = Formatter::from_options(&ConvertOptions::default());
/// assert!(!formatter.is_enabled());
/// ```
#[derive(Debug, Clone)]
pub struct Formatter {
    /// The command split into program and leading arguments; empty when
    /// formatting is disabled.
    command: Vec<String>,
}

impl Formatter {
    /// Builds the hook from the convert options.
    ///
    /// Formatting is disabled when `options.format` is unset or the
    /// configured command is blank.
    #[must_use]
    pub fn from_options(options: &ConvertOptions) -> Self {
        let command = if options.format {
            options
                .formatter_command
                .split_whitespace()
                .map(str::to_owned)
                .collect()
        } else {
            Vec::new()
        };

        Self { command }
    }

    /// Returns `true` if a formatter command is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.command.is_empty()
    }

    /// Formats a single file, appending its path to the configured command.
    ///
    /// Failures (spawn errors, non-zero exit) are logged as warnings; the
    /// file keeps whatever contents were written before the hook ran.
    pub fn format(&self, path: &Utf8Path) {
        let Some((program, args)) = self.command.split_first() else {
            return;
        };

        debug!(%path, program, "running formatter");

        match Command::new(program).args(args).arg(path).output() {
            Ok(output) if output.status.success() => {}
            Ok(output) => {
                warn!(%path, status = %output.status, "formatter exited with failure");
            }
            Err(error) => {
                warn!(%path, %error, "failed to run formatter");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_by_default() {
        let formatter = Formatter::from_options(&ConvertOptions::default());
        assert!(!formatter.is_enabled());
    }

    #[test]
    fn test_enabled_with_flag() {
        let options = ConvertOptions {
            format: true,
            ..ConvertOptions::default()
        };
        let formatter = Formatter::from_options(&options);

        assert!(formatter.is_enabled());
        assert_eq!(formatter.command, vec!["php-cs-fixer", "fix"]);
    }

    #[test]
    fn test_blank_command_disables() {
        let options = ConvertOptions {
            format: true,
            formatter_command: "   ".to_owned(),
            ..ConvertOptions::default()
        };

        assert!(!Formatter::from_options(&options).is_enabled());
    }

    #[test]
    fn test_missing_binary_is_not_fatal() {
        let options = ConvertOptions {
            format: true,
            formatter_command: "definitely-not-a-real-formatter-binary".to_owned(),
            ..ConvertOptions::default()
        };

        // Must not panic or error; the failure is logged and swallowed.
        Formatter::from_options(&options).format(Utf8Path::new("/tmp/whatever.php"));
    }
}
