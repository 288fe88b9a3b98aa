//! CLI entry point for laravel-factory-convert.
//!
//! This binary migrates a Laravel project's factories and seeders from the
//! pre-8 convention to the Laravel 8 one.
//!
//! # Usage
//!
//! ```bash
//! # Convert the project in the current directory
//! factory-convert
//!
//! # Convert another project, without doc blocks, formatting the output
//! factory-convert --directory /path/to/project -w -a
//!
//! # Treat every filesystem failure as fatal
//! factory-convert --strict
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use fc_core::{ConvertOptions, MigrationConfig, Strictness};
use fc_migrate::Migration;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Converts Laravel closure factories and unnamespaced seeders to the
/// Laravel 8 class-based convention.
///
/// Rewrites `database/factories` into `database/Factories`,
/// `database/seeds` into `database/Seeders`, updates `composer.json`, and
/// converts `factory(...)` call sites across `app`, `database` and `tests`.
#[derive(Parser)]
#[command(name = "factory-convert", version, about, long_about = None)]
struct Cli {
    /// Change the working directory.
    #[arg(short, long, default_value = ".", env = "FACTORY_CONVERT_DIRECTORY")]
    directory: Utf8PathBuf,

    /// Omit the explanatory doc blocks from generated factories.
    #[arg(short = 'w', long)]
    without_doc_blocks: bool,

    /// Apply PSR code formatting to every converted file.
    #[arg(short = 'a', long)]
    apply_psr: bool,

    /// The formatter command used with --apply-psr.
    #[arg(long, default_value = "php-cs-fixer fix", env = "FACTORY_CONVERT_FORMATTER")]
    formatter_command: String,

    /// Abort on any failed filesystem operation instead of logging and
    /// continuing.
    #[arg(long)]
    strict: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(level)
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_ansi(use_ansi))
        .with(filter)
        .init();
}

/// Builds a [`MigrationConfig`] from CLI arguments.
///
/// # Errors
///
/// Returns an error if the working directory doesn't exist or isn't a
/// directory.
fn build_config(cli: &Cli) -> color_eyre::Result<MigrationConfig> {
    let directory = normalize(&cli.directory);

    let strictness = if cli.strict {
        Strictness::Strict
    } else {
        Strictness::BestEffort
    };

    let config = MigrationConfig::new(&directory)
        .with_options(ConvertOptions {
            without_doc_blocks: cli.without_doc_blocks,
            format: cli.apply_psr,
            formatter_command: cli.formatter_command.clone(),
        })
        .with_strictness(strictness);

    config
        .paths
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("invalid working directory: {e}"))?;

    Ok(config)
}

/// Expands `.` to the process working directory so logged paths are
/// absolute.
fn normalize(directory: &Utf8Path) -> Utf8PathBuf {
    if directory == "." {
        if let Ok(cwd) = std::env::current_dir() {
            if let Ok(cwd) = Utf8PathBuf::from_path_buf(cwd) {
                return cwd;
            }
        }
    }
    directory.to_owned()
}

/// Application entry point.
fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.no_color);

    let config = build_config(&cli)?;
    info!(root = %config.paths.root, strictness = ?config.strictness, "starting conversion");

    let stdout = std::io::stdout();
    Migration::new(&config, stdout.lock()).run()?;

    info!("conversion complete");
    Ok(())
}
