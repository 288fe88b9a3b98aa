//! Core configuration, domain types, and errors for laravel-factory-convert.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - [`MigrationConfig`] and its parts ([`ProjectPaths`], [`ConvertOptions`],
//!   [`Strictness`]) - built once, passed by reference to every phase
//! - [`Phase`] - the ordered migration phases
//! - [`FileKind`] - the processing category assigned to a discovered file
//! - [`ConfigError`] - configuration validation failures

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{ConvertOptions, MigrationConfig, ProjectPaths, Strictness};
pub use error::ConfigError;
pub use types::{FileKind, Phase};
