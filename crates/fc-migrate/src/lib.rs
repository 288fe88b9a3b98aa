//! Manifest update, directory migration, and the phase driver for
//! laravel-factory-convert.
//!
//! # Overview
//!
//! The main entry point is [`Migration`], which sequences the six phases
//! of a run:
//!
//! ```text
//! ManifestUpdate            remove legacy classmap entries, add PSR-4 mappings
//!   -> FileRelocation       database/factories -> database/old-factories
//!   -> DirectoryCreation    create database/Factories and database/Seeders
//!   -> FactoryAndModel      class factories + HasFactory trait insertion
//!   -> CallSiteConversion   factory(X::class[, n]) -> X::factory()[->count(n)]
//!   -> SeederConversion     database/seeds -> database/Seeders + namespacing
//! ```
//!
//! Phases run strictly in sequence on a single thread. The first error
//! halts the run with no rollback of completed phases.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod dirs;
pub mod manifest;

mod driver;
mod error;

pub use driver::Migration;
pub use error::MigrateError;
