//! PHP file discovery and classification for laravel-factory-convert.
//!
//! This crate finds the files a migration run operates on:
//!
//! - [`FileWalker`]: single-threaded directory traversal respecting
//!   `.gitignore`, filtered to `.php` files, deterministic order
//! - [`classify`]: assigns each file at most one [`FileKind`](fc_core::FileKind)
//!   per run, with directory-based classification taking precedence over
//!   the `factory(` content scan

#![deny(clippy::all)]
#![warn(missing_docs)]

mod classifier;
mod error;
mod walker;

pub use classifier::{LEGACY_INVOCATION, classify};
pub use error::ScanError;
pub use walker::FileWalker;
