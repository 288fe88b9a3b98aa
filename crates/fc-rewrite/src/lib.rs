//! Regex rewrite rules and file converters for laravel-factory-convert.
//!
//! This crate is the conversion engine: pure text-in/text-out
//! transformations plus the external formatter hook. It performs no
//! project filesystem I/O; the driver in `fc-migrate` reads and writes
//! files around these functions.
//!
//! # Overview
//!
//! - [`rules`]: the pattern rewriter - ordered regex find/replace rules,
//!   including the call-site rule set
//! - [`factory`]: legacy factory parsing and class-factory rendering
//! - [`model`]: `HasFactory` trait insertion for model files
//! - [`seeder`]: seeder namespacing (with embedded call-site rules)
//! - [`Formatter`]: the opaque external code-style hook
//!
//! # Precision
//!
//! Everything here is regular-expression substitution over whole file
//! contents. There is no PHP parser, so a `factory(...)` string inside a
//! comment or string literal is rewritten like any other match. That
//! matches the legacy converter's behavior and is a documented limit, not
//! an oversight.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod factory;
mod formatter;
pub mod model;
pub mod rules;
pub mod seeder;

mod error;

pub use error::RewriteError;
pub use factory::FactoryDefinition;
pub use formatter::Formatter;
pub use rules::{RewriteRule, RuleSet, call_site_rules};
