//! Aletheia Patterns - Versioned, named pattern catalogs.
//!
//! A [`PatternCatalog`] groups compiled [`PatternRule`]s into five
//! categories. Action gates consult the destructive, high-risk-command and
//! sensitive-path sets; the prompt classifier consults the two topic sets.
//!
//! Matching is case-insensitive and unanchored: a rule matches when its
//! pattern occurs anywhere in the text.
//!
//! # Example
//!
//! ```
//! use aletheia_patterns::{PatternCatalog, PatternCategory};
//!
//! let catalog = PatternCatalog::builtin().unwrap();
//! assert!(catalog.matches_any("rm -rf /", PatternCategory::Destructive));
//! assert!(!catalog.matches_any("ls -la", PatternCategory::HighRiskCommand));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod builtin;
mod catalog;
mod error;
mod rule;

pub use builtin::BUILTIN_VERSION;
pub use catalog::{CatalogBuilder, PatternCatalog};
pub use error::{PatternError, PatternResult};
pub use rule::{PatternCategory, PatternRule, RuleSpec, Severity};
