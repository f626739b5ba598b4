//! Subcommand implementations.

pub(crate) mod config;
pub(crate) mod hook;
pub(crate) mod inspect;
