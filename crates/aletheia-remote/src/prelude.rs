//! Prelude module - commonly used types for convenient import.
//!
//! Use `use aletheia_remote::prelude::*;` to import all essential types.

pub use crate::{HttpRemoteClient, RemoteAuthority, RemoteConfig, RemoteOutcome, RemoteTimeouts};
