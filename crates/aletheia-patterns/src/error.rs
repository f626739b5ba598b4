//! Pattern catalog error types.

use thiserror::Error;

/// Errors raised while building a [`PatternCatalog`](crate::PatternCatalog).
///
/// All of these are startup-time errors: a catalog that fails to build must
/// never be used.
#[derive(Debug, Error)]
pub enum PatternError {
    /// A rule's matcher is not a valid regular expression.
    #[error("rule '{id}' has an invalid pattern: {source}")]
    Compile {
        /// The rule that failed.
        id: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// A rule's matcher is empty and would match everything.
    #[error("rule '{id}' has an empty pattern")]
    EmptyPattern {
        /// The rule that failed.
        id: String,
    },

    /// Two rules share an identifier.
    #[error("duplicate rule id '{id}'")]
    DuplicateId {
        /// The repeated identifier.
        id: String,
    },

    /// A category name is not recognized.
    #[error("unknown pattern category '{0}'")]
    UnknownCategory(String),

    /// A severity name is not recognized.
    #[error("unknown severity '{0}'")]
    UnknownSeverity(String),
}

/// Result type for pattern operations.
pub type PatternResult<T> = Result<T, PatternError>;
