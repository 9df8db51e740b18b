//! Grammar error types.

use thiserror::Error;

/// Errors raised while compiling builder state into engine DSL.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// A condition violates its structural invariants.
    #[error("invalid condition at position {index}: {reason}")]
    InvalidCondition {
        /// Position of the offending condition within its own list.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// Leaf type not understood by the translator (strict mode only).
    #[error("unknown leaf type '{leaf_type}'")]
    UnknownLeafType {
        /// The leaf type name as given by the caller.
        leaf_type: String,
    },

    /// Configuration could not be parsed or failed validation.
    #[error("invalid grammar configuration: {0}")]
    Config(String),
}

/// Result type alias using GrammarError.
pub type GrammarResult<T> = Result<T, GrammarError>;
