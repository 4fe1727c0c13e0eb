//! Error and result types for the GiST support engine.

use thiserror::Error;

/// Errors raised by the split engine and the consistency dispatcher.
///
/// Data problems such as NaN coordinates or inverted boxes are not errors;
/// they are absorbed by the float8 order and the size conventions. What is
/// left is caller misuse (empty input, a bad configuration, an operator code
/// outside the closed set) and broken internal invariants.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GistError {
    #[error("cannot operate on an empty entry set")]
    EmptyInput,

    #[error("picksplit needs at least two entries, got {0}")]
    TooFewEntries(usize),

    #[error("unrecognized strategy number: {0}")]
    UnrecognizedStrategy(u16),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for GiST support operations
pub type GistResult<T> = Result<T, GistError>;
