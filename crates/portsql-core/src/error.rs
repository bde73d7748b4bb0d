//! Error types for query validation, compilation, and registration.

use thiserror::Error;

/// Errors produced while validating or compiling a query IR.
#[derive(Debug, Error)]
pub enum QueryError {
    /// An AST invariant was violated.
    #[error("validation error: {0}")]
    Validation(String),

    /// An expression cannot be compiled for the target dialect.
    #[error("unsupported expression: {0}")]
    UnsupportedExpression(String),

    /// A named-query registration was rejected.
    #[error("registration error: {0}")]
    Registration(String),
}

/// Result type alias for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
