//! Field arithmetic errors.

use thiserror::Error;
use uf_core::UfError;

/// Result type for field operations.
pub type FieldResult<T> = Result<T, FieldError>;

/// Failures raised by a numeric backend. They propagate unchanged through
/// scalars, expressions and measures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Reciprocal (or division) of zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// The operation has no value for these inputs (e.g. log of a negative).
    #[error("Undefined result for {what}")]
    Undefined { what: &'static str },

    /// The backend cannot represent the result exactly enough to be trusted.
    #[error("Operation not supported by {backend}: {what}")]
    Unsupported {
        backend: &'static str,
        what: &'static str,
    },

    /// Numeric text the backend could not parse.
    #[error("Invalid number format: {input:?}")]
    NumberFormat { input: String },

    /// Exponent arithmetic failure while evaluating a rational power.
    #[error(transparent)]
    Exponent(#[from] UfError),
}
