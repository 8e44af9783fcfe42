//! Dimension algebra errors.

use thiserror::Error;
use uf_core::UfError;

use crate::composition::Composition;

/// Result type for dimension operations.
pub type DimensionResult<T> = Result<T, DimensionError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DimensionError {
    /// Two dimensioned values were combined but their compositions differ.
    #[error("Incommensurable dimensions: {left} vs {right}")]
    Incommensurable {
        left: Composition,
        right: Composition,
    },

    #[error(transparent)]
    Exponent(#[from] UfError),
}
