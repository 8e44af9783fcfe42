//! Unit construction errors.

use thiserror::Error;
use uf_core::UfError;
use uf_dims::DimensionError;

/// Result type for unit operations.
pub type UnitResult<T> = Result<T, UnitError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// The builder was driven through stages that cannot produce a unit
    /// (e.g. a compound factor added to an exactly-scaled unit).
    #[error("Illegal unit builder state: {what}")]
    IllegalBuilderState { what: &'static str },

    #[error(transparent)]
    Dimension(#[from] DimensionError),

    #[error(transparent)]
    Exponent(#[from] UfError),
}

impl UnitError {
    /// True for the incommensurable-dimension failure kind.
    pub fn is_incommensurable(&self) -> bool {
        matches!(
            self,
            UnitError::Dimension(DimensionError::Incommensurable { .. })
        )
    }
}
