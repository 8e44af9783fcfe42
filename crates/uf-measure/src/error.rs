//! Measurement errors.

use thiserror::Error;
use uf_dims::DimensionError;
use uf_field::FieldError;
use uf_units::UnitError;

/// Result type for expression, measure and scale operations.
pub type MeasureResult<T> = Result<T, MeasureError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasureError {
    #[error(transparent)]
    Dimension(#[from] DimensionError),

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error(transparent)]
    Field(#[from] FieldError),

    /// A committed measure was used in an expression particularized against
    /// a backend with a different value type.
    #[error("Measure holds {found} values, expression particularized as {expected}")]
    FieldMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl MeasureError {
    /// True for the incommensurable-dimension failure kind, whichever layer
    /// raised it.
    pub fn is_incommensurable(&self) -> bool {
        match self {
            MeasureError::Dimension(DimensionError::Incommensurable { .. }) => true,
            MeasureError::Unit(err) => err.is_incommensurable(),
            _ => false,
        }
    }
}
