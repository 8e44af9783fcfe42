use thiserror::Error;

pub type UfResult<T> = Result<T, UfError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UfError {
    #[error("Invalid exponent: {numerator}/0 has a zero denominator")]
    InvalidExponent { numerator: i64 },

    #[error("Exponent overflow in {what}")]
    Overflow { what: &'static str },

    #[error("Invalid exponent text: {text:?}")]
    ExponentFormat { text: String },
}
