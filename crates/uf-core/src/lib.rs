//! uf-core: stable foundation for unitflow.
//!
//! Contains:
//! - exponent (reduced rational powers used by every dimension/unit operation)
//! - ids (identity tokens and the fundamental-axis registry)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod exponent;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{UfError, UfResult};
pub use exponent::Exponent;
pub use ids::*;
pub use numeric::*;
