//! uf-field: numeric backends and deferred scalar arithmetic for unitflow.
//!
//! Provides:
//! - The `Field` contract every numeric representation implements
//! - The `Factory` contract that mints field values and identifies a backend
//! - A double-precision backend (`DoubleFactory`, `f64`)
//! - `Scalar`: dimensionless arithmetic described symbolically and evaluated
//!   against a factory on demand
//! - `Memo`: the per-node, per-factory particularization cache
//!
//! # Example
//!
//! ```
//! use uf_field::{DoubleFactory, Scalar};
//!
//! let factory = DoubleFactory::new();
//! let s = Scalar::of(3).multiply(&Scalar::of(4)).add(&Scalar::of(1));
//! assert_eq!(s.using(&factory).unwrap(), 13.0);
//! ```

pub mod double;
pub mod error;
pub mod field;
pub mod memo;
pub mod scalar;

// Re-exports for ergonomics
pub use double::DoubleFactory;
pub use error::{FieldError, FieldResult};
pub use field::{next_factory_id, Factory, Field};
pub use memo::Memo;
pub use scalar::Scalar;
