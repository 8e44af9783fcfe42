//! uf-dims: dimension algebra for unitflow.
//!
//! Provides:
//! - `FundamentalDimension`: identity-unique basis axes (length, time, ...)
//! - `Composition`: a dimension as a vector of rational exponents over axes
//! - `Dimension`: named, identity-unique handles wrapping a composition
//! - `DimensionBuilder`: folds dimensions raised to exponents into a new one
//!
//! Two dimensions are *commensurable* when they are the same handle or their
//! compositions agree on every non-zero exponent.
//!
//! # Example
//!
//! ```
//! use uf_core::Exponent;
//! use uf_dims::{DimensionBuilder, FundamentalDimension};
//!
//! let length = FundamentalDimension::mint("length", "L").dimension();
//! let time = FundamentalDimension::mint("time", "T").dimension();
//!
//! let velocity = DimensionBuilder::new()
//!     .named("velocity")
//!     .symbol("v")
//!     .times(&length)?
//!     .per(&time)?
//!     .create();
//! let also_velocity = length.divide(&time)?;
//!
//! assert_ne!(velocity, also_velocity);
//! assert!(velocity.is_commensurable(&also_velocity));
//! assert_eq!(velocity.composition().exponent(time.as_fundamental().unwrap()), Exponent::MINUS_ONE);
//! # Ok::<(), uf_dims::DimensionError>(())
//! ```

pub mod builder;
pub mod composition;
pub mod dimension;
pub mod error;

// Re-exports for ergonomics
pub use builder::DimensionBuilder;
pub use composition::Composition;
pub use dimension::{Dimension, FundamentalDimension};
pub use error::{DimensionError, DimensionResult};
