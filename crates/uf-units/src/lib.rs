//! uf-units: units of measurement for unitflow.
//!
//! Provides:
//! - `Unit`: named, identity-unique pairing of a dimension with a symbolic
//!   scale (how many base units one of this unit is)
//! - `FundamentalUnit` and `new_fundamental_pair`: the reference unit of each
//!   basis axis, minted together with the axis
//! - `UnitBuilder`: compound (products/quotients of powers), exact-ratio and
//!   exact-scale construction of derived units
//!
//! Scales are `Scalar`s, so a unit's size can be evaluated in any numeric
//! backend.
//!
//! # Example
//!
//! ```
//! use uf_field::DoubleFactory;
//! use uf_units::{new_fundamental_pair, UnitBuilder};
//!
//! let (_length, meter) = new_fundamental_pair("length", "L", "meter", "m");
//! let kilometer = UnitBuilder::new()
//!     .named("kilometer")
//!     .symbol("km")
//!     .as_exactly(1000)
//!     .of_a(meter.unit())
//!     .create()?;
//!
//! assert!(kilometer.is_commensurable(meter.unit()));
//! assert_eq!(kilometer.scale().using(&DoubleFactory::new())?, 1000.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod error;
pub mod unit;

// Re-exports for ergonomics
pub use builder::UnitBuilder;
pub use error::{UnitError, UnitResult};
pub use unit::{new_fundamental_pair, FundamentalUnit, Unit};
