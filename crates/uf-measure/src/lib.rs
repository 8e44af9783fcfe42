//! uf-measure: dimensioned values for unitflow.
//!
//! Provides:
//! - `Expression`: deferred arithmetic on measurements whose unit and
//!   dimension are known (and checked) up front, evaluated against any
//!   numeric backend on demand
//! - `Measure`: a committed backend value in a unit, with rebasing and
//!   commensurability-checked arithmetic and ordering
//! - `Scale` / `Level`: named invertible transforms such as decibels and
//!   Celsius, and values expressed on them
//!
//! # Example
//!
//! ```
//! use uf_field::DoubleFactory;
//! use uf_measure::Expression;
//! use uf_units::{new_fundamental_pair, UnitBuilder};
//!
//! let (_, meter) = new_fundamental_pair("length", "L", "meter", "m");
//! let (_, second) = new_fundamental_pair("time", "T", "second", "s");
//! let km = UnitBuilder::new().symbol("km").as_exactly(1000).of_a(meter.unit()).create()?;
//!
//! let distance = Expression::take(2, &km).add((500, meter.unit()))?;
//! assert!(distance.add((1, second.unit())).is_err());
//!
//! let measured = distance.as_unit(meter.unit())?.using(&DoubleFactory::new())?;
//! assert_eq!(*measured.value(), 2500.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod expression;
pub mod measure;
pub mod scale;

// Re-exports for ergonomics
pub use error::{MeasureError, MeasureResult};
pub use expression::Expression;
pub use measure::Measure;
pub use scale::{Level, Scale};
