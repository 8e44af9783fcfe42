//! uf-si: a minimal SI catalog for unitflow.
//!
//! Everything here is declared through the public builder and expression
//! APIs of the other crates:
//! - `base`: the seven basis axes with their reference units
//! - `dimensions`: base and common derived dimensions
//! - `units`: coherent, prefixed and customary units
//! - `scales`: Celsius, Fahrenheit and decibel scales
//! - `constants`: physical constants as expressions
//! - `interop`: conversion to and from `uom` quantities
//!
//! # Example
//!
//! ```
//! use uf_field::DoubleFactory;
//! use uf_measure::Expression;
//! use uf_si::units::{HOUR, KILOMETER, METER_PER_SECOND};
//!
//! let speed = Expression::take(36, &KILOMETER).divide((1, &*HOUR))?;
//! let mps = speed.as_unit(&METER_PER_SECOND)?.using(&DoubleFactory::shared())?;
//! assert!((mps.value() - 10.0).abs() < 1e-12);
//! # Ok::<(), uf_measure::MeasureError>(())
//! ```

pub mod base;
pub mod constants;
pub mod dimensions;
pub mod interop;
pub mod scales;
pub mod units;

// Re-exports for ergonomics
pub use interop::{from_measure, to_measure, SiQuantity};
