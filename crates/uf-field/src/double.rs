//! Double-precision backend.
//!
//! Values are plain `f64`. Text is parsed with Rust's `f64` grammar
//! (decimal or scientific notation, `inf`/`NaN` accepted) and rounded to
//! nearest. Rational powers with denominator 1 or 2 go through `powi`/`sqrt`;
//! other roots use `powf` on the magnitude, and even roots of negative values
//! are unsupported.

use core::cmp::Ordering;
use std::sync::LazyLock;

use uf_core::{Exponent, FactoryId, Real};

use crate::error::{FieldError, FieldResult};
use crate::field::{next_factory_id, unsupported, Factory, Field};

const BACKEND: &str = "double";

// Every double factory produces identical values, so all share one id.
static DOUBLE_ID: LazyLock<FactoryId> = LazyLock::new(next_factory_id);

impl Field for Real {
    fn negate(&self) -> Self {
        -self
    }

    fn reciprocal(&self) -> FieldResult<Self> {
        if self.is_zero() {
            return Err(FieldError::DivisionByZero);
        }
        Ok(1.0 / self)
    }

    // Correctly rounded, unlike multiplying by the reciprocal.
    fn divide(&self, rhs: &Self) -> FieldResult<Self> {
        if rhs.is_zero() {
            return Err(FieldError::DivisionByZero);
        }
        Ok(self / rhs)
    }

    fn add(&self, rhs: &Self) -> Self {
        self + rhs
    }

    fn multiply(&self, rhs: &Self) -> Self {
        self * rhs
    }

    fn power(&self, exponent: &Self) -> FieldResult<Self> {
        if self.is_zero() && *exponent < 0.0 {
            return Err(FieldError::DivisionByZero);
        }
        let result = self.powf(*exponent);
        if result.is_nan() && !self.is_nan() && !exponent.is_nan() {
            return Err(FieldError::Undefined { what: "power" });
        }
        Ok(result)
    }

    fn power_exponent(&self, exponent: Exponent) -> FieldResult<Self> {
        if exponent.is_zero() {
            return Ok(1.0);
        }
        if exponent.is_one() {
            return Ok(*self);
        }
        let num = exponent.numerator();
        let den = exponent.denominator();
        if den == 1 {
            if num < 0 && self.is_zero() {
                return Err(FieldError::DivisionByZero);
            }
            return Ok(self.powi(num));
        }
        if *self < 0.0 && den % 2 == 0 {
            return Err(unsupported(BACKEND, "even root of a negative value"));
        }
        if num < 0 && self.is_zero() {
            return Err(FieldError::DivisionByZero);
        }
        if den == 2 {
            return Ok(self.sqrt().powi(num));
        }
        // odd root: carry the sign through the magnitude
        let magnitude = self.abs().powf(f64::from(num) / f64::from(den));
        if *self < 0.0 && num % 2 != 0 {
            Ok(-magnitude)
        } else {
            Ok(magnitude)
        }
    }

    fn logarithm(&self, base: &Self) -> FieldResult<Self> {
        if *self <= 0.0 {
            return Err(FieldError::Undefined {
                what: "logarithm of a non-positive value",
            });
        }
        if *base <= 0.0 || *base == 1.0 {
            return Err(FieldError::Undefined {
                what: "logarithm base",
            });
        }
        if *base == 10.0 {
            return Ok(self.log10());
        }
        if *base == 2.0 {
            return Ok(self.log2());
        }
        Ok(self.ln() / base.ln())
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.partial_cmp(other)
            .unwrap_or_else(|| self.total_cmp(other))
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }
}

/// Factory for the double-precision backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoubleFactory {
    id: FactoryId,
}

impl Default for DoubleFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl DoubleFactory {
    /// A double factory. All instances share one identity, so results cached
    /// for one are reused by every other.
    pub fn new() -> Self {
        Self { id: *DOUBLE_ID }
    }

    /// Same as [`DoubleFactory::new`]; reads better at call sites that only
    /// need "the" double backend.
    pub fn shared() -> Self {
        Self::new()
    }
}

impl Factory for DoubleFactory {
    type Value = Real;

    fn id(&self) -> FactoryId {
        self.id
    }

    fn name(&self) -> &'static str {
        BACKEND
    }

    fn zero(&self) -> Real {
        0.0
    }

    fn one(&self) -> Real {
        1.0
    }

    fn of_int(&self, value: i64) -> Real {
        value as Real
    }

    fn of_str(&self, text: &str) -> FieldResult<Real> {
        text.trim()
            .parse::<Real>()
            .map_err(|_| FieldError::NumberFormat {
                input: text.to_string(),
            })
    }
}
