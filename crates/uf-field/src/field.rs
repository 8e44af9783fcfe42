//! The numeric backend contract.

use core::cmp::Ordering;
use core::fmt;

use uf_core::{Exponent, FactoryId, IdAllocator};

use crate::error::{FieldError, FieldResult};

static FACTORY_IDS: IdAllocator = IdAllocator::new();

/// A value of a numeric backend (double, big decimal, complex, ...).
///
/// Implementations are closed under the operations below and totally
/// ordered. Operations that have no correct result must fail (with
/// [`FieldError::DivisionByZero`], [`FieldError::Undefined`] or
/// [`FieldError::Unsupported`]) rather than return an approximation the
/// backend cannot vouch for.
///
/// Implementations must be thread-safe (Send + Sync) so evaluated values can
/// be cached on shared expression trees.
pub trait Field: Clone + fmt::Debug + fmt::Display + Send + Sync + 'static {
    fn negate(&self) -> Self;

    /// Multiplicative inverse; fails with [`FieldError::DivisionByZero`] on zero.
    fn reciprocal(&self) -> FieldResult<Self>;

    fn add(&self, rhs: &Self) -> Self;

    fn multiply(&self, rhs: &Self) -> Self;

    /// Raise to an exponent that is itself a field value.
    fn power(&self, exponent: &Self) -> FieldResult<Self>;

    /// Raise to an exact rational exponent.
    fn power_exponent(&self, exponent: Exponent) -> FieldResult<Self>;

    /// Logarithm of `self` in the given base.
    fn logarithm(&self, base: &Self) -> FieldResult<Self>;

    fn compare(&self, other: &Self) -> Ordering;

    /// True for the additive identity (including any signed zero).
    fn is_zero(&self) -> bool;

    fn subtract(&self, rhs: &Self) -> Self {
        self.add(&rhs.negate())
    }

    fn divide(&self, rhs: &Self) -> FieldResult<Self> {
        Ok(self.multiply(&rhs.reciprocal()?))
    }

    /// Equality as the backend's ordering sees it.
    fn field_eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

/// Mints values of one backend and identifies it.
///
/// The [`FactoryId`] is the factory's identity: particularized results are
/// cached per id, so two factories must only share an id when they produce
/// identical values for identical inputs. Clones keep the id. Backends mint
/// ids with [`next_factory_id`] so they never collide across backends.
pub trait Factory: Clone + Send + Sync + 'static {
    type Value: Field;

    fn id(&self) -> FactoryId;

    /// Short backend name, used in diagnostics.
    fn name(&self) -> &'static str;

    fn zero(&self) -> Self::Value;

    fn one(&self) -> Self::Value;

    fn of_int(&self, value: i64) -> Self::Value;

    /// Parse numeric text. The accepted grammar and rounding are
    /// backend-defined; unparseable input fails with
    /// [`FieldError::NumberFormat`].
    fn of_str(&self, text: &str) -> FieldResult<Self::Value>;

    /// The exact rational `numerator / denominator` of an exponent.
    fn of_exponent(&self, exponent: Exponent) -> FieldResult<Self::Value> {
        let num = self.of_int(i64::from(exponent.numerator()));
        if exponent.is_integer() {
            return Ok(num);
        }
        num.divide(&self.of_int(i64::from(exponent.denominator())))
    }
}

/// A fresh factory identity, distinct from every other one in the process.
///
/// Each id holds its own entry in every cache it reaches, so a backend should
/// mint one per distinct behavior, not one per instance.
pub fn next_factory_id() -> FactoryId {
    FACTORY_IDS.next()
}

/// Error helper for backends that only support a subset of roots.
pub fn unsupported(backend: &'static str, what: &'static str) -> FieldError {
    FieldError::Unsupported { backend, what }
}
