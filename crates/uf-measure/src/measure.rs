//! Committed measurements: a backend value paired with a unit.

use core::cmp::Ordering;
use core::fmt;

use uf_core::{nearly_equal, Exponent, Real, Tolerances};
use uf_dims::Dimension;
use uf_field::{Factory, Field};
use uf_units::Unit;

use crate::error::MeasureResult;

/// A value of backend `K` expressed in `unit`.
///
/// The measure keeps the factory that produced it so unit conversions can
/// evaluate scale factors in the same backend.
///
/// Equality requires the identical unit and a field-equal value. Ordering
/// ([`Measure::compare`]) only requires commensurable units, so `1 km` and
/// `1000 m` compare equal but are not `==`. For that reason `Measure` does
/// not implement `PartialOrd`.
#[derive(Clone)]
pub struct Measure<K: Factory> {
    value: K::Value,
    unit: Unit,
    factory: K,
}

impl<K: Factory> Measure<K> {
    pub fn new(factory: &K, value: K::Value, unit: &Unit) -> Self {
        Self {
            value,
            unit: unit.clone(),
            factory: factory.clone(),
        }
    }

    pub fn of_int(factory: &K, value: i64, unit: &Unit) -> Self {
        Self::new(factory, factory.of_int(value), unit)
    }

    pub fn value(&self) -> &K::Value {
        &self.value
    }

    pub fn into_value(self) -> K::Value {
        self.value
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn dimension(&self) -> &Dimension {
        self.unit.dimension()
    }

    pub fn factory(&self) -> &K {
        &self.factory
    }

    fn with(&self, value: K::Value, unit: &Unit) -> Self {
        Self::new(&self.factory, value, unit)
    }

    /// The same quantity expressed in `target`.
    pub fn as_unit(&self, target: &Unit) -> MeasureResult<Self> {
        if self.unit == *target {
            return Ok(self.clone());
        }
        let factor = self.unit.conversion_to(target)?.using(&self.factory)?;
        Ok(self.with(self.value.multiply(&factor), target))
    }

    /// Value in base units of the measure's dimension.
    pub fn to_base(&self) -> MeasureResult<K::Value> {
        let scale = self.unit.scale().using(&self.factory)?;
        Ok(self.value.multiply(&scale))
    }

    /// Sum in `self`'s unit; `rhs` is rebased first.
    pub fn add(&self, rhs: &Self) -> MeasureResult<Self> {
        let rhs = rhs.as_unit(&self.unit)?;
        Ok(self.with(self.value.add(&rhs.value), &self.unit))
    }

    pub fn subtract(&self, rhs: &Self) -> MeasureResult<Self> {
        let rhs = rhs.as_unit(&self.unit)?;
        Ok(self.with(self.value.subtract(&rhs.value), &self.unit))
    }

    /// Product; the unit is the literal compound `self.unit · rhs.unit`.
    pub fn multiply(&self, rhs: &Self) -> MeasureResult<Self> {
        let unit = self.unit.multiply(&rhs.unit)?;
        Ok(self.with(self.value.multiply(&rhs.value), &unit))
    }

    pub fn divide(&self, rhs: &Self) -> MeasureResult<Self> {
        let unit = self.unit.divide(&rhs.unit)?;
        let value = self.value.divide(&rhs.value)?;
        Ok(self.with(value, &unit))
    }

    /// Raise value and unit to `exponent`. Roots the backend cannot take
    /// surface its error unchanged.
    pub fn pow(&self, exponent: Exponent) -> MeasureResult<Self> {
        let value = self.value.power_exponent(exponent)?;
        let unit = self.unit.pow(exponent)?;
        Ok(self.with(value, &unit))
    }

    pub fn negate(&self) -> Self {
        self.with(self.value.negate(), &self.unit)
    }

    pub fn reciprocal(&self) -> MeasureResult<Self> {
        let value = self.value.reciprocal()?;
        let unit = self.unit.reciprocal()?;
        Ok(self.with(value, &unit))
    }

    /// Multiply by a dimensionless backend value.
    pub fn scale_by(&self, factor: &K::Value) -> Self {
        self.with(self.value.multiply(factor), &self.unit)
    }

    /// Order two commensurable measures.
    pub fn compare(&self, rhs: &Self) -> MeasureResult<Ordering> {
        if self.unit == rhs.unit {
            return Ok(self.value.compare(&rhs.value));
        }
        self.unit.ensure_commensurable(&rhs.unit)?;
        Ok(self.to_base()?.compare(&rhs.to_base()?))
    }
}

impl<K: Factory<Value = Real>> Measure<K> {
    /// Approximate equality after rebasing `rhs` to `self`'s unit.
    pub fn approx_eq(&self, rhs: &Self, tol: Tolerances) -> MeasureResult<bool> {
        let rhs = rhs.as_unit(&self.unit)?;
        Ok(nearly_equal(self.value, rhs.value, tol))
    }
}

impl<K: Factory> PartialEq for Measure<K> {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit && self.value.field_eq(&other.value)
    }
}

impl<K: Factory> fmt::Display for Measure<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol().is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit.symbol())
        }
    }
}

impl<K: Factory> fmt::Debug for Measure<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Measure")
            .field("value", &self.value)
            .field("unit", &self.unit)
            .field("backend", &self.factory.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uf_field::{DoubleFactory, FieldError};
    use uf_units::{new_fundamental_pair, UnitBuilder};

    use crate::MeasureError;

    struct Fixture {
        f: DoubleFactory,
        meter: Unit,
        second: Unit,
        km: Unit,
    }

    fn fixture() -> Fixture {
        let meter = new_fundamental_pair("length", "L", "meter", "m").1.into_unit();
        let second = new_fundamental_pair("time", "T", "second", "s").1.into_unit();
        let km = UnitBuilder::new()
            .named("kilometer")
            .symbol("km")
            .as_exactly(1000)
            .of_a(&meter)
            .create()
            .unwrap();
        Fixture {
            f: DoubleFactory::new(),
            meter,
            second,
            km,
        }
    }

    #[test]
    fn rebasing() {
        let fx = fixture();
        let d = Measure::new(&fx.f, 2.5, &fx.km);
        let m = d.as_unit(&fx.meter).unwrap();
        assert_eq!(*m.value(), 2500.0);
        assert_eq!(m.unit(), &fx.meter);
        assert_eq!(d.to_base().unwrap(), 2500.0);
        assert!(d.as_unit(&fx.second).unwrap_err().is_incommensurable());
    }

    #[test]
    fn addition_uses_left_unit() {
        let fx = fixture();
        let a = Measure::new(&fx.f, 1.0, &fx.km);
        let b = Measure::new(&fx.f, 500.0, &fx.meter);
        let sum = a.add(&b).unwrap();
        assert_eq!(*sum.value(), 1.5);
        assert_eq!(sum.unit(), &fx.km);
        let diff = b.subtract(&a).unwrap();
        assert_eq!(*diff.value(), -500.0);
        let t = Measure::of_int(&fx.f, 1, &fx.second);
        assert!(a.add(&t).unwrap_err().is_incommensurable());
    }

    #[test]
    fn products_keep_the_literal_compound_unit() {
        let fx = fixture();
        let a = Measure::new(&fx.f, 2.0, &fx.km);
        let b = Measure::new(&fx.f, 3.0, &fx.meter);
        let area = a.multiply(&b).unwrap();
        assert_eq!(*area.value(), 6.0);
        assert_eq!(area.unit().symbol(), "km·m");
        assert_eq!(area.to_base().unwrap(), 6000.0);

        let t = Measure::new(&fx.f, 4.0, &fx.second);
        let speed = a.divide(&t).unwrap();
        assert_eq!(*speed.value(), 0.5);
        assert_eq!(speed.unit().symbol(), "km·s^-1");

        let zero = Measure::new(&fx.f, 0.0, &fx.second);
        assert_eq!(
            a.divide(&zero).unwrap_err(),
            MeasureError::Field(FieldError::DivisionByZero)
        );
    }

    #[test]
    fn powers_and_roots() {
        let fx = fixture();
        let a = Measure::new(&fx.f, 9.0, &fx.meter);
        let sq = a.pow(Exponent::TWO).unwrap();
        assert_eq!(*sq.value(), 81.0);
        let root = sq.pow(Exponent::HALF).unwrap();
        assert_eq!(*root.value(), 9.0);
        assert!(root.unit().is_commensurable(&fx.meter));

        let negative = Measure::new(&fx.f, -4.0, &fx.meter);
        assert!(matches!(
            negative.pow(Exponent::HALF),
            Err(MeasureError::Field(FieldError::Unsupported { .. }))
        ));
        let inv = a.reciprocal().unwrap();
        assert_eq!(inv.unit().symbol(), "m^-1");
    }

    #[test]
    fn ordering_spans_units_equality_does_not() {
        let fx = fixture();
        let one_km = Measure::new(&fx.f, 1.0, &fx.km);
        let thousand_m = Measure::new(&fx.f, 1000.0, &fx.meter);
        assert_eq!(one_km.compare(&thousand_m).unwrap(), Ordering::Equal);
        assert_ne!(one_km, thousand_m);
        assert_eq!(one_km, Measure::new(&fx.f, 1.0, &fx.km));
        let more = Measure::new(&fx.f, 1001.0, &fx.meter);
        assert_eq!(one_km.compare(&more).unwrap(), Ordering::Less);
        let t = Measure::new(&fx.f, 1.0, &fx.second);
        assert!(one_km.compare(&t).unwrap_err().is_incommensurable());
    }

    #[test]
    fn approx_and_display() {
        let fx = fixture();
        let a = Measure::new(&fx.f, 0.1, &fx.km);
        let b = Measure::new(&fx.f, 100.00000000001, &fx.meter);
        assert!(a.approx_eq(&b, Tolerances::default()).unwrap());
        assert!(!a.approx_eq(&b, Tolerances::tight()).unwrap());
        assert_eq!(a.to_string(), "0.1 km");
        assert_eq!(a.negate().scale_by(&2.0).to_string(), "-0.2 km");
        let n = Measure::new(&fx.f, 3.0, &Unit::unitless());
        assert_eq!(n.to_string(), "3");
    }
}
