//! Alternate, possibly nonlinear, representations of a measurement.
//!
//! A [`Scale`] maps values in its reference unit to levels and back
//! (decibels, Celsius). A [`Level`] stores both representations, computed
//! together, so they never drift apart.

use core::cmp::Ordering;
use core::fmt;
use std::sync::Arc;

use uf_core::{IdAllocator, ScaleId};
use uf_field::{Factory, Field, FieldResult, Scalar};
use uf_units::Unit;

use crate::error::MeasureResult;
use crate::measure::Measure;

static SCALE_IDS: IdAllocator = IdAllocator::new();

type Transform<K> =
    Arc<dyn Fn(&K, &<K as Factory>::Value) -> FieldResult<<K as Factory>::Value> + Send + Sync>;

/// A named, invertible transform anchored to a reference unit.
///
/// Scales are identity-unique like units: clones share identity, separately
/// built scales never compare equal.
pub struct Scale<K: Factory> {
    inner: Arc<ScaleInner<K>>,
}

struct ScaleInner<K: Factory> {
    id: ScaleId,
    name: String,
    symbol: String,
    reference: Unit,
    forward: Transform<K>,
    inverse: Transform<K>,
}

impl<K: Factory> Clone for Scale<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: Factory> Scale<K> {
    /// `forward` maps a value in `reference` to a level; `inverse` maps back.
    /// Both receive the factory so they can mint constants.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        reference: &Unit,
        forward: impl Fn(&K, &K::Value) -> FieldResult<K::Value> + Send + Sync + 'static,
        inverse: impl Fn(&K, &K::Value) -> FieldResult<K::Value> + Send + Sync + 'static,
    ) -> Self {
        let name = name.into();
        tracing::debug!(scale = %name, reference = %reference.name(), "scale created");
        Self {
            inner: Arc::new(ScaleInner {
                id: SCALE_IDS.next(),
                name,
                symbol: symbol.into(),
                reference: reference.clone(),
                forward: Arc::new(forward),
                inverse: Arc::new(inverse),
            }),
        }
    }

    /// `level = multiplier · log_base(value)`, e.g. decibels with
    /// multiplier 10 and base 10.
    pub fn logarithmic(
        name: impl Into<String>,
        symbol: impl Into<String>,
        reference: &Unit,
        multiplier: impl Into<Scalar>,
        base: impl Into<Scalar>,
    ) -> Self {
        let multiplier = multiplier.into();
        let base = base.into();
        let (m, b) = (multiplier.clone(), base.clone());
        Self::new(
            name,
            symbol,
            reference,
            move |k: &K, v: &K::Value| Ok(m.using(k)?.multiply(&v.logarithm(&b.using(k)?)?)),
            move |k: &K, level: &K::Value| {
                let exponent = level.divide(&multiplier.using(k)?)?;
                base.using(k)?.power(&exponent)
            },
        )
    }

    /// `level = (value − offset) / factor`, e.g. Celsius on kelvin with
    /// offset 273.15 and factor 1.
    pub fn affine(
        name: impl Into<String>,
        symbol: impl Into<String>,
        reference: &Unit,
        offset: impl Into<Scalar>,
        factor: impl Into<Scalar>,
    ) -> Self {
        let offset = offset.into();
        let factor = factor.into();
        let (o, f) = (offset.clone(), factor.clone());
        Self::new(
            name,
            symbol,
            reference,
            move |k: &K, v: &K::Value| v.subtract(&o.using(k)?).divide(&f.using(k)?),
            move |k: &K, level: &K::Value| {
                Ok(level.multiply(&factor.using(k)?).add(&offset.using(k)?))
            },
        )
    }

    pub fn id(&self) -> ScaleId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn symbol(&self) -> &str {
        &self.inner.symbol
    }

    pub fn reference(&self) -> &Unit {
        &self.inner.reference
    }

    /// Express `measure` on this scale.
    pub fn level(&self, measure: &Measure<K>) -> MeasureResult<Level<K>> {
        let rebased = measure.as_unit(&self.inner.reference)?;
        let value = (self.inner.forward)(rebased.factory(), rebased.value())?;
        Ok(Level {
            value,
            scale: self.clone(),
            measure: rebased,
        })
    }

    /// The level `value` on this scale, with its backing measure.
    pub fn of(&self, factory: &K, value: K::Value) -> MeasureResult<Level<K>> {
        let base = (self.inner.inverse)(factory, &value)?;
        Ok(Level {
            value,
            scale: self.clone(),
            measure: Measure::new(factory, base, &self.inner.reference),
        })
    }
}

impl<K: Factory> PartialEq for Scale<K> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl<K: Factory> Eq for Scale<K> {}

impl<K: Factory> fmt::Debug for Scale<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scale({} [{}] on {})",
            self.inner.name,
            self.inner.symbol,
            self.inner.reference.name()
        )
    }
}

/// A value on a scale together with the measure it stands for.
///
/// Equality requires the same scale and a field-equal value, while
/// [`Level::compare`] also orders levels of different commensurable scales.
/// The two deliberately disagree, so `Level` does not implement
/// `PartialOrd`.
#[derive(Clone)]
pub struct Level<K: Factory> {
    value: K::Value,
    scale: Scale<K>,
    measure: Measure<K>,
}

impl<K: Factory> Level<K> {
    pub fn value(&self) -> &K::Value {
        &self.value
    }

    pub fn scale(&self) -> &Scale<K> {
        &self.scale
    }

    /// The equivalent measure in the scale's reference unit.
    pub fn measure(&self) -> &Measure<K> {
        &self.measure
    }

    pub fn compare(&self, other: &Self) -> MeasureResult<Ordering> {
        if self.scale == other.scale {
            return Ok(self.value.compare(&other.value));
        }
        self.scale
            .reference()
            .ensure_commensurable(other.scale.reference())?;
        self.measure.compare(&other.measure)
    }

    /// The same quantity on another scale.
    pub fn in_scale(&self, scale: &Scale<K>) -> MeasureResult<Level<K>> {
        if self.scale == *scale {
            return Ok(self.clone());
        }
        scale.level(&self.measure)
    }
}

impl<K: Factory> PartialEq for Level<K> {
    fn eq(&self, other: &Self) -> bool {
        self.scale == other.scale && self.value.field_eq(&other.value)
    }
}

impl<K: Factory> fmt::Display for Level<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.scale.symbol())
    }
}

impl<K: Factory> fmt::Debug for Level<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Level")
            .field("value", &self.value)
            .field("scale", &self.scale)
            .field("measure", &self.measure)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uf_core::{nearly_equal, Tolerances};
    use uf_field::DoubleFactory;
    use uf_units::{new_fundamental_pair, UnitBuilder};

    fn kelvin() -> Unit {
        new_fundamental_pair("temperature", "Θ", "kelvin", "K").1.into_unit()
    }

    fn celsius(kelvin: &Unit) -> Scale<DoubleFactory> {
        Scale::affine("celsius", "°C", kelvin, Scalar::from_text("273.15"), 1)
    }

    #[test]
    fn decibels_of_the_reference_are_zero() {
        let f = DoubleFactory::new();
        let watt = new_fundamental_pair("power", "P", "watt", "W").1.into_unit();
        let db = Scale::logarithmic("decibel watt", "dBW", &watt, 10, 10);
        let level = db.level(&Measure::of_int(&f, 1, &watt)).unwrap();
        assert_eq!(*level.value(), 0.0);
        let hundred = db.level(&Measure::of_int(&f, 100, &watt)).unwrap();
        assert_eq!(*hundred.value(), 20.0);
        assert_eq!(hundred.to_string(), "20 dBW");
    }

    #[test]
    fn levels_rebase_to_the_reference() {
        let f = DoubleFactory::new();
        let watt = new_fundamental_pair("power", "P", "watt", "W").1.into_unit();
        let milliwatt = UnitBuilder::new()
            .symbol("mW")
            .as_the_ratio(1)
            .over(1000)
            .of_a(&watt)
            .create()
            .unwrap();
        let dbm = Scale::logarithmic("decibel milliwatt", "dBm", &milliwatt, 10, 10);
        let level = dbm.level(&Measure::of_int(&f, 1, &watt)).unwrap();
        assert!(nearly_equal(*level.value(), 30.0, Tolerances::default()));
        assert_eq!(level.measure().unit(), &milliwatt);
        let second = new_fundamental_pair("time", "T", "second", "s").1.into_unit();
        assert!(dbm
            .level(&Measure::of_int(&f, 1, &second))
            .unwrap_err()
            .is_incommensurable());
    }

    #[test]
    fn inverse_builds_the_backing_measure() {
        let f = DoubleFactory::new();
        let k = kelvin();
        let c = celsius(&k);
        let boiling = c.of(&f, 100.0).unwrap();
        assert!(nearly_equal(*boiling.measure().value(), 373.15, Tolerances::default()));
        assert_eq!(boiling.measure().unit(), &k);
        let back = c.level(boiling.measure()).unwrap();
        assert!(nearly_equal(*back.value(), 100.0, Tolerances::default()));
    }

    #[test]
    fn cross_scale_comparison() {
        let f = DoubleFactory::new();
        let k = kelvin();
        let c = celsius(&k);
        let fahrenheit = Scale::affine(
            "fahrenheit",
            "°F",
            &k,
            Scalar::from_text("255.3722222222222"),
            Scalar::of(5).divide(&Scalar::of(9)),
        );
        let warm = c.of(&f, 30.0).unwrap();
        let cool = fahrenheit.of(&f, 50.0).unwrap();
        assert_eq!(warm.compare(&cool).unwrap(), Ordering::Greater);
        assert_eq!(cool.compare(&warm).unwrap(), Ordering::Less);

        let as_f = warm.in_scale(&fahrenheit).unwrap();
        assert!(nearly_equal(*as_f.value(), 86.0, Tolerances { abs: 1e-9, rel: 1e-9 }));
        assert_ne!(as_f, warm);

        let watt = new_fundamental_pair("power", "P", "watt", "W").1.into_unit();
        let db = Scale::logarithmic("decibel watt", "dBW", &watt, 10, 10);
        let loud = db.of(&f, 3.0).unwrap();
        assert!(loud.compare(&warm).unwrap_err().is_incommensurable());
    }

    #[test]
    fn equality_needs_the_same_scale() {
        let f = DoubleFactory::new();
        let k = kelvin();
        let a = celsius(&k);
        let b = celsius(&k);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        let la = a.of(&f, 20.0).unwrap();
        let lb = b.of(&f, 20.0).unwrap();
        assert_ne!(la, lb);
        assert_eq!(la.compare(&lb).unwrap(), Ordering::Equal);
        assert_eq!(la, a.of(&f, 20.0).unwrap());
    }
}
