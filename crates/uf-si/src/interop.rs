//! Conversions between `uom` quantities and double-precision measures.
//!
//! `uom` fixes dimensions at compile time; measures carry them at runtime.
//! Each supported `uom` quantity is paired with its coherent SI unit from
//! this catalog, and converting a measure back checks commensurability first.

use uf_core::Real;
use uf_field::Factory;
use uf_measure::{Measure, MeasureResult};
use uf_units::Unit;
use uom::si::f64::{
    Area, ElectricCharge, Energy, Force, Frequency, Length, Mass, Power, Pressure,
    ThermodynamicTemperature, Time, Velocity,
};

use crate::units;

/// A `uom` quantity with a catalog counterpart.
pub trait SiQuantity: Sized {
    /// The catalog unit the quantity's base value is expressed in.
    fn si_unit() -> &'static Unit;

    fn base_value(&self) -> Real;

    fn from_base_value(value: Real) -> Self;
}

macro_rules! si_quantity {
    ($($quantity:ty => $unit:ident, $uom_unit:path;)*) => {
        $(
            impl SiQuantity for $quantity {
                fn si_unit() -> &'static Unit {
                    &units::$unit
                }

                fn base_value(&self) -> Real {
                    self.get::<$uom_unit>()
                }

                fn from_base_value(value: Real) -> Self {
                    <$quantity>::new::<$uom_unit>(value)
                }
            }
        )*
    };
}

si_quantity! {
    Length => METER, uom::si::length::meter;
    Mass => KILOGRAM, uom::si::mass::kilogram;
    Time => SECOND, uom::si::time::second;
    ThermodynamicTemperature => KELVIN, uom::si::thermodynamic_temperature::kelvin;
    Area => SQUARE_METER, uom::si::area::square_meter;
    Velocity => METER_PER_SECOND, uom::si::velocity::meter_per_second;
    Frequency => HERTZ, uom::si::frequency::hertz;
    Force => NEWTON, uom::si::force::newton;
    Energy => JOULE, uom::si::energy::joule;
    Power => WATT, uom::si::power::watt;
    Pressure => PASCAL, uom::si::pressure::pascal;
    ElectricCharge => COULOMB, uom::si::electric_charge::coulomb;
}

/// The quantity as a measure in its coherent SI unit.
pub fn to_measure<K, Q>(factory: &K, quantity: &Q) -> Measure<K>
where
    K: Factory<Value = Real>,
    Q: SiQuantity,
{
    Measure::new(factory, quantity.base_value(), Q::si_unit())
}

/// The measure as a `uom` quantity. Fails if the measure's unit is not
/// commensurable with the quantity's.
pub fn from_measure<K, Q>(measure: &Measure<K>) -> MeasureResult<Q>
where
    K: Factory<Value = Real>,
    Q: SiQuantity,
{
    let rebased = measure.as_unit(Q::si_unit())?;
    Ok(Q::from_base_value(*rebased.value()))
}
