//! SI units, including a few prefixed and customary ones.

use std::sync::LazyLock;

use uf_core::Exponent;
use uf_dims::Dimension;
use uf_field::Scalar;
use uf_units::{Unit, UnitBuilder};

use crate::{base, dimensions};

fn compound(name: &str, symbol: &str, dimension: &Dimension, factors: &[(&Unit, i32)]) -> Unit {
    factors
        .iter()
        .fold(
            UnitBuilder::new().named(name).symbol(symbol).measuring(dimension),
            |builder, (unit, exponent)| builder.times_pow(unit, Exponent::integer(*exponent)),
        )
        .create()
        .expect("SI compound units match their declared dimension")
}

fn ratio(name: &str, symbol: &str, numerator: i64, denominator: i64, reference: &Unit) -> Unit {
    UnitBuilder::new()
        .named(name)
        .symbol(symbol)
        .as_the_ratio(numerator)
        .over(denominator)
        .of_a(reference)
        .create()
        .expect("ratio of a reference unit")
}

fn exactly(name: &str, symbol: &str, scale: impl Into<Scalar>, reference: &Unit) -> Unit {
    UnitBuilder::new()
        .named(name)
        .symbol(symbol)
        .as_exactly(scale)
        .of_a(reference)
        .create()
        .expect("exact multiple of a reference unit")
}

pub static METER: LazyLock<Unit> = LazyLock::new(|| base::LENGTH.unit.unit().clone());
pub static KILOGRAM: LazyLock<Unit> = LazyLock::new(|| base::MASS.unit.unit().clone());
pub static SECOND: LazyLock<Unit> = LazyLock::new(|| base::TIME.unit.unit().clone());
pub static AMPERE: LazyLock<Unit> = LazyLock::new(|| base::CURRENT.unit.unit().clone());
pub static KELVIN: LazyLock<Unit> = LazyLock::new(|| base::TEMPERATURE.unit.unit().clone());
pub static MOLE: LazyLock<Unit> = LazyLock::new(|| base::AMOUNT.unit.unit().clone());
pub static CANDELA: LazyLock<Unit> =
    LazyLock::new(|| base::LUMINOUS_INTENSITY.unit.unit().clone());

pub static KILOMETER: LazyLock<Unit> =
    LazyLock::new(|| exactly("kilometer", "km", 1000, &METER));
pub static CENTIMETER: LazyLock<Unit> =
    LazyLock::new(|| ratio("centimeter", "cm", 1, 100, &METER));
pub static MILLIMETER: LazyLock<Unit> =
    LazyLock::new(|| ratio("millimeter", "mm", 1, 1000, &METER));
pub static INCH: LazyLock<Unit> =
    LazyLock::new(|| ratio("inch", "in", 254, 100, &CENTIMETER));
pub static GRAM: LazyLock<Unit> = LazyLock::new(|| ratio("gram", "g", 1, 1000, &KILOGRAM));
pub static MINUTE: LazyLock<Unit> = LazyLock::new(|| exactly("minute", "min", 60, &SECOND));
pub static HOUR: LazyLock<Unit> = LazyLock::new(|| exactly("hour", "h", 60, &MINUTE));

pub static SQUARE_METER: LazyLock<Unit> = LazyLock::new(|| {
    compound("square meter", "m²", &dimensions::AREA, &[(&*METER, 2)])
});
pub static METER_PER_SECOND: LazyLock<Unit> = LazyLock::new(|| {
    compound(
        "meter per second",
        "m/s",
        &dimensions::VELOCITY,
        &[(&*METER, 1), (&*SECOND, -1)],
    )
});
pub static KILOMETER_PER_HOUR: LazyLock<Unit> = LazyLock::new(|| {
    compound(
        "kilometer per hour",
        "km/h",
        &dimensions::VELOCITY,
        &[(&*KILOMETER, 1), (&*HOUR, -1)],
    )
});
pub static HERTZ: LazyLock<Unit> =
    LazyLock::new(|| compound("hertz", "Hz", &dimensions::FREQUENCY, &[(&*SECOND, -1)]));
pub static NEWTON: LazyLock<Unit> = LazyLock::new(|| {
    compound(
        "newton",
        "N",
        &dimensions::FORCE,
        &[(&*KILOGRAM, 1), (&*METER, 1), (&*SECOND, -2)],
    )
});
pub static JOULE: LazyLock<Unit> = LazyLock::new(|| {
    compound("joule", "J", &dimensions::ENERGY, &[(&*NEWTON, 1), (&*METER, 1)])
});
pub static WATT: LazyLock<Unit> = LazyLock::new(|| {
    compound("watt", "W", &dimensions::POWER, &[(&*JOULE, 1), (&*SECOND, -1)])
});
pub static MILLIWATT: LazyLock<Unit> =
    LazyLock::new(|| ratio("milliwatt", "mW", 1, 1000, &WATT));
pub static PASCAL: LazyLock<Unit> = LazyLock::new(|| {
    compound(
        "pascal",
        "Pa",
        &dimensions::PRESSURE,
        &[(&*NEWTON, 1), (&*METER, -2)],
    )
});
pub static COULOMB: LazyLock<Unit> = LazyLock::new(|| {
    compound(
        "coulomb",
        "C",
        &dimensions::CHARGE,
        &[(&*AMPERE, 1), (&*SECOND, 1)],
    )
});
pub static MICROCOULOMB: LazyLock<Unit> =
    LazyLock::new(|| ratio("microcoulomb", "µC", 1, 1_000_000, &COULOMB));
pub static VOLT: LazyLock<Unit> = LazyLock::new(|| {
    compound("volt", "V", &dimensions::VOLTAGE, &[(&*WATT, 1), (&*AMPERE, -1)])
});
pub static FARAD: LazyLock<Unit> = LazyLock::new(|| {
    compound("farad", "F", &dimensions::CAPACITANCE, &[(&*COULOMB, 1), (&*VOLT, -1)])
});
pub static FARAD_PER_METER: LazyLock<Unit> = LazyLock::new(|| {
    compound(
        "farad per meter",
        "F/m",
        &dimensions::PERMITTIVITY,
        &[(&*FARAD, 1), (&*METER, -1)],
    )
});

#[cfg(test)]
mod tests {
    use super::*;
    use uf_core::{nearly_equal, Tolerances};
    use uf_field::DoubleFactory;

    fn scale_of(unit: &Unit) -> f64 {
        unit.scale().using(&DoubleFactory::shared()).unwrap()
    }

    #[test]
    fn prefixed_scales() {
        assert_eq!(scale_of(&KILOMETER), 1000.0);
        assert_eq!(scale_of(&CENTIMETER), 0.01);
        assert!(nearly_equal(scale_of(&INCH), 0.0254, Tolerances::tight()));
        assert_eq!(scale_of(&HOUR), 3600.0);
        assert!(nearly_equal(
            scale_of(&KILOMETER_PER_HOUR),
            1.0 / 3.6,
            Tolerances::tight()
        ));
    }

    #[test]
    fn coherent_units_have_unit_scale() {
        for unit in [&*NEWTON, &*JOULE, &*WATT, &*PASCAL, &*COULOMB, &*VOLT, &*FARAD] {
            assert_eq!(scale_of(unit), 1.0, "{}", unit.name());
        }
    }

    #[test]
    fn declared_dimensions_are_carried() {
        assert_eq!(NEWTON.dimension(), &*dimensions::FORCE);
        assert_eq!(NEWTON.symbol(), "N");
        assert!(METER_PER_SECOND.is_commensurable(&KILOMETER_PER_HOUR));
        assert!(!JOULE.is_commensurable(&WATT));
        assert!(METER.is_fundamental());
    }
}
