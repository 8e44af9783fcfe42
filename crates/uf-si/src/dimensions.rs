//! SI dimensions.

use std::sync::LazyLock;

use uf_core::Exponent;
use uf_dims::{Dimension, DimensionBuilder};

use crate::base;

fn derived(name: &str, symbol: &str, factors: &[(&Dimension, i32)]) -> Dimension {
    factors
        .iter()
        .try_fold(
            DimensionBuilder::new().named(name).symbol(symbol),
            |builder, (dimension, exponent)| builder.append(dimension, Exponent::integer(*exponent)),
        )
        .expect("SI dimension exponents are small integers")
        .create()
}

pub static LENGTH: LazyLock<Dimension> = LazyLock::new(|| base::LENGTH.axis.dimension());
pub static MASS: LazyLock<Dimension> = LazyLock::new(|| base::MASS.axis.dimension());
pub static TIME: LazyLock<Dimension> = LazyLock::new(|| base::TIME.axis.dimension());
pub static CURRENT: LazyLock<Dimension> = LazyLock::new(|| base::CURRENT.axis.dimension());
pub static TEMPERATURE: LazyLock<Dimension> =
    LazyLock::new(|| base::TEMPERATURE.axis.dimension());
pub static AMOUNT: LazyLock<Dimension> = LazyLock::new(|| base::AMOUNT.axis.dimension());
pub static LUMINOUS_INTENSITY: LazyLock<Dimension> =
    LazyLock::new(|| base::LUMINOUS_INTENSITY.axis.dimension());

pub static AREA: LazyLock<Dimension> = LazyLock::new(|| derived("area", "A", &[(&*LENGTH, 2)]));
pub static VOLUME: LazyLock<Dimension> =
    LazyLock::new(|| derived("volume", "V", &[(&*LENGTH, 3)]));
pub static VELOCITY: LazyLock<Dimension> =
    LazyLock::new(|| derived("velocity", "v", &[(&*LENGTH, 1), (&*TIME, -1)]));
pub static ACCELERATION: LazyLock<Dimension> =
    LazyLock::new(|| derived("acceleration", "a", &[(&*VELOCITY, 1), (&*TIME, -1)]));
pub static FREQUENCY: LazyLock<Dimension> =
    LazyLock::new(|| derived("frequency", "f", &[(&*TIME, -1)]));
pub static FORCE: LazyLock<Dimension> =
    LazyLock::new(|| derived("force", "F", &[(&*MASS, 1), (&*ACCELERATION, 1)]));
pub static ENERGY: LazyLock<Dimension> =
    LazyLock::new(|| derived("energy", "E", &[(&*FORCE, 1), (&*LENGTH, 1)]));
pub static POWER: LazyLock<Dimension> =
    LazyLock::new(|| derived("power", "P", &[(&*ENERGY, 1), (&*TIME, -1)]));
pub static PRESSURE: LazyLock<Dimension> =
    LazyLock::new(|| derived("pressure", "p", &[(&*FORCE, 1), (&*AREA, -1)]));
pub static CHARGE: LazyLock<Dimension> =
    LazyLock::new(|| derived("electric charge", "Q", &[(&*CURRENT, 1), (&*TIME, 1)]));
pub static VOLTAGE: LazyLock<Dimension> =
    LazyLock::new(|| derived("voltage", "U", &[(&*POWER, 1), (&*CURRENT, -1)]));
pub static CAPACITANCE: LazyLock<Dimension> =
    LazyLock::new(|| derived("capacitance", "C", &[(&*CHARGE, 1), (&*VOLTAGE, -1)]));
pub static PERMITTIVITY: LazyLock<Dimension> =
    LazyLock::new(|| derived("permittivity", "ε", &[(&*CAPACITANCE, 1), (&*LENGTH, -1)]));
