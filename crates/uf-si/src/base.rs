//! The seven SI basis axes, each minted together with its reference unit.

use std::sync::LazyLock;

use uf_dims::FundamentalDimension;
use uf_units::{new_fundamental_pair, FundamentalUnit};

/// A basis axis and the unit that measures exactly one of it.
#[derive(Clone, Debug)]
pub struct BasePair {
    pub axis: FundamentalDimension,
    pub unit: FundamentalUnit,
}

fn pair(dimension: &str, dimension_symbol: &str, unit: &str, unit_symbol: &str) -> BasePair {
    let (axis, unit) = new_fundamental_pair(dimension, dimension_symbol, unit, unit_symbol);
    BasePair { axis, unit }
}

pub static LENGTH: LazyLock<BasePair> = LazyLock::new(|| pair("length", "L", "meter", "m"));
pub static MASS: LazyLock<BasePair> = LazyLock::new(|| pair("mass", "M", "kilogram", "kg"));
pub static TIME: LazyLock<BasePair> = LazyLock::new(|| pair("time", "T", "second", "s"));
pub static CURRENT: LazyLock<BasePair> =
    LazyLock::new(|| pair("electric current", "I", "ampere", "A"));
pub static TEMPERATURE: LazyLock<BasePair> =
    LazyLock::new(|| pair("thermodynamic temperature", "Θ", "kelvin", "K"));
pub static AMOUNT: LazyLock<BasePair> =
    LazyLock::new(|| pair("amount of substance", "N", "mole", "mol"));
pub static LUMINOUS_INTENSITY: LazyLock<BasePair> =
    LazyLock::new(|| pair("luminous intensity", "J", "candela", "cd"));
