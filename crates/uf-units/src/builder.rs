//! Staged construction of derived units.
//!
//! A builder starts in the initial stage and takes exactly one path:
//!
//! - compound: `compound`/`times`/`per`/`times_pow` accumulate unit powers;
//!   repeated references to a unit merge by adding exponents
//! - ratio: `as_the_ratio(n)`, then `over(d)`, then `of_a(reference)`
//! - exact scale: `as_exactly(s)`, then `of_a(reference)`
//!
//! Every step consumes the builder and returns a new value, so a partially
//! built chain can be cloned and finished several ways. Steps taken out of
//! order are recorded and reported by [`UnitBuilder::create`] as
//! [`UnitError::IllegalBuilderState`].

use uf_core::Exponent;
use uf_dims::{Dimension, DimensionBuilder};
use uf_field::Scalar;

use crate::error::{UnitError, UnitResult};
use crate::unit::Unit;

#[derive(Clone, Debug, Default)]
pub struct UnitBuilder {
    name: Option<String>,
    symbol: Option<String>,
    dimension: Option<Dimension>,
    stage: Stage,
}

#[derive(Clone, Debug, Default)]
enum Stage {
    #[default]
    Initial,
    Compound(Vec<(Unit, Exponent)>),
    Ratio {
        numerator: Scalar,
        denominator: Option<Scalar>,
        reference: Option<Unit>,
    },
    Exact {
        scale: Scalar,
        reference: Option<Unit>,
    },
    Illegal {
        what: &'static str,
    },
}

impl UnitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Declare the dimension the unit must measure. `create` fails unless
    /// the computed dimension is commensurable with it, and the unit then
    /// carries this dimension handle.
    pub fn measuring(mut self, dimension: &Dimension) -> Self {
        self.dimension = Some(dimension.clone());
        self
    }

    /// Multiply in `unit^exponent`.
    pub fn compound(mut self, unit: &Unit, exponent: Exponent) -> Self {
        self.stage = match self.stage {
            Stage::Initial => Stage::Compound(vec![(unit.clone(), exponent)]),
            Stage::Compound(mut factors) => {
                factors.push((unit.clone(), exponent));
                Stage::Compound(factors)
            }
            Stage::Illegal { what } => Stage::Illegal { what },
            Stage::Ratio { .. } | Stage::Exact { .. } => Stage::Illegal {
                what: "compound factor added to an exactly scaled unit",
            },
        };
        self
    }

    pub fn times(self, unit: &Unit) -> Self {
        self.compound(unit, Exponent::ONE)
    }

    pub fn per(self, unit: &Unit) -> Self {
        self.compound(unit, Exponent::MINUS_ONE)
    }

    pub fn times_pow(self, unit: &Unit, exponent: Exponent) -> Self {
        self.compound(unit, exponent)
    }

    /// Start an exact ratio `numerator / denominator` of a reference unit.
    pub fn as_the_ratio(mut self, numerator: impl Into<Scalar>) -> Self {
        self.stage = match self.stage {
            Stage::Initial => Stage::Ratio {
                numerator: numerator.into(),
                denominator: None,
                reference: None,
            },
            Stage::Illegal { what } => Stage::Illegal { what },
            Stage::Compound(_) => Stage::Illegal {
                what: "exact ratio declared on a compound unit",
            },
            Stage::Ratio { .. } | Stage::Exact { .. } => Stage::Illegal {
                what: "scale declared twice",
            },
        };
        self
    }

    pub fn over(mut self, denominator: impl Into<Scalar>) -> Self {
        self.stage = match self.stage {
            Stage::Ratio {
                numerator,
                denominator: None,
                reference: None,
            } => Stage::Ratio {
                numerator,
                denominator: Some(denominator.into()),
                reference: None,
            },
            Stage::Illegal { what } => Stage::Illegal { what },
            _ => Stage::Illegal {
                what: "over() must directly follow as_the_ratio()",
            },
        };
        self
    }

    /// Declare the unit to be exactly `scale` reference units.
    pub fn as_exactly(mut self, scale: impl Into<Scalar>) -> Self {
        self.stage = match self.stage {
            Stage::Initial => Stage::Exact {
                scale: scale.into(),
                reference: None,
            },
            Stage::Illegal { what } => Stage::Illegal { what },
            Stage::Compound(_) => Stage::Illegal {
                what: "exact scale declared on a compound unit",
            },
            Stage::Ratio { .. } | Stage::Exact { .. } => Stage::Illegal {
                what: "scale declared twice",
            },
        };
        self
    }

    /// The reference unit a ratio or exact scale is expressed in.
    pub fn of_a(mut self, reference: &Unit) -> Self {
        self.stage = match self.stage {
            Stage::Ratio {
                numerator,
                denominator: Some(denominator),
                reference: None,
            } => Stage::Ratio {
                numerator,
                denominator: Some(denominator),
                reference: Some(reference.clone()),
            },
            Stage::Exact {
                scale,
                reference: None,
            } => Stage::Exact {
                scale,
                reference: Some(reference.clone()),
            },
            Stage::Illegal { what } => Stage::Illegal { what },
            _ => Stage::Illegal {
                what: "of_a() must follow over() or as_exactly()",
            },
        };
        self
    }

    /// Alias of [`UnitBuilder::of_a`] for references starting with a vowel.
    pub fn of_an(self, reference: &Unit) -> Self {
        self.of_a(reference)
    }

    /// Compute dimension and scale and mint the unit.
    pub fn create(self) -> UnitResult<Unit> {
        let UnitBuilder {
            name,
            symbol,
            dimension,
            stage,
        } = self;
        match stage {
            Stage::Compound(factors) => create_compound(name, symbol, dimension, factors),
            Stage::Ratio {
                numerator,
                denominator: Some(denominator),
                reference: Some(reference),
            } => {
                let factor = numerator.divide(&denominator);
                create_scaled(name, symbol, dimension, factor, &reference, "ratio")
            }
            Stage::Exact {
                scale,
                reference: Some(reference),
            } => create_scaled(name, symbol, dimension, scale, &reference, "exact"),
            Stage::Initial => Err(UnitError::IllegalBuilderState {
                what: "nothing declared",
            }),
            Stage::Ratio { .. } | Stage::Exact { .. } => Err(UnitError::IllegalBuilderState {
                what: "scaled unit has no reference unit",
            }),
            Stage::Illegal { what } => Err(UnitError::IllegalBuilderState { what }),
        }
    }
}

fn create_compound(
    name: Option<String>,
    symbol: Option<String>,
    declared: Option<Dimension>,
    factors: Vec<(Unit, Exponent)>,
) -> UnitResult<Unit> {
    let mut merged: Vec<(Unit, Exponent)> = Vec::with_capacity(factors.len());
    for (unit, exponent) in factors {
        match merged.iter_mut().find(|(u, _)| *u == unit) {
            Some((_, current)) => *current = current.product(exponent)?,
            None => merged.push((unit, exponent)),
        }
    }
    merged.retain(|(unit, exponent)| !exponent.is_zero() && !unit.is_unitless());
    if merged.is_empty() {
        merged.push((Unit::unitless(), Exponent::ONE));
    }

    let mut dimensions = DimensionBuilder::new();
    let mut numerator: Option<Scalar> = None;
    let mut denominator: Option<Scalar> = None;
    for (unit, exponent) in &merged {
        dimensions = dimensions.append(unit.dimension(), *exponent)?;
        let magnitude = exponent.abs()?;
        let factor = if magnitude.is_one() {
            unit.scale().clone()
        } else {
            unit.scale().pow_exponent(magnitude)
        };
        let side = if exponent.is_negative() {
            &mut denominator
        } else {
            &mut numerator
        };
        *side = Some(match side.take() {
            Some(acc) => acc.multiply(&factor),
            None => factor,
        });
    }
    let numerator = numerator.unwrap_or_else(Scalar::one);
    let scale = match denominator {
        Some(denominator) => numerator.divide(&denominator),
        None => numerator,
    };

    let dimension = checked_dimension(declared, dimensions.create())?;
    let name = name.unwrap_or_else(|| render(&merged, Unit::name));
    let symbol = symbol.unwrap_or_else(|| render(&merged, Unit::symbol));
    tracing::debug!(unit = %name, symbol = %symbol, path = "compound", "unit created");
    Ok(Unit::from_parts(name, symbol, dimension, scale, false))
}

fn create_scaled(
    name: Option<String>,
    symbol: Option<String>,
    declared: Option<Dimension>,
    factor: Scalar,
    reference: &Unit,
    path: &'static str,
) -> UnitResult<Unit> {
    let dimension = checked_dimension(declared, reference.dimension().clone())?;
    let name = name.unwrap_or_else(|| format!("{factor} {}", reference.name()));
    let symbol = symbol.unwrap_or_else(|| format!("{factor} {}", reference.symbol()));
    let scale = factor.multiply(reference.scale());
    tracing::debug!(unit = %name, symbol = %symbol, path, "unit created");
    Ok(Unit::from_parts(name, symbol, dimension, scale, false))
}

fn checked_dimension(declared: Option<Dimension>, computed: Dimension) -> UnitResult<Dimension> {
    match declared {
        Some(declared) => {
            declared.ensure_commensurable(&computed)?;
            Ok(declared)
        }
        None => Ok(computed),
    }
}

fn render(factors: &[(Unit, Exponent)], label: fn(&Unit) -> &str) -> String {
    factors
        .iter()
        .map(|(unit, exponent)| {
            if exponent.is_one() {
                label(unit).to_string()
            } else {
                format!("{}^{}", label(unit), exponent)
            }
        })
        .collect::<Vec<_>>()
        .join("·")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::new_fundamental_pair;
    use uf_core::{nearly_equal, Tolerances};
    use uf_field::DoubleFactory;

    struct Si {
        meter: Unit,
        second: Unit,
        kilogram: Unit,
    }

    fn si() -> Si {
        Si {
            meter: new_fundamental_pair("length", "L", "meter", "m").1.into_unit(),
            second: new_fundamental_pair("time", "T", "second", "s").1.into_unit(),
            kilogram: new_fundamental_pair("mass", "M", "kilogram", "kg").1.into_unit(),
        }
    }

    #[test]
    fn exact_scale() {
        let si = si();
        let km = UnitBuilder::new()
            .as_exactly(1000)
            .of_a(&si.meter)
            .create()
            .unwrap();
        assert_eq!(km.scale().using(&DoubleFactory::new()).unwrap(), 1000.0);
        assert_eq!(km.dimension(), si.meter.dimension());
        assert_eq!(km.name(), "1000 meter");
    }

    #[test]
    fn ratio_of_a_scaled_reference() {
        let si = si();
        let f = DoubleFactory::new();
        let km = UnitBuilder::new()
            .named("kilometer")
            .symbol("km")
            .as_exactly(1000)
            .of_a(&si.meter)
            .create()
            .unwrap();
        let cm = UnitBuilder::new()
            .named("centimeter")
            .symbol("cm")
            .as_the_ratio(1)
            .over(100_000)
            .of_a(&km)
            .create()
            .unwrap();
        assert_eq!(cm.scale().using(&f).unwrap(), 0.01);
        assert_eq!(cm.symbol(), "cm");
    }

    #[test]
    fn compound_scale_and_dimension() {
        let si = si();
        let f = DoubleFactory::new();
        let hour = UnitBuilder::new()
            .as_exactly(3600)
            .of_a(&si.second)
            .create()
            .unwrap();
        let km = UnitBuilder::new()
            .as_exactly(1000)
            .of_a(&si.meter)
            .create()
            .unwrap();
        let kmh = UnitBuilder::new()
            .named("kilometer per hour")
            .symbol("km/h")
            .times(&km)
            .per(&hour)
            .create()
            .unwrap();
        let mps = si.meter.divide(&si.second).unwrap();
        assert!(kmh.is_commensurable(&mps));
        let factor = kmh.scale().using(&f).unwrap();
        assert!(nearly_equal(factor, 1000.0 / 3600.0, Tolerances::default()));
    }

    #[test]
    fn repeated_factors_merge() {
        let si = si();
        let f = DoubleFactory::new();
        let km = UnitBuilder::new()
            .as_exactly(1000)
            .of_a(&si.meter)
            .create()
            .unwrap();
        let twice = UnitBuilder::new()
            .compound(&km, Exponent::ONE)
            .times(&km)
            .create()
            .unwrap();
        let squared = UnitBuilder::new()
            .compound(&km, Exponent::TWO)
            .create()
            .unwrap();
        assert!(twice.is_commensurable(&squared));
        assert_eq!(twice.scale().using(&f).unwrap(), squared.scale().using(&f).unwrap());
        assert_eq!(twice.scale().using(&f).unwrap(), 1_000_000.0);
        assert_eq!(twice.symbol(), squared.symbol());
    }

    #[test]
    fn cancelled_and_unitless_factors_are_elided() {
        let si = si();
        let per_meter_meter = UnitBuilder::new()
            .times(&si.meter)
            .times(&Unit::unitless())
            .times(&si.second)
            .per(&si.meter)
            .create()
            .unwrap();
        assert_eq!(per_meter_meter.name(), "second");
        let nothing = UnitBuilder::new()
            .times(&si.kilogram)
            .per(&si.kilogram)
            .create()
            .unwrap();
        assert!(nothing.dimension().is_dimensionless());
        assert_eq!(nothing.name(), "unitless");
    }

    #[test]
    fn declared_dimension_is_checked() {
        let si = si();
        let velocity = si.meter.divide(&si.second).unwrap().dimension().clone();
        let ok = UnitBuilder::new()
            .measuring(&velocity)
            .times(&si.meter)
            .per(&si.second)
            .create()
            .unwrap();
        assert_eq!(ok.dimension(), &velocity);

        let err = UnitBuilder::new()
            .measuring(&velocity)
            .times(&si.meter)
            .per(&si.kilogram)
            .create()
            .unwrap_err();
        assert!(err.is_incommensurable());

        let err = UnitBuilder::new()
            .measuring(&velocity)
            .as_exactly(5)
            .of_a(&si.second)
            .create()
            .unwrap_err();
        assert!(err.is_incommensurable());
    }

    #[test]
    fn compound_and_exact_cannot_mix() {
        let si = si();
        let err = UnitBuilder::new()
            .as_exactly(1000)
            .of_a(&si.meter)
            .times(&si.second)
            .create()
            .unwrap_err();
        assert!(matches!(err, UnitError::IllegalBuilderState { .. }));

        let err = UnitBuilder::new()
            .times(&si.second)
            .as_exactly(60)
            .create()
            .unwrap_err();
        assert!(matches!(err, UnitError::IllegalBuilderState { .. }));
    }

    #[test]
    fn incomplete_chains_fail() {
        let si = si();
        for builder in [
            UnitBuilder::new(),
            UnitBuilder::new().as_the_ratio(1),
            UnitBuilder::new().as_the_ratio(1).over(60),
            UnitBuilder::new().as_exactly(60),
            UnitBuilder::new().over(60).of_a(&si.second),
            UnitBuilder::new().as_the_ratio(1).of_a(&si.second),
        ] {
            assert!(matches!(
                builder.create(),
                Err(UnitError::IllegalBuilderState { .. })
            ));
        }
    }

    #[test]
    fn builders_fork() {
        let si = si();
        let f = DoubleFactory::new();
        let per_second = UnitBuilder::new().per(&si.second);
        let hertz = per_second.clone().named("hertz").create().unwrap();
        let velocity = per_second.times(&si.meter).create().unwrap();
        assert_eq!(hertz.name(), "hertz");
        assert_eq!(velocity.name(), "second^-1·meter");
        assert_eq!(hertz.scale().using(&f).unwrap(), 1.0);
        assert!(!hertz.is_commensurable(&velocity));
    }

    #[test]
    fn fractional_powers() {
        let si = si();
        let f = DoubleFactory::new();
        let km = UnitBuilder::new()
            .as_exactly(1_000_000)
            .of_a(&si.meter)
            .create()
            .unwrap();
        let root = km.pow(Exponent::HALF).unwrap();
        assert_eq!(root.scale().using(&f).unwrap(), 1000.0);
        assert_eq!(root.symbol(), "1000000 m^1/2");
    }
}
