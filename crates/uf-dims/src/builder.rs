//! Dimension construction by folding powers of existing dimensions.

use uf_core::Exponent;

use crate::composition::Composition;
use crate::dimension::{Dimension, FundamentalDimension};
use crate::error::DimensionResult;

/// Immutable accumulator of a composition.
///
/// Every step consumes the builder and returns a new one; clone a builder to
/// fork it into several related dimensions.
#[derive(Clone, Debug, Default)]
pub struct DimensionBuilder {
    name: Option<String>,
    symbol: Option<String>,
    components: Vec<(FundamentalDimension, Exponent)>,
}

impl DimensionBuilder {
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

    /// Fold `dimension^exponent` into the accumulator.
    ///
    /// Each non-zero axis of the dimension's composition contributes
    /// `axis_exponent · exponent`, added to whatever the accumulator already
    /// holds for that axis. The dimensionless axis is skipped.
    pub fn append(mut self, dimension: &Dimension, exponent: Exponent) -> DimensionResult<Self> {
        if exponent.is_zero() {
            return Ok(self);
        }
        for (axis, axis_exponent) in dimension.composition().iter() {
            if axis.is_dimensionless() {
                continue;
            }
            let contribution = axis_exponent.power(exponent)?;
            match self.components.iter_mut().find(|(a, _)| *a == axis) {
                Some((_, current)) => *current = current.product(contribution)?,
                None => self.components.push((axis, contribution)),
            }
        }
        Ok(self)
    }

    pub fn times(self, dimension: &Dimension) -> DimensionResult<Self> {
        self.append(dimension, Exponent::ONE)
    }

    pub fn per(self, dimension: &Dimension) -> DimensionResult<Self> {
        self.append(dimension, Exponent::MINUS_ONE)
    }

    /// Freeze into a new dimension.
    ///
    /// Zero exponents are stripped; an empty result becomes the
    /// dimensionless axis at exponent one. Missing names and symbols are
    /// generated from the axes in first-insertion order (`length·time^-1`).
    pub fn create(self) -> Dimension {
        let mut composition = Composition::from_entries(self.components);
        if composition.is_empty() {
            composition = Composition::of(FundamentalDimension::dimensionless());
        }
        let name = self
            .name
            .unwrap_or_else(|| composition.render(|axis| axis.name()));
        let symbol = self
            .symbol
            .unwrap_or_else(|| composition.render(|axis| axis.symbol()));
        Dimension::from_parts(name, symbol, composition, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DimensionError;
    use uf_core::UfError;

    #[test]
    fn generated_names_follow_insertion_order() {
        let length = FundamentalDimension::mint("length", "L").dimension();
        let time = FundamentalDimension::mint("time", "T").dimension();
        let accel = DimensionBuilder::new()
            .times(&length)
            .unwrap()
            .append(&time, Exponent::integer(-2))
            .unwrap()
            .create();
        assert_eq!(accel.name(), "length·time^-2");
        assert_eq!(accel.symbol(), "L·T^-2");
        assert!(!accel.is_fundamental());
    }

    #[test]
    fn explicit_names_win() {
        let length = FundamentalDimension::mint("length", "L").dimension();
        let area = DimensionBuilder::new()
            .named("area")
            .symbol("A")
            .append(&length, Exponent::TWO)
            .unwrap()
            .create();
        assert_eq!(area.name(), "area");
        assert_eq!(area.symbol(), "A");
    }

    #[test]
    fn cancelling_axes_become_dimensionless() {
        let length = FundamentalDimension::mint("length", "L").dimension();
        let ratio = DimensionBuilder::new()
            .times(&length)
            .unwrap()
            .per(&length)
            .unwrap()
            .create();
        assert!(ratio.is_dimensionless());
        assert_eq!(ratio.composition().len(), 1);
        assert_eq!(ratio.name(), "dimensionless");
        assert_eq!(ratio.symbol(), "1");
    }

    #[test]
    fn derived_dimensions_fold_through() {
        let length = FundamentalDimension::mint("length", "L").dimension();
        let time = FundamentalDimension::mint("time", "T").dimension();
        let velocity = length.divide(&time).unwrap();
        let distance = DimensionBuilder::new()
            .times(&velocity)
            .unwrap()
            .times(&time)
            .unwrap()
            .create();
        assert!(distance.is_commensurable(&length));
    }

    #[test]
    fn forked_builders_are_independent() {
        let length = FundamentalDimension::mint("length", "L").dimension();
        let time = FundamentalDimension::mint("time", "T").dimension();
        let base = DimensionBuilder::new().times(&length).unwrap();
        let velocity = base.clone().per(&time).unwrap().create();
        let area = base.times(&length).unwrap().create();
        assert_eq!(velocity.symbol(), "L·T^-1");
        assert_eq!(area.symbol(), "L^2");
    }

    #[test]
    fn overflow_propagates() {
        let length = FundamentalDimension::mint("length", "L").dimension();
        let err = DimensionBuilder::new()
            .append(&length, Exponent::integer(i32::MAX))
            .unwrap()
            .times(&length)
            .unwrap_err();
        assert!(matches!(
            err,
            DimensionError::Exponent(UfError::Overflow { .. })
        ));
    }
}
