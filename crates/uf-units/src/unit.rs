//! Unit handles and fundamental pairing.

use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use uf_core::{Exponent, IdAllocator, UnitId};
use uf_dims::{Dimension, DimensionResult, FundamentalDimension};
use uf_field::Scalar;

use crate::builder::UnitBuilder;
use crate::error::UnitResult;

static UNIT_IDS: IdAllocator = IdAllocator::new();

/// A named, identity-unique unit.
///
/// `scale` is the number of base units equal to one of this unit. Cloning
/// copies the handle; two units built separately are never equal, even
/// with identical names, dimension and scale.
#[derive(Clone)]
pub struct Unit {
    inner: Arc<UnitInner>,
}

struct UnitInner {
    id: UnitId,
    name: String,
    symbol: String,
    dimension: Dimension,
    scale: Scalar,
    fundamental: bool,
}

impl Unit {
    pub(crate) fn from_parts(
        name: String,
        symbol: String,
        dimension: Dimension,
        scale: Scalar,
        fundamental: bool,
    ) -> Self {
        Self {
            inner: Arc::new(UnitInner {
                id: UNIT_IDS.next(),
                name,
                symbol,
                dimension,
                scale,
                fundamental,
            }),
        }
    }

    /// The universal unit of pure numbers, paired with the dimensionless axis.
    pub fn unitless() -> Unit {
        static UNITLESS: OnceLock<Unit> = OnceLock::new();
        UNITLESS
            .get_or_init(|| {
                FundamentalUnit::for_axis(FundamentalDimension::dimensionless(), "unitless", "")
                    .into_unit()
            })
            .clone()
    }

    pub fn id(&self) -> UnitId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn symbol(&self) -> &str {
        &self.inner.symbol
    }

    pub fn dimension(&self) -> &Dimension {
        &self.inner.dimension
    }

    /// Base units per one of this unit.
    pub fn scale(&self) -> &Scalar {
        &self.inner.scale
    }

    pub fn is_fundamental(&self) -> bool {
        self.inner.fundamental
    }

    pub fn is_unitless(&self) -> bool {
        *self == Self::unitless()
    }

    pub fn is_commensurable(&self, other: &Unit) -> bool {
        self.inner.dimension.is_commensurable(&other.inner.dimension)
    }

    pub fn ensure_commensurable(&self, other: &Unit) -> DimensionResult<()> {
        self.inner.dimension.ensure_commensurable(&other.inner.dimension)
    }

    /// Factor converting a value in `self` to a value in `target`.
    pub fn conversion_to(&self, target: &Unit) -> DimensionResult<Scalar> {
        self.ensure_commensurable(target)?;
        Ok(self.inner.scale.divide(&target.inner.scale))
    }

    /// The compound unit `self · other`.
    pub fn multiply(&self, other: &Unit) -> UnitResult<Unit> {
        UnitBuilder::new().times(self).times(other).create()
    }

    /// The compound unit `self / other`.
    pub fn divide(&self, other: &Unit) -> UnitResult<Unit> {
        UnitBuilder::new().times(self).per(other).create()
    }

    /// The compound unit `self^exponent`.
    pub fn pow(&self, exponent: Exponent) -> UnitResult<Unit> {
        UnitBuilder::new().compound(self, exponent).create()
    }

    pub fn reciprocal(&self) -> UnitResult<Unit> {
        self.pow(Exponent::MINUS_ONE)
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Unit {}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.symbol)
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unit({} [{}] = {} base, {})",
            self.inner.name,
            self.inner.symbol,
            self.inner.scale,
            self.inner.dimension.composition()
        )
    }
}

/// The reference unit of a basis axis; its scale is exactly one.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FundamentalUnit {
    unit: Unit,
    axis: FundamentalDimension,
}

impl FundamentalUnit {
    fn for_axis(axis: FundamentalDimension, name: &str, symbol: &str) -> Self {
        let unit = Unit::from_parts(
            name.to_string(),
            symbol.to_string(),
            axis.dimension(),
            Scalar::one(),
            true,
        );
        Self { unit, axis }
    }

    pub fn axis(&self) -> FundamentalDimension {
        self.axis
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn into_unit(self) -> Unit {
        self.unit
    }
}

impl AsRef<Unit> for FundamentalUnit {
    fn as_ref(&self) -> &Unit {
        &self.unit
    }
}

impl From<FundamentalUnit> for Unit {
    fn from(unit: FundamentalUnit) -> Self {
        unit.unit
    }
}

impl fmt::Debug for FundamentalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FundamentalUnit({})", self.unit.name())
    }
}

/// Mint a new basis axis together with its reference unit.
pub fn new_fundamental_pair(
    dimension_name: &str,
    dimension_symbol: &str,
    unit_name: &str,
    unit_symbol: &str,
) -> (FundamentalDimension, FundamentalUnit) {
    let axis = FundamentalDimension::mint(dimension_name, dimension_symbol);
    let unit = FundamentalUnit::for_axis(axis, unit_name, unit_symbol);
    tracing::debug!(
        axis = %dimension_name,
        unit = %unit_name,
        symbol = %unit_symbol,
        "fundamental pair minted"
    );
    (axis, unit)
}
