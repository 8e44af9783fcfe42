//! Dimension handles.

use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use uf_core::{DimensionId, Exponent, FundamentalId, IdAllocator, Registry};

use crate::builder::DimensionBuilder;
use crate::composition::Composition;
use crate::error::{DimensionError, DimensionResult};

static DIMENSION_IDS: IdAllocator = IdAllocator::new();
static FUNDAMENTALS: Registry<FundamentalRecord> = Registry::new();

struct FundamentalRecord {
    dimension: Dimension,
}

/// A basis axis of the dimension vector space.
///
/// Identity-unique: two axes minted with the same name are still distinct.
/// Its own composition is itself at exponent one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FundamentalDimension(FundamentalId);

impl FundamentalDimension {
    /// Mint a new axis.
    ///
    /// Catalogs normally mint axes together with their reference unit via
    /// `uf_units::new_fundamental_pair`, so each axis gets exactly one
    /// fundamental unit.
    pub fn mint(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        let name = name.into();
        let symbol = symbol.into();
        let id = FUNDAMENTALS.register_with(|id| FundamentalRecord {
            dimension: Dimension::from_parts(
                name.clone(),
                symbol.clone(),
                Composition::of(FundamentalDimension(id)),
                Some(FundamentalDimension(id)),
            ),
        });
        tracing::debug!(axis = %name, symbol = %symbol, id = %id, "fundamental dimension minted");
        Self(id)
    }

    /// The process-wide dimensionless axis.
    pub fn dimensionless() -> Self {
        static DIMENSIONLESS: OnceLock<FundamentalDimension> = OnceLock::new();
        *DIMENSIONLESS.get_or_init(|| Self::mint("dimensionless", "1"))
    }

    pub fn is_dimensionless(self) -> bool {
        self == Self::dimensionless()
    }

    pub fn id(self) -> FundamentalId {
        self.0
    }

    /// The dimension handle for this axis.
    pub fn dimension(self) -> Dimension {
        self.record().dimension.clone()
    }

    pub fn name(self) -> String {
        self.record().dimension.name().to_string()
    }

    pub fn symbol(self) -> String {
        self.record().dimension.symbol().to_string()
    }

    fn record(self) -> Arc<FundamentalRecord> {
        FUNDAMENTALS
            .get(self.0)
            .expect("fundamental ids are only minted by the registry")
    }
}

impl fmt::Debug for FundamentalDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FundamentalDimension({})", self.symbol())
    }
}

/// A named, identity-unique dimension.
///
/// Cloning copies the handle, not the dimension: clones compare equal.
/// Distinct dimensions with equal compositions are unequal but
/// commensurable.
#[derive(Clone)]
pub struct Dimension {
    inner: Arc<DimensionInner>,
}

struct DimensionInner {
    id: DimensionId,
    name: String,
    symbol: String,
    composition: Composition,
    fundamental: Option<FundamentalDimension>,
}

impl Dimension {
    pub(crate) fn from_parts(
        name: String,
        symbol: String,
        composition: Composition,
        fundamental: Option<FundamentalDimension>,
    ) -> Self {
        let id = DIMENSION_IDS.next();
        tracing::trace!(dimension = %name, id = %id, "dimension created");
        Self {
            inner: Arc::new(DimensionInner {
                id,
                name,
                symbol,
                composition,
                fundamental,
            }),
        }
    }

    /// The dimension of pure numbers.
    pub fn dimensionless() -> Self {
        FundamentalDimension::dimensionless().dimension()
    }

    pub fn id(&self) -> DimensionId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn symbol(&self) -> &str {
        &self.inner.symbol
    }

    pub fn composition(&self) -> &Composition {
        &self.inner.composition
    }

    pub fn is_fundamental(&self) -> bool {
        self.inner.fundamental.is_some()
    }

    pub fn as_fundamental(&self) -> Option<FundamentalDimension> {
        self.inner.fundamental
    }

    pub fn is_dimensionless(&self) -> bool {
        self.inner.composition.is_dimensionless()
    }

    /// Same handle, or compositions that agree on every non-zero exponent.
    pub fn is_commensurable(&self, other: &Dimension) -> bool {
        self == other || self.inner.composition == other.inner.composition
    }

    /// Fail with [`DimensionError::Incommensurable`] unless commensurable.
    pub fn ensure_commensurable(&self, other: &Dimension) -> DimensionResult<()> {
        if self.is_commensurable(other) {
            Ok(())
        } else {
            Err(DimensionError::Incommensurable {
                left: self.composition().clone(),
                right: other.composition().clone(),
            })
        }
    }

    /// Anonymous product dimension `self · other`.
    pub fn multiply(&self, other: &Dimension) -> DimensionResult<Dimension> {
        Ok(DimensionBuilder::new().times(self)?.times(other)?.create())
    }

    /// Anonymous quotient dimension `self / other`.
    pub fn divide(&self, other: &Dimension) -> DimensionResult<Dimension> {
        Ok(DimensionBuilder::new().times(self)?.per(other)?.create())
    }

    /// Anonymous power dimension `self^exponent`.
    pub fn pow(&self, exponent: Exponent) -> DimensionResult<Dimension> {
        Ok(DimensionBuilder::new().append(self, exponent)?.create())
    }
}

impl PartialEq for Dimension {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Dimension {}

impl Hash for Dimension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.name)
    }
}

impl fmt::Debug for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dimension({}: {})", self.inner.name, self.inner.composition)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn commensurability_is_symmetric(a in -4_i32..4, b in -4_i32..4, c in -4_i32..4, d in -4_i32..4) {
            let x = FundamentalDimension::mint("x", "X").dimension();
            let y = FundamentalDimension::mint("y", "Y").dimension();
            let d1 = DimensionBuilder::new()
                .append(&x, Exponent::integer(a)).unwrap()
                .append(&y, Exponent::integer(b)).unwrap()
                .create();
            let d2 = DimensionBuilder::new()
                .append(&y, Exponent::integer(d)).unwrap()
                .append(&x, Exponent::integer(c)).unwrap()
                .create();
            prop_assert_eq!(d1.is_commensurable(&d2), d2.is_commensurable(&d1));
            prop_assert_eq!(d1.is_commensurable(&d2), a == c && b == d);
            prop_assert!(d1.is_commensurable(&d1));
            let neutral = d1.multiply(&Dimension::dimensionless()).unwrap();
            prop_assert!(neutral.is_commensurable(&d1));
        }
    }
}
