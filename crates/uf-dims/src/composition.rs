//! Dimensions as vectors over the fundamental axes.

use core::fmt;

use uf_core::Exponent;

use crate::dimension::FundamentalDimension;

/// Finite map from fundamental dimension to non-zero exponent.
///
/// Entries keep first-insertion order, which is the order generated names
/// and symbols are rendered in. Absent axes have exponent zero. A
/// composition with no entries other than the dimensionless axis is the
/// dimensionless composition.
#[derive(Clone, Default)]
pub struct Composition {
    entries: Vec<(FundamentalDimension, Exponent)>,
}

impl Composition {
    /// The composition of a single axis at exponent one.
    pub fn of(axis: FundamentalDimension) -> Self {
        Self {
            entries: vec![(axis, Exponent::ONE)],
        }
    }

    /// Build from accumulated entries, dropping zero exponents.
    pub(crate) fn from_entries(entries: Vec<(FundamentalDimension, Exponent)>) -> Self {
        Self {
            entries: entries.into_iter().filter(|(_, e)| !e.is_zero()).collect(),
        }
    }

    /// Exponent of `axis` (zero when absent).
    pub fn exponent(&self, axis: FundamentalDimension) -> Exponent {
        self.entries
            .iter()
            .find(|(a, _)| *a == axis)
            .map(|(_, e)| *e)
            .unwrap_or(Exponent::ZERO)
    }

    /// Iterate over all axes with non-zero exponents.
    pub fn iter(&self) -> impl Iterator<Item = (FundamentalDimension, Exponent)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_dimensionless(&self) -> bool {
        self.significant().next().is_none()
    }

    /// Entries that take part in equality (everything but the dimensionless axis).
    fn significant(&self) -> impl Iterator<Item = (FundamentalDimension, Exponent)> + '_ {
        self.iter().filter(|(a, _)| !a.is_dimensionless())
    }

    /// Render entries as `a·b^e`, naming each axis with `label`.
    pub(crate) fn render(&self, label: impl Fn(FundamentalDimension) -> String) -> String {
        if self.entries.is_empty() {
            return label(FundamentalDimension::dimensionless());
        }
        self.entries
            .iter()
            .map(|(axis, e)| {
                if e.is_one() {
                    label(*axis)
                } else {
                    format!("{}^{}", label(*axis), e)
                }
            })
            .collect::<Vec<_>>()
            .join("·")
    }
}

impl PartialEq for Composition {
    fn eq(&self, other: &Self) -> bool {
        self.significant().all(|(a, e)| other.exponent(a) == e)
            && other.significant().all(|(a, e)| self.exponent(a) == e)
    }
}

impl Eq for Composition {}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|axis| axis.symbol()))
    }
}

impl fmt::Debug for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Composition({self})")
    }
}
