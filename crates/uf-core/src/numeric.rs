/// Value type of the double-precision backend, and of the tolerances used to
/// compare its results.
pub type Real = f64;

/// How far apart two doubles may be and still count as the same result.
///
/// A pair passes if it is within `abs` of each other, or within `rel` times
/// the larger magnitude.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// A few ulps: for results that differ only in evaluation order.
    pub const fn tight() -> Self {
        Self {
            abs: 1e-300,
            rel: 1e-14,
        }
    }
}

/// Compare under `tol`. NaN is never near anything, itself included.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let gap = (a - b).abs();
    gap <= tol.abs || gap <= tol.rel * a.abs().max(b.abs())
}
