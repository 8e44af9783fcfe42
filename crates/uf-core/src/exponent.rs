//! Reduced rational exponents.
//!
//! An [`Exponent`] is the power a fundamental dimension (or a unit) is raised
//! to inside a composition. Values are always stored in lowest terms with a
//! strictly positive denominator, so structural equality is numeric equality.
//!
//! All arithmetic widens to `i64`, reduces, then narrows back to `i32`. A
//! result that does not fit after reduction fails with [`UfError::Overflow`].

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use crate::error::{UfError, UfResult};

/// Immutable reduced rational number `numerator / denominator`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(i32, i32)", into = "(i32, i32)")
)]
pub struct Exponent {
    num: i32,
    den: i32,
}

impl Exponent {
    pub const ZERO: Exponent = Exponent { num: 0, den: 1 };
    pub const ONE: Exponent = Exponent { num: 1, den: 1 };
    pub const MINUS_ONE: Exponent = Exponent { num: -1, den: 1 };
    pub const TWO: Exponent = Exponent { num: 2, den: 1 };
    pub const HALF: Exponent = Exponent { num: 1, den: 2 };

    /// Build `numerator / denominator` in canonical form.
    pub fn new(numerator: i32, denominator: i32) -> UfResult<Self> {
        Self::reduce(i64::from(numerator), i64::from(denominator), "construction")
    }

    /// Integral exponent `n / 1`.
    pub const fn integer(n: i32) -> Self {
        Self { num: n, den: 1 }
    }

    pub const fn numerator(self) -> i32 {
        self.num
    }

    pub const fn denominator(self) -> i32 {
        self.den
    }

    pub const fn is_zero(self) -> bool {
        self.num == 0
    }

    pub const fn is_one(self) -> bool {
        self.num == 1 && self.den == 1
    }

    pub const fn is_integer(self) -> bool {
        self.den == 1
    }

    pub const fn is_negative(self) -> bool {
        self.num < 0
    }

    pub fn to_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Sum of two exponents.
    ///
    /// Named `product` because multiplying two powers of the same base adds
    /// their exponents: `x^a · x^b = x^(a+b)`.
    pub fn product(self, other: Exponent) -> UfResult<Self> {
        if other.is_zero() {
            return Ok(self);
        }
        if self.is_zero() {
            return Ok(other);
        }
        if self.den == other.den {
            return Self::reduce(
                i64::from(self.num) + i64::from(other.num),
                i64::from(self.den),
                "product",
            );
        }
        let num = i64::from(self.num) * i64::from(other.den)
            + i64::from(other.num) * i64::from(self.den);
        let den = i64::from(self.den) * i64::from(other.den);
        Self::reduce(num, den, "product")
    }

    /// Product of two exponents: `(x^a)^b = x^(a·b)`.
    pub fn power(self, other: Exponent) -> UfResult<Self> {
        if self.is_zero() || other.is_zero() {
            return Ok(Self::ZERO);
        }
        if other.is_one() {
            return Ok(self);
        }
        if self.is_one() {
            return Ok(other);
        }
        Self::reduce(
            i64::from(self.num) * i64::from(other.num),
            i64::from(self.den) * i64::from(other.den),
            "power",
        )
    }

    pub fn negate(self) -> UfResult<Self> {
        Self::reduce(-i64::from(self.num), i64::from(self.den), "negate")
    }

    pub fn abs(self) -> UfResult<Self> {
        if self.is_negative() {
            self.negate()
        } else {
            Ok(self)
        }
    }

    /// Canonical form of `n / d`: divided by the gcd, denominator forced positive.
    fn reduce(n: i64, d: i64, what: &'static str) -> UfResult<Self> {
        if d == 0 {
            return Err(UfError::InvalidExponent { numerator: n });
        }
        if n == 0 {
            return Ok(Self::ZERO);
        }
        let g = gcd(n.unsigned_abs(), d.unsigned_abs());
        // g divides both and is at most |d|, so it fits back into i64.
        let g = g as i64;
        let (mut n, mut d) = (n / g, d / g);
        if d < 0 {
            n = n.checked_neg().ok_or(UfError::Overflow { what })?;
            d = d.checked_neg().ok_or(UfError::Overflow { what })?;
        }
        let num = i32::try_from(n).map_err(|_| UfError::Overflow { what })?;
        let den = i32::try_from(d).map_err(|_| UfError::Overflow { what })?;
        Ok(Self { num, den })
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Default for Exponent {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i32> for Exponent {
    fn from(n: i32) -> Self {
        Self::integer(n)
    }
}

impl TryFrom<(i32, i32)> for Exponent {
    type Error = UfError;

    fn try_from((n, d): (i32, i32)) -> UfResult<Self> {
        Self::new(n, d)
    }
}

impl From<Exponent> for (i32, i32) {
    fn from(e: Exponent) -> Self {
        (e.num, e.den)
    }
}

impl Ord for Exponent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross-multiplication preserves order.
        let lhs = i64::from(self.num) * i64::from(other.den);
        let rhs = i64::from(other.num) * i64::from(self.den);
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Exponent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Exponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Exponent({self})")
    }
}

impl fmt::Display for Exponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

impl FromStr for Exponent {
    type Err = UfError;

    /// Accepts `"p"` or `"p/q"` with optional surrounding whitespace.
    fn from_str(s: &str) -> UfResult<Self> {
        let bad = || UfError::ExponentFormat {
            text: s.to_string(),
        };
        let trimmed = s.trim();
        match trimmed.split_once('/') {
            Some((n, d)) => {
                let n: i32 = n.trim().parse().map_err(|_| bad())?;
                let d: i32 = d.trim().parse().map_err(|_| bad())?;
                Self::new(n, d)
            }
            None => trimmed.parse::<i32>().map(Self::integer).map_err(|_| bad()),
        }
    }
}
