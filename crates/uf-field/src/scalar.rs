//! Deferred dimensionless arithmetic.
//!
//! A [`Scalar`] describes a computation on numbers without committing to a
//! backend. Each operation returns a new node holding its operands; the tree
//! is shared (`Arc`) and never mutated. [`Scalar::using`] evaluates the tree
//! against a factory and caches the result on every node it visits, keyed by
//! factory identity.
//!
//! Evaluation and teardown walk the tree with an explicit work list, so a
//! long accumulated chain needs heap, not stack. Formatting still recurses.

use core::fmt;
use core::mem;
use std::sync::Arc;

use uf_core::Exponent;

use crate::error::FieldResult;
use crate::field::{Factory, Field};
use crate::memo::Memo;

#[derive(Clone)]
pub struct Scalar {
    node: Arc<ScalarNode>,
}

struct ScalarNode {
    op: ScalarOp,
    memo: Memo,
}

enum ScalarOp {
    Integer(i64),
    Text(String),
    Rational(Exponent),
    Negate(Scalar),
    Reciprocal(Scalar),
    Add(Scalar, Scalar),
    Subtract(Scalar, Scalar),
    Multiply(Scalar, Scalar),
    Divide(Scalar, Scalar),
    Power(Scalar, Scalar),
    PowerExponent(Scalar, Exponent),
    Logarithm { value: Scalar, base: Scalar },
}

impl Scalar {
    fn from_op(op: ScalarOp) -> Self {
        Self {
            node: Arc::new(ScalarNode {
                op,
                memo: Memo::new(),
            }),
        }
    }

    pub fn of(value: i64) -> Self {
        Self::from_op(ScalarOp::Integer(value))
    }

    /// Numeric text, parsed by the backend at particularization time.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::from_op(ScalarOp::Text(text.into()))
    }

    /// The exact rational value of an exponent.
    pub fn rational(value: Exponent) -> Self {
        Self::from_op(ScalarOp::Rational(value))
    }

    pub fn zero() -> Self {
        Self::of(0)
    }

    pub fn one() -> Self {
        Self::of(1)
    }

    pub fn negate(&self) -> Self {
        Self::from_op(ScalarOp::Negate(self.clone()))
    }

    pub fn reciprocal(&self) -> Self {
        Self::from_op(ScalarOp::Reciprocal(self.clone()))
    }

    pub fn add(&self, rhs: &Scalar) -> Self {
        Self::from_op(ScalarOp::Add(self.clone(), rhs.clone()))
    }

    pub fn subtract(&self, rhs: &Scalar) -> Self {
        Self::from_op(ScalarOp::Subtract(self.clone(), rhs.clone()))
    }

    pub fn multiply(&self, rhs: &Scalar) -> Self {
        Self::from_op(ScalarOp::Multiply(self.clone(), rhs.clone()))
    }

    pub fn divide(&self, rhs: &Scalar) -> Self {
        Self::from_op(ScalarOp::Divide(self.clone(), rhs.clone()))
    }

    pub fn pow(&self, exponent: &Scalar) -> Self {
        Self::from_op(ScalarOp::Power(self.clone(), exponent.clone()))
    }

    pub fn pow_exponent(&self, exponent: Exponent) -> Self {
        Self::from_op(ScalarOp::PowerExponent(self.clone(), exponent))
    }

    /// Logarithm of `self` in `base`.
    pub fn log(&self, base: &Scalar) -> Self {
        Self::from_op(ScalarOp::Logarithm {
            value: self.clone(),
            base: base.clone(),
        })
    }

    /// Particularize against `factory`.
    ///
    /// The first call per factory evaluates the tree; later calls with the
    /// same factory (or a clone of it) return the cached value.
    pub fn using<F: Factory>(&self, factory: &F) -> FieldResult<F::Value> {
        let key = factory.id();
        // Post-order: a node is evaluated once both operands are cached.
        let mut pending = vec![(self, false)];
        while let Some((scalar, operands_ready)) = pending.pop() {
            if scalar.node.memo.contains::<F::Value>(key) {
                continue;
            }
            if operands_ready {
                scalar.cached(factory)?;
            } else {
                pending.push((scalar, true));
                pending.extend(scalar.operands().into_iter().flatten().map(|s| (s, false)));
            }
        }
        self.cached(factory)
    }

    fn cached<F: Factory>(&self, factory: &F) -> FieldResult<F::Value> {
        self.node
            .memo
            .get_or_compute(factory.id(), || self.evaluate(factory))
    }

    fn operands(&self) -> [Option<&Scalar>; 2] {
        match &self.node.op {
            ScalarOp::Integer(_) | ScalarOp::Text(_) | ScalarOp::Rational(_) => [None, None],
            ScalarOp::Negate(x) | ScalarOp::Reciprocal(x) | ScalarOp::PowerExponent(x, _) => {
                [Some(x), None]
            }
            ScalarOp::Add(a, b)
            | ScalarOp::Subtract(a, b)
            | ScalarOp::Multiply(a, b)
            | ScalarOp::Divide(a, b)
            | ScalarOp::Power(a, b)
            | ScalarOp::Logarithm { value: a, base: b } => [Some(a), Some(b)],
        }
    }

    fn evaluate<F: Factory>(&self, factory: &F) -> FieldResult<F::Value> {
        match &self.node.op {
            ScalarOp::Integer(v) => Ok(factory.of_int(*v)),
            ScalarOp::Text(text) => factory.of_str(text),
            ScalarOp::Rational(e) => factory.of_exponent(*e),
            ScalarOp::Negate(x) => Ok(x.cached(factory)?.negate()),
            ScalarOp::Reciprocal(x) => x.cached(factory)?.reciprocal(),
            ScalarOp::Add(a, b) => Ok(a.cached(factory)?.add(&b.cached(factory)?)),
            ScalarOp::Subtract(a, b) => Ok(a.cached(factory)?.subtract(&b.cached(factory)?)),
            ScalarOp::Multiply(a, b) => Ok(a.cached(factory)?.multiply(&b.cached(factory)?)),
            ScalarOp::Divide(a, b) => a.cached(factory)?.divide(&b.cached(factory)?),
            ScalarOp::Power(a, b) => a.cached(factory)?.power(&b.cached(factory)?),
            ScalarOp::PowerExponent(a, e) => a.cached(factory)?.power_exponent(*e),
            ScalarOp::Logarithm { value, base } => {
                value.cached(factory)?.logarithm(&base.cached(factory)?)
            }
        }
    }
}

impl ScalarOp {
    /// Move the operands out, leaving a leaf behind.
    fn release_operands(&mut self, into: &mut Vec<Scalar>) {
        match mem::replace(self, ScalarOp::Integer(0)) {
            ScalarOp::Integer(_) | ScalarOp::Text(_) | ScalarOp::Rational(_) => {}
            ScalarOp::Negate(x) | ScalarOp::Reciprocal(x) | ScalarOp::PowerExponent(x, _) => {
                into.push(x)
            }
            ScalarOp::Add(a, b)
            | ScalarOp::Subtract(a, b)
            | ScalarOp::Multiply(a, b)
            | ScalarOp::Divide(a, b)
            | ScalarOp::Power(a, b)
            | ScalarOp::Logarithm { value: a, base: b } => into.extend([a, b]),
        }
    }
}

impl Drop for ScalarNode {
    fn drop(&mut self) {
        let mut orphans = Vec::new();
        self.op.release_operands(&mut orphans);
        while let Some(scalar) = orphans.pop() {
            // Shared operands are still owned elsewhere; only unique ones unwind.
            if let Ok(mut node) = Arc::try_unwrap(scalar.node) {
                node.op.release_operands(&mut orphans);
            }
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::of(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::of(i64::from(value))
    }
}

impl From<Exponent> for Scalar {
    fn from(value: Exponent) -> Self {
        Self::rational(value)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node.op {
            ScalarOp::Integer(v) => write!(f, "{v}"),
            ScalarOp::Text(text) => write!(f, "{text}"),
            ScalarOp::Rational(e) if e.is_integer() => write!(f, "{e}"),
            ScalarOp::Rational(e) => write!(f, "({e})"),
            ScalarOp::Negate(x) => write!(f, "-{x}"),
            ScalarOp::Reciprocal(x) => write!(f, "1/{x}"),
            ScalarOp::Add(a, b) => write!(f, "({a} + {b})"),
            ScalarOp::Subtract(a, b) => write!(f, "({a} - {b})"),
            ScalarOp::Multiply(a, b) => write!(f, "({a} · {b})"),
            ScalarOp::Divide(a, b) => write!(f, "({a} / {b})"),
            ScalarOp::Power(a, b) => write!(f, "{a}^{b}"),
            ScalarOp::PowerExponent(a, e) if e.is_integer() => write!(f, "{a}^{e}"),
            ScalarOp::PowerExponent(a, e) => write!(f, "{a}^({e})"),
            ScalarOp::Logarithm { value, base } => write!(f, "log_{base}({value})"),
        }
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DoubleFactory, FieldError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use crate::next_factory_id;
    use uf_core::{FactoryId, Real};

    /// Double factory that counts how many leaves it has been asked to mint.
    /// Each instance has its own identity.
    #[derive(Clone)]
    struct CountingFactory {
        id: FactoryId,
        inner: DoubleFactory,
        leaves: Arc<AtomicUsize>,
    }

    impl CountingFactory {
        fn new() -> Self {
            Self {
                id: next_factory_id(),
                inner: DoubleFactory::new(),
                leaves: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn leaves(&self) -> usize {
            self.leaves.load(Ordering::SeqCst)
        }
    }

    impl Factory for CountingFactory {
        type Value = Real;

        fn id(&self) -> FactoryId {
            self.id
        }

        fn name(&self) -> &'static str {
            "counting"
        }

        fn zero(&self) -> Real {
            self.inner.zero()
        }

        fn one(&self) -> Real {
            self.inner.one()
        }

        fn of_int(&self, value: i64) -> Real {
            self.leaves.fetch_add(1, Ordering::SeqCst);
            self.inner.of_int(value)
        }

        fn of_str(&self, text: &str) -> FieldResult<Real> {
            self.leaves.fetch_add(1, Ordering::SeqCst);
            self.inner.of_str(text)
        }
    }

    #[test]
    fn evaluates_arithmetic() {
        let f = DoubleFactory::new();
        let s = Scalar::of(1000)
            .divide(&Scalar::of(8))
            .subtract(&Scalar::of(25))
            .negate();
        assert_eq!(s.using(&f).unwrap(), -100.0);
        assert_eq!(Scalar::of(2).pow(&Scalar::of(10)).using(&f).unwrap(), 1024.0);
        assert_eq!(Scalar::of(1000).log(&Scalar::of(10)).using(&f).unwrap(), 3.0);
        assert_eq!(
            Scalar::of(16)
                .pow_exponent(Exponent::new(3, 4).unwrap())
                .using(&f)
                .unwrap(),
            8.0
        );
        assert_eq!(Scalar::rational(Exponent::HALF).using(&f).unwrap(), 0.5);
    }

    #[test]
    fn second_particularization_is_cached() {
        let f = CountingFactory::new();
        let s = Scalar::of(3).multiply(&Scalar::from_text("1.5")).add(&Scalar::of(1));
        let first = s.using(&f).unwrap();
        assert_eq!(f.leaves(), 3);
        let second = s.using(&f).unwrap();
        assert!(first.field_eq(&second));
        assert_eq!(f.leaves(), 3);
    }

    #[test]
    fn other_factories_recompute() {
        let f = CountingFactory::new();
        let g = CountingFactory::new();
        let s = Scalar::of(6).divide(&Scalar::of(4));
        assert_eq!(s.using(&f).unwrap(), 1.5);
        assert_eq!(s.using(&g).unwrap(), 1.5);
        assert_eq!(f.leaves(), 2);
        assert_eq!(g.leaves(), 2);
    }

    #[test]
    fn shared_subtrees_evaluate_once() {
        let f = CountingFactory::new();
        let x = Scalar::from_text("2.5");
        let s = x.multiply(&x).add(&x);
        assert_eq!(s.using(&f).unwrap(), 8.75);
        assert_eq!(f.leaves(), 1);
    }

    #[test]
    fn fresh_double_factories_share_one_cache_entry() {
        let s = Scalar::of(1000).multiply(&Scalar::from_text("2.5"));
        for _ in 0..10_000 {
            assert_eq!(s.using(&DoubleFactory::new()).unwrap(), 2500.0);
        }
        assert_eq!(s.node.memo.len(), 1);
    }

    #[test]
    fn long_chains_evaluate_and_drop_without_deep_recursion() {
        let f = CountingFactory::new();
        let mut total = Scalar::zero();
        for _ in 0..100_000 {
            total = total.add(&Scalar::one());
        }
        assert_eq!(total.using(&f).unwrap(), 100_000.0);
        assert_eq!(f.leaves(), 100_001);
        assert_eq!(total.using(&f).unwrap(), 100_000.0);
        assert_eq!(f.leaves(), 100_001);
        drop(total);
    }

    #[test]
    fn shared_operands_survive_their_parent() {
        let f = DoubleFactory::new();
        let base = Scalar::of(2).add(&Scalar::of(3));
        let parent = base.multiply(&Scalar::of(4)).negate();
        assert_eq!(parent.using(&f).unwrap(), -20.0);
        drop(parent);
        assert_eq!(base.using(&f).unwrap(), 5.0);
        assert_eq!(base.to_string(), "(2 + 3)");
    }

    #[test]
    fn failed_operand_aborts_the_walk() {
        let f = CountingFactory::new();
        let s = Scalar::of(1)
            .divide(&Scalar::zero())
            .add(&Scalar::of(5));
        assert_eq!(s.using(&f), Err(FieldError::DivisionByZero));
        assert!(s.node.memo.is_empty());
    }

    #[test]
    fn errors_surface_at_particularization() {
        let f = DoubleFactory::new();
        let bad = Scalar::from_text("12 apples").add(&Scalar::one());
        assert!(matches!(bad.using(&f), Err(FieldError::NumberFormat { .. })));
        let div = Scalar::one().divide(&Scalar::zero());
        assert_eq!(div.using(&f), Err(FieldError::DivisionByZero));
    }

    #[test]
    fn display_shows_the_tree() {
        let s = Scalar::of(1).divide(&Scalar::of(1000)).multiply(&Scalar::from_text("2.5"));
        assert_eq!(s.to_string(), "((1 / 1000) · 2.5)");
        assert_eq!(
            Scalar::of(2).pow_exponent(Exponent::HALF).to_string(),
            "2^(1/2)"
        );
    }

    #[test]
    fn scalars_cross_threads() {
        let f = DoubleFactory::new();
        let s = Scalar::of(7).multiply(&Scalar::of(6));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let s = s.clone();
                let f = f.clone();
                std::thread::spawn(move || s.using(&f).unwrap())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), 42.0);
        }
    }
}
