//! Deferred dimensioned arithmetic.
//!
//! An [`Expression`] is a tree of operations on measurements. Its unit (and
//! so its dimension) is computed when the node is built, which is where
//! incommensurable additions fail. Only the numeric value is deferred:
//! [`Expression::using`] evaluates the tree against a factory and caches the
//! resulting [`Measure`] on every visited node, keyed by factory identity.
//! Like [`Scalar`], evaluation and teardown use a work list, not recursion.

use core::fmt;
use core::mem;
use std::any::{type_name, Any};
use std::sync::{Arc, LazyLock};

use uf_core::Exponent;
use uf_dims::Dimension;
use uf_field::{Factory, Field, Memo, Scalar};
use uf_units::Unit;

use crate::error::{MeasureError, MeasureResult};
use crate::measure::Measure;

#[derive(Clone)]
pub struct Expression {
    node: Arc<ExprNode>,
}

struct ExprNode {
    op: ExprOp,
    unit: Unit,
    memo: Memo,
}

enum ExprOp {
    Take(Scalar),
    Committed {
        value: Arc<dyn Any + Send + Sync>,
        type_name: &'static str,
        text: String,
    },
    Add {
        left: Expression,
        right: Expression,
        rebase: Option<Scalar>,
    },
    Subtract {
        left: Expression,
        right: Expression,
        rebase: Option<Scalar>,
    },
    Multiply(Expression, Expression),
    Divide(Expression, Expression),
    Power(Expression, Exponent),
    Negate(Expression),
    Reciprocal(Expression),
    ScaleBy(Expression, Scalar),
    Rebase { operand: Expression, factor: Scalar },
}

impl Expression {
    fn from_op(op: ExprOp, unit: Unit) -> Self {
        Self {
            node: Arc::new(ExprNode {
                op,
                unit,
                memo: Memo::new(),
            }),
        }
    }

    /// `value` of `unit`, evaluated lazily.
    pub fn take(value: impl Into<Scalar>, unit: &Unit) -> Self {
        Self::from_op(ExprOp::Take(value.into()), unit.clone())
    }

    /// Wrap an already committed measure. Particularizing against a backend
    /// with a different value type fails with [`MeasureError::FieldMismatch`].
    pub fn measured<K: Factory>(measure: &Measure<K>) -> Self {
        Self::from_op(
            ExprOp::Committed {
                value: Arc::new(measure.value().clone()),
                type_name: type_name::<K::Value>(),
                text: measure.value().to_string(),
            },
            measure.unit().clone(),
        )
    }

    pub fn unit(&self) -> &Unit {
        &self.node.unit
    }

    pub fn dimension(&self) -> &Dimension {
        self.node.unit.dimension()
    }

    /// Factor taking values of `rhs` into `self`'s unit; `None` when the
    /// units are identical.
    fn rebase_factor(&self, rhs: &Expression) -> MeasureResult<Option<Scalar>> {
        if rhs.unit() == self.unit() {
            return Ok(None);
        }
        Ok(Some(rhs.unit().conversion_to(self.unit())?))
    }

    /// Sum in `self`'s unit. Fails now if the dimensions differ.
    pub fn add(&self, rhs: impl Into<Expression>) -> MeasureResult<Expression> {
        let right = rhs.into();
        let rebase = self.rebase_factor(&right)?;
        Ok(Self::from_op(
            ExprOp::Add {
                left: self.clone(),
                right,
                rebase,
            },
            self.unit().clone(),
        ))
    }

    pub fn subtract(&self, rhs: impl Into<Expression>) -> MeasureResult<Expression> {
        let right = rhs.into();
        let rebase = self.rebase_factor(&right)?;
        Ok(Self::from_op(
            ExprOp::Subtract {
                left: self.clone(),
                right,
                rebase,
            },
            self.unit().clone(),
        ))
    }

    /// Product, in the compound unit of both operands.
    pub fn multiply(&self, rhs: impl Into<Expression>) -> MeasureResult<Expression> {
        let right = rhs.into();
        let unit = self.unit().multiply(right.unit())?;
        Ok(Self::from_op(ExprOp::Multiply(self.clone(), right), unit))
    }

    pub fn divide(&self, rhs: impl Into<Expression>) -> MeasureResult<Expression> {
        let right = rhs.into();
        let unit = self.unit().divide(right.unit())?;
        Ok(Self::from_op(ExprOp::Divide(self.clone(), right), unit))
    }

    pub fn pow(&self, exponent: Exponent) -> MeasureResult<Expression> {
        let unit = self.unit().pow(exponent)?;
        Ok(Self::from_op(ExprOp::Power(self.clone(), exponent), unit))
    }

    pub fn reciprocal(&self) -> MeasureResult<Expression> {
        let unit = self.unit().reciprocal()?;
        Ok(Self::from_op(ExprOp::Reciprocal(self.clone()), unit))
    }

    pub fn negate(&self) -> Expression {
        Self::from_op(ExprOp::Negate(self.clone()), self.unit().clone())
    }

    /// Multiply by a dimensionless factor; the unit is unchanged.
    pub fn scale_by(&self, factor: impl Into<Scalar>) -> Expression {
        Self::from_op(
            ExprOp::ScaleBy(self.clone(), factor.into()),
            self.unit().clone(),
        )
    }

    /// Divide by a dimensionless factor; the unit is unchanged.
    pub fn divide_by(&self, factor: impl Into<Scalar>) -> Expression {
        self.scale_by(factor.into().reciprocal())
    }

    /// The same quantity expressed in `target`. Fails now if the dimensions
    /// differ.
    pub fn as_unit(&self, target: &Unit) -> MeasureResult<Expression> {
        if self.unit() == target {
            return Ok(self.clone());
        }
        let factor = self.unit().conversion_to(target)?;
        Ok(Self::from_op(
            ExprOp::Rebase {
                operand: self.clone(),
                factor,
            },
            target.clone(),
        ))
    }

    /// Particularize against `factory`.
    ///
    /// The first call per factory evaluates the tree; later calls with the
    /// same factory return the cached measure.
    pub fn using<K: Factory>(&self, factory: &K) -> MeasureResult<Measure<K>> {
        let key = factory.id();
        let mut pending = vec![(self, false)];
        while let Some((expression, operands_ready)) = pending.pop() {
            if expression.node.memo.contains::<Measure<K>>(key) {
                continue;
            }
            if operands_ready {
                expression.cached(factory)?;
            } else {
                pending.push((expression, true));
                pending.extend(expression.operands().into_iter().flatten().map(|e| (e, false)));
            }
        }
        self.cached(factory)
    }

    fn cached<K: Factory>(&self, factory: &K) -> MeasureResult<Measure<K>> {
        self.node
            .memo
            .get_or_compute(factory.id(), || self.evaluate(factory))
    }

    fn operands(&self) -> [Option<&Expression>; 2] {
        match &self.node.op {
            ExprOp::Take(_) | ExprOp::Committed { .. } => [None, None],
            ExprOp::Add { left, right, .. } | ExprOp::Subtract { left, right, .. } => {
                [Some(left), Some(right)]
            }
            ExprOp::Multiply(a, b) | ExprOp::Divide(a, b) => [Some(a), Some(b)],
            ExprOp::Power(a, _)
            | ExprOp::Negate(a)
            | ExprOp::Reciprocal(a)
            | ExprOp::ScaleBy(a, _)
            | ExprOp::Rebase { operand: a, .. } => [Some(a), None],
        }
    }

    fn evaluate<K: Factory>(&self, factory: &K) -> MeasureResult<Measure<K>> {
        let value = match &self.node.op {
            ExprOp::Take(value) => value.using(factory)?,
            ExprOp::Committed {
                value, type_name: found, ..
            } => value.downcast_ref::<K::Value>().cloned().ok_or(
                MeasureError::FieldMismatch {
                    expected: type_name::<K::Value>(),
                    found: *found,
                },
            )?,
            ExprOp::Add {
                left,
                right,
                rebase,
            } => {
                let right = rebased(right, rebase.as_ref(), factory)?;
                left.cached(factory)?.value().add(&right)
            }
            ExprOp::Subtract {
                left,
                right,
                rebase,
            } => {
                let right = rebased(right, rebase.as_ref(), factory)?;
                left.cached(factory)?.value().subtract(&right)
            }
            ExprOp::Multiply(a, b) => a.cached(factory)?.value().multiply(b.cached(factory)?.value()),
            ExprOp::Divide(a, b) => a.cached(factory)?.value().divide(b.cached(factory)?.value())?,
            ExprOp::Power(a, exponent) => a.cached(factory)?.value().power_exponent(*exponent)?,
            ExprOp::Negate(a) => a.cached(factory)?.value().negate(),
            ExprOp::Reciprocal(a) => a.cached(factory)?.value().reciprocal()?,
            ExprOp::ScaleBy(a, factor) => a.cached(factory)?.value().multiply(&factor.using(factory)?),
            ExprOp::Rebase { operand, factor } => operand
                .cached(factory)?
                .value()
                .multiply(&factor.using(factory)?),
        };
        Ok(Measure::new(factory, value, &self.node.unit))
    }
}

// Left behind in a node whose operands have been moved out for teardown.
static RELEASED: LazyLock<Scalar> = LazyLock::new(Scalar::zero);

impl ExprOp {
    fn release_operands(&mut self, into: &mut Vec<Expression>) {
        match mem::replace(self, ExprOp::Take(RELEASED.clone())) {
            ExprOp::Take(_) | ExprOp::Committed { .. } => {}
            ExprOp::Add { left, right, .. }
            | ExprOp::Subtract { left, right, .. }
            | ExprOp::Multiply(left, right)
            | ExprOp::Divide(left, right) => into.extend([left, right]),
            ExprOp::Power(a, _)
            | ExprOp::Negate(a)
            | ExprOp::Reciprocal(a)
            | ExprOp::ScaleBy(a, _)
            | ExprOp::Rebase { operand: a, .. } => into.push(a),
        }
    }
}

impl Drop for ExprNode {
    fn drop(&mut self) {
        let mut orphans = Vec::new();
        self.op.release_operands(&mut orphans);
        while let Some(expression) = orphans.pop() {
            if let Ok(mut node) = Arc::try_unwrap(expression.node) {
                node.op.release_operands(&mut orphans);
            }
        }
    }
}

fn rebased<K: Factory>(
    operand: &Expression,
    factor: Option<&Scalar>,
    factory: &K,
) -> MeasureResult<K::Value> {
    let measure = operand.cached(factory)?;
    Ok(match factor {
        Some(factor) => measure.value().multiply(&factor.using(factory)?),
        None => measure.into_value(),
    })
}

impl<S: Into<Scalar>> From<(S, &Unit)> for Expression {
    fn from((value, unit): (S, &Unit)) -> Self {
        Expression::take(value, unit)
    }
}

impl<K: Factory> From<&Measure<K>> for Expression {
    fn from(measure: &Measure<K>) -> Self {
        Expression::measured(measure)
    }
}

impl From<&Expression> for Expression {
    fn from(expression: &Expression) -> Self {
        expression.clone()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node.op {
            ExprOp::Take(value) => write!(f, "{value} {}", self.node.unit),
            ExprOp::Committed { text, .. } => write!(f, "{text} {}", self.node.unit),
            ExprOp::Add { left, right, .. } => write!(f, "({left} + {right})"),
            ExprOp::Subtract { left, right, .. } => write!(f, "({left} - {right})"),
            ExprOp::Multiply(a, b) => write!(f, "({a} · {b})"),
            ExprOp::Divide(a, b) => write!(f, "({a} / {b})"),
            ExprOp::Power(a, e) if e.is_integer() => write!(f, "{a}^{e}"),
            ExprOp::Power(a, e) => write!(f, "{a}^({e})"),
            ExprOp::Negate(a) => write!(f, "-{a}"),
            ExprOp::Reciprocal(a) => write!(f, "1/{a}"),
            ExprOp::ScaleBy(a, factor) => write!(f, "({factor} · {a})"),
            ExprOp::Rebase { operand, .. } => write!(f, "[{operand} in {}]", self.node.unit),
        }
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expression({self} : {})", self.dimension().composition())
    }
}
