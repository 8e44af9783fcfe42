//! Physical constants as expressions.
//!
//! Values are CODATA 2018. Each constant is an [`Expression`] so it can be
//! combined with other expressions and evaluated in any backend.

use std::sync::LazyLock;

use uf_field::Scalar;
use uf_measure::Expression;

use crate::units;

/// π to more digits than a double holds; backends round on parse.
pub static PI: LazyLock<Scalar> =
    LazyLock::new(|| Scalar::from_text("3.14159265358979323846264338327950288"));

pub static SPEED_OF_LIGHT: LazyLock<Expression> =
    LazyLock::new(|| Expression::take(299_792_458, &units::METER_PER_SECOND));

pub static ELEMENTARY_CHARGE: LazyLock<Expression> =
    LazyLock::new(|| Expression::take(Scalar::from_text("1.602176634e-19"), &units::COULOMB));

/// ε₀
pub static VACUUM_PERMITTIVITY: LazyLock<Expression> = LazyLock::new(|| {
    Expression::take(Scalar::from_text("8.8541878128e-12"), &units::FARAD_PER_METER)
});

/// k = 1 / (4π ε₀)
pub static COULOMB_CONSTANT: LazyLock<Expression> = LazyLock::new(|| {
    VACUUM_PERMITTIVITY
        .scale_by(4)
        .scale_by(PI.clone())
        .reciprocal()
        .expect("reciprocal of F/m is a small compound")
});

#[cfg(test)]
mod tests {
    use super::*;
    use uf_core::{nearly_equal, Tolerances};
    use uf_field::DoubleFactory;

    #[test]
    fn coulomb_constant_value() {
        let k = COULOMB_CONSTANT.using(&DoubleFactory::shared()).unwrap();
        assert!(nearly_equal(*k.value(), 8.987551792261171e9, Tolerances::default()));
        assert!(k
            .dimension()
            .is_commensurable(&crate::dimensions::PERMITTIVITY.pow(uf_core::Exponent::MINUS_ONE).unwrap()));
    }

    #[test]
    fn pi_parses_to_the_nearest_double() {
        let pi = PI.using(&DoubleFactory::shared()).unwrap();
        assert_eq!(pi, std::f64::consts::PI);
    }
}
