//! Temperature and logarithmic scales.

use std::sync::LazyLock;

use uf_field::{DoubleFactory, Factory, Scalar};
use uf_measure::Scale;
use uf_units::Unit;

use crate::units;

/// Degrees Celsius on kelvin, for any backend.
pub fn celsius<K: Factory>() -> Scale<K> {
    Scale::affine("celsius", "°C", &units::KELVIN, Scalar::from_text("273.15"), 1)
}

/// Degrees Fahrenheit on kelvin, for any backend.
pub fn fahrenheit<K: Factory>() -> Scale<K> {
    // 0 °F = 459.67 °R = 459.67 · 5/9 K
    let offset = Scalar::from_text("459.67")
        .multiply(&Scalar::of(5))
        .divide(&Scalar::of(9));
    Scale::affine(
        "fahrenheit",
        "°F",
        &units::KELVIN,
        offset,
        Scalar::of(5).divide(&Scalar::of(9)),
    )
}

/// Decibels relative to one `reference`: `10 · log10(value)`.
pub fn decibel<K: Factory>(reference: &Unit) -> Scale<K> {
    Scale::logarithmic(
        format!("decibel {}", reference.name()),
        format!("dB{}", reference.symbol()),
        reference,
        10,
        10,
    )
}

pub static CELSIUS: LazyLock<Scale<DoubleFactory>> = LazyLock::new(celsius);
pub static FAHRENHEIT: LazyLock<Scale<DoubleFactory>> = LazyLock::new(fahrenheit);
pub static DECIBEL_MILLIWATT: LazyLock<Scale<DoubleFactory>> =
    LazyLock::new(|| decibel(&units::MILLIWATT));

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;
    use uf_core::{nearly_equal, Tolerances};
    use uf_measure::Measure;

    #[test]
    fn freezing_point() {
        let f = DoubleFactory::shared();
        let freezing = CELSIUS
            .level(&Measure::new(&f, 273.15, &units::KELVIN))
            .unwrap();
        assert!(nearly_equal(*freezing.value(), 0.0, Tolerances::default()));
        let in_f = freezing.in_scale(&FAHRENHEIT).unwrap();
        assert!(nearly_equal(*in_f.value(), 32.0, Tolerances { abs: 1e-9, rel: 1e-12 }));
        assert_eq!(freezing.compare(&in_f).unwrap(), Ordering::Equal);
    }

    #[test]
    fn one_watt_is_thirty_dbm() {
        let f = DoubleFactory::shared();
        let level = DECIBEL_MILLIWATT
            .level(&Measure::of_int(&f, 1, &units::WATT))
            .unwrap();
        assert!(nearly_equal(*level.value(), 30.0, Tolerances::default()));
        assert_eq!(DECIBEL_MILLIWATT.symbol(), "dBmW");
    }
}
