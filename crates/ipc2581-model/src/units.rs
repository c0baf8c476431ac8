use crate::types::Units;

/// Convert a value from the given units to millimeters
pub fn to_mm(value: f64, from_units: Units) -> f64 {
    match from_units {
        Units::Millimeter => value,
        Units::Inch => value * 25.4,
        Units::Mils => value * 0.0254,
        Units::Micron => value * 0.001,
    }
}

/// Inverse of [`to_mm`]
pub fn from_mm(value: f64, to_units: Units) -> f64 {
    match to_units {
        Units::Millimeter => value,
        Units::Inch => value / 25.4,
        Units::Mils => value / 0.0254,
        Units::Micron => value / 0.001,
    }
}

/// Round to 6 decimal places, the precision stack heights are reported at
pub(crate) fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inch_and_mils() {
        assert_eq!(to_mm(1.0, Units::Inch), 25.4);
        assert_eq!(to_mm(1.0, Units::Mils), 0.0254);
        assert_eq!(from_mm(25.4, Units::Inch), 1.0);
    }

    #[test]
    fn micron() {
        assert_eq!(to_mm(1000.0, Units::Micron), 1.0);
        assert_eq!(from_mm(1.0, Units::Micron), 1000.0);
    }

    #[test]
    fn conversion_is_reversible() {
        for units in [Units::Millimeter, Units::Inch, Units::Mils, Units::Micron] {
            let back = from_mm(to_mm(42.0, units), units);
            assert!((back - 42.0).abs() < 1e-10, "{:?}", units);
        }
    }

    #[test]
    fn rounding_drops_float_noise() {
        assert_eq!(round6(0.1 + 0.2), 0.3);
        assert_eq!(round6(1.6000004), 1.6);
    }
}
