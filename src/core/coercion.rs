//! Lenient text-to-number coercion
//!
//! Every numeric survey column goes through [`coerce`], which never fails:
//! absent, empty or non-numeric text becomes `0.0`. Callers that need to tell
//! missing data apart from a genuine zero use [`coerce_checked`].

/// Parse a cell as a finite decimal number, or `None` when it is absent,
/// empty, non-numeric or non-finite.
#[must_use]
pub fn coerce_checked(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .and_then(|text| text.parse::<f64>().ok())
        .filter(|number| number.is_finite())
}

/// Parse a cell as a number, defaulting to exactly `0.0` on any failure.
#[must_use]
pub fn coerce(value: Option<&str>) -> f64 {
    coerce_checked(value).unwrap_or(0.0)
}

/// Round to `places` decimal places (half away from zero).
///
/// Values too large to scale are returned unchanged.
#[must_use]
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10_f64.powi(i32::try_from(places).unwrap_or(i32::MAX));
    let scaled = value * factor;
    if scaled.is_finite() {
        scaled.round() / factor
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_text_is_zero() {
        for text in ["", "   ", "abc", "N/A", "--", "1,5", "NaN", "inf", "-infinity"] {
            assert_eq!(coerce(Some(text)).to_bits(), 0.0_f64.to_bits(), "{text:?}");
        }
        assert_eq!(coerce(None).to_bits(), 0.0_f64.to_bits());
    }

    #[test]
    fn numeric_text_round_trips() {
        for number in [0.0, 1.0, -2.5, 5.5, 80.0, 6.125, 1e-3] {
            assert_eq!(coerce(Some(&number.to_string())), number);
        }
        assert_eq!(coerce(Some(" 7.25 ")), 7.25);
        assert_eq!(coerce(Some("+3")), 3.0);
    }

    #[test]
    fn checked_distinguishes_missing_from_zero() {
        assert_eq!(coerce_checked(Some("0")), Some(0.0));
        assert_eq!(coerce_checked(Some("")), None);
        assert_eq!(coerce_checked(None), None);
        assert_eq!(coerce_checked(Some("four")), None);
    }

    #[test]
    fn rounds_to_places() {
        assert_eq!(round_to(80.0, 2), 80.0);
        assert_eq!(round_to(2.0 / 3.0, 2), 0.67);
        assert_eq!(round_to(84.333_333, 1), 84.3);
        assert_eq!(round_to(12.5, 0), 13.0);
        assert_eq!(round_to(1e308, 2), 1e308);
    }
}
