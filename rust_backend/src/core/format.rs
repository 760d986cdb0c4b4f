//! Text rendering shared by both calculators.
//!
//! The UI displays strings only, so every result leaves the core through [`render`]:
//! successes verbatim, failures prefixed with [`ERROR_MARKER`].

use std::fmt::Display;

use super::error::CalcResult;

/// Leading glyph of every failure string.
pub const ERROR_MARKER: &str = "❌";

/// Leading glyph of advisory lines inside a successful report.
pub const WARNING_MARKER: &str = "⚠️";

/// Round half to even at `decimals` decimal places.
///
/// # Examples
///
/// ```
/// use meter_tools::core::round_to;
///
/// assert_eq!(round_to(60.00000000000001, 2), 60.0);
/// assert_eq!(round_to(0.50000000000000011, 4), 0.5);
/// ```
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Shortest round-trip text of a float, keeping a `.0` on integral values.
///
/// # Examples
///
/// ```
/// use meter_tools::core::display_float;
///
/// assert_eq!(display_float(60.0), "60.0");
/// assert_eq!(display_float(0.7071), "0.7071");
/// assert_eq!(display_float(-0.0), "-0.0");
/// ```
pub fn display_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Render a calculator result as display text.
pub fn render<T: Display>(result: &CalcResult<T>) -> String {
    match result {
        Ok(value) => value.to_string(),
        Err(e) => format!("{} {}", ERROR_MARKER, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CalcError;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(14.347826, 2), 14.35);
        assert_eq!(round_to(-0.00000001, 4), 0.0);
        assert!(round_to(-0.00000001, 4).is_sign_negative());
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
    }

    #[test]
    fn test_display_float() {
        assert_eq!(display_float(360.0), "360.0");
        assert_eq!(display_float(104.48), "104.48");
        assert_eq!(display_float(-1.0), "-1.0");
        assert_eq!(display_float(f64::NAN), "NaN");
    }

    #[test]
    fn test_render() {
        let ok: CalcResult<&str> = Ok("Cosine value: 0.5");
        assert_eq!(render(&ok), "Cosine value: 0.5");

        let err: CalcResult<&str> = Err(CalcError::DivisionByZero);
        assert_eq!(render(&err), "❌ denominator is zero, cannot compute Tq");
    }
}
