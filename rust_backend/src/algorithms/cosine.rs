//! Conversion between a cosine value and the angles that produce it.
//!
//! Since `cos(θ) = cos(-θ) = cos(360° - θ)`, a cosine in `[-1, 1]` corresponds to
//! two angles within one turn: `acos(v)` and its complement to 360°.

use std::fmt;

use qtty::{Degree, Degrees, Radians};
use serde::Serialize;

use crate::core::{display_float, round_to, CalcError, CalcResult, ConversionMode};

/// Decimal places of returned angles.
pub const ANGLE_DECIMALS: i32 = 2;
/// Decimal places of returned cosine values.
pub const COSINE_DECIMALS: i32 = 4;

const FULL_TURN_DEG: f64 = 360.0;

/// Result of a cosine/angle conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conversion {
    /// Both angles in `[0, 360]` whose cosine is the input value
    Angles {
        primary: Degrees,
        complementary: Degrees,
    },
    /// Cosine of the input angle
    Cosine { value: f64 },
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conversion::Angles {
                primary,
                complementary,
            } => write!(
                f,
                "Possible angles: {}° and {}°",
                display_float(primary.value()),
                display_float(complementary.value())
            ),
            Conversion::Cosine { value } => write!(f, "Cosine value: {}", display_float(*value)),
        }
    }
}

/// Parse the free-text entry of the converter.
///
/// Surrounding whitespace is ignored. `NaN` and infinities are rejected.
pub fn parse_value(raw: &str) -> CalcResult<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CalcError::InvalidNumber(raw.to_string()))?;
    if !value.is_finite() {
        return Err(CalcError::InvalidNumber(raw.to_string()));
    }
    Ok(value)
}

/// Angles whose cosine is `value`.
///
/// # Example
///
/// ```
/// use meter_tools::algorithms::cosine::{cosine_to_angles, Conversion};
///
/// let Conversion::Angles { primary, complementary } = cosine_to_angles(0.5).unwrap() else {
///     unreachable!()
/// };
/// assert_eq!(primary.value(), 60.0);
/// assert_eq!(complementary.value(), 300.0);
/// ```
pub fn cosine_to_angles(value: f64) -> CalcResult<Conversion> {
    if !(-1.0..=1.0).contains(&value) {
        return Err(CalcError::CosineOutOfRange(value));
    }
    let primary = Radians::new(value.acos()).to::<Degree>();
    let primary = round_to(primary.value(), ANGLE_DECIMALS);
    let complementary = round_to(FULL_TURN_DEG - primary, ANGLE_DECIMALS);
    Ok(Conversion::Angles {
        primary: Degrees::new(primary),
        complementary: Degrees::new(complementary),
    })
}

/// Cosine of `angle` after wrapping it into `[0, 360)`.
pub fn angle_to_cosine(angle: Degrees) -> Conversion {
    let reduced = angle.wrap_pos();
    Conversion::Cosine {
        value: round_to(reduced.cos(), COSINE_DECIMALS),
    }
}

/// Parse `raw` and convert it in the direction given by `mode`.
pub fn convert(mode: ConversionMode, raw: &str) -> CalcResult<Conversion> {
    convert_value(mode, parse_value(raw)?)
}

/// Like [`convert`], with the mode still given as a UI label.
///
/// The value is parsed first, so a malformed number is reported even when the
/// mode label is unknown as well.
pub fn convert_labeled(mode_label: &str, raw: &str) -> CalcResult<Conversion> {
    let value = parse_value(raw)?;
    let mode: ConversionMode = mode_label.parse()?;
    convert_value(mode, value)
}

fn convert_value(mode: ConversionMode, value: f64) -> CalcResult<Conversion> {
    match mode {
        ConversionMode::CosineToAngle => cosine_to_angles(value),
        ConversionMode::AngleToCosine => Ok(angle_to_cosine(Degrees::new(value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angles(conversion: Conversion) -> (f64, f64) {
        match conversion {
            Conversion::Angles {
                primary,
                complementary,
            } => (primary.value(), complementary.value()),
            other => panic!("expected angles, got {:?}", other),
        }
    }

    fn cosine(conversion: Conversion) -> f64 {
        match conversion {
            Conversion::Cosine { value } => value,
            other => panic!("expected cosine, got {:?}", other),
        }
    }

    #[test]
    fn test_cosine_bounds() {
        assert_eq!(angles(cosine_to_angles(1.0).unwrap()), (0.0, 360.0));
        assert_eq!(angles(cosine_to_angles(-1.0).unwrap()), (180.0, 180.0));
        assert_eq!(angles(cosine_to_angles(0.0).unwrap()), (90.0, 270.0));
    }

    #[test]
    fn test_cosine_rounding() {
        // acos(0.3) = 72.5423...°
        assert_eq!(angles(cosine_to_angles(0.3).unwrap()), (72.54, 287.46));
    }

    #[test]
    fn test_cosine_out_of_range() {
        assert_eq!(cosine_to_angles(1.0001), Err(CalcError::CosineOutOfRange(1.0001)));
        assert_eq!(cosine_to_angles(-2.0), Err(CalcError::CosineOutOfRange(-2.0)));
    }

    #[test]
    fn test_angle_to_cosine() {
        assert_eq!(cosine(angle_to_cosine(Degrees::new(60.0))), 0.5);
        assert_eq!(cosine(angle_to_cosine(Degrees::new(0.0))), 1.0);
        assert_eq!(cosine(angle_to_cosine(Degrees::new(180.0))), -1.0);
        assert_eq!(cosine(angle_to_cosine(Degrees::new(45.0))), 0.7071);
    }

    #[test]
    fn test_angle_wraps() {
        assert_eq!(cosine(angle_to_cosine(Degrees::new(-300.0))), 0.5);
        assert_eq!(cosine(angle_to_cosine(Degrees::new(420.0))), 0.5);
        assert_eq!(cosine(angle_to_cosine(Degrees::new(720.0))), 1.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            cosine_to_angles(0.5).unwrap().to_string(),
            "Possible angles: 60.0° and 300.0°"
        );
        assert_eq!(
            angle_to_cosine(Degrees::new(60.0)).to_string(),
            "Cosine value: 0.5"
        );
        assert_eq!(
            angle_to_cosine(Degrees::new(90.0)).to_string(),
            "Cosine value: 0.0"
        );
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value(" 0.5\n").unwrap(), 0.5);
        assert_eq!(parse_value("-60").unwrap(), -60.0);
        assert_eq!(parse_value("1e2").unwrap(), 100.0);
        assert_eq!(parse_value("abc"), Err(CalcError::InvalidNumber("abc".into())));
        assert_eq!(parse_value(""), Err(CalcError::InvalidNumber("".into())));
        assert!(parse_value("NaN").is_err());
        assert!(parse_value("inf").is_err());
    }

    #[test]
    fn test_convert_labeled() {
        assert_eq!(
            angles(convert_labeled("cosine→angle", "0.5").unwrap()),
            (60.0, 300.0)
        );
        assert_eq!(cosine(convert_labeled("angle→cosine", "60").unwrap()), 0.5);
        assert_eq!(
            convert_labeled("sine→angle", "0.5"),
            Err(CalcError::InvalidMode("sine→angle".into()))
        );
        // Malformed number takes precedence over an unknown mode
        assert_eq!(
            convert_labeled("sine→angle", "abc"),
            Err(CalcError::InvalidNumber("abc".into()))
        );
        assert_eq!(
            convert_labeled("cosine→angle", "1.5"),
            Err(CalcError::CosineOutOfRange(1.5))
        );
    }
}
