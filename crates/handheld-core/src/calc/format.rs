//! Display parsing and number rendering

use crate::error::CalcError;

/// Text shown for any calculator failure
pub const ERROR_TOKEN: &str = "Error";

/// Read the display as a finite number
pub fn parse_display(text: &str) -> Result<f64, CalcError> {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CalcError::Parse),
    }
}

/// Render a result for the display
///
/// Integral values print without a fractional part (`2`, not `2.0`). Other
/// values use the shortest round-tripping float form, switching to
/// exponent notation for very large or very small magnitudes.
pub fn format_number(v: f64) -> String {
    if !v.is_finite() {
        return ERROR_TOKEN.to_string();
    }

    // Saturating cast: magnitudes beyond i64 fall through to float rendering
    let truncated = v as i64;
    if truncated as f64 == v {
        truncated.to_string()
    } else {
        format!("{:?}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_values_drop_fraction() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(1024.0), "1024");
        assert_eq!(format_number(-7.0), "-7");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_fractional_values() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-2.25), "-2.25");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_extreme_magnitudes_use_exponent() {
        assert_eq!(format_number(1e300), "1e300");
        assert_eq!(format_number(1.5e-10), "1.5e-10");
    }

    #[test]
    fn test_non_finite_is_error_token() {
        assert_eq!(format_number(f64::NAN), ERROR_TOKEN);
        assert_eq!(format_number(f64::INFINITY), ERROR_TOKEN);
    }

    #[test]
    fn test_parse_display() {
        assert_eq!(parse_display("42"), Ok(42.0));
        assert_eq!(parse_display("0."), Ok(0.0));
        assert_eq!(parse_display("-3.5"), Ok(-3.5));
        assert_eq!(parse_display(ERROR_TOKEN), Err(CalcError::Parse));
        assert_eq!(parse_display("-"), Err(CalcError::Parse));
        assert_eq!(parse_display("inf"), Err(CalcError::Parse));
        assert_eq!(parse_display(""), Err(CalcError::Parse));
    }
}
