use serde::{Deserialize, Serialize};

/// Body sent alongside a non-success status, e.g. `{"message": "Invalid input"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Formats a numeric reading the way a browser would show the same JSON number.
///
/// Whole numbers lose their fractional part (`1200.0` becomes `1200`) and negative zero is shown
/// as `0`. Magnitudes outside `1e-6..1e21` use exponent form (`1e+21`, `1.5e-7`), everything else
/// is printed with the shortest representation that round trips.
pub fn format_reading(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    if (1e-6..1e21).contains(&value.abs()) {
        return format!("{value}");
    }

    let exponent_form = format!("{value:e}");
    match exponent_form.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponent_form,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn whole_numbers_have_no_fraction() {
        assert_eq!(format_reading(1200.0), "1200");
        assert_eq!(format_reading(0.0), "0");
    }

    #[test]
    fn fractions_are_kept() {
        assert_eq!(format_reading(35.5), "35.5");
        assert_eq!(format_reading(-4.25), "-4.25");
    }

    #[test]
    fn negative_zero_is_zero() {
        assert_eq!(format_reading(-0.0), "0");
    }

    #[test]
    fn extreme_magnitudes_use_exponent_form() {
        assert_eq!(format_reading(1e21), "1e+21");
        assert_eq!(format_reading(1.5e22), "1.5e+22");
        assert_eq!(format_reading(-2e25), "-2e+25");
        assert_eq!(format_reading(1e-7), "1e-7");
        assert_eq!(format_reading(-1.5e-7), "-1.5e-7");
    }

    #[test]
    fn exponent_form_boundaries() {
        assert_eq!(format_reading(0.000001), "0.000001");
        assert_eq!(format_reading(1e20), "100000000000000000000");
    }

    #[test]
    fn snapshot_with_edge_values() {
        let s: crate::StatusSnapshot = serde_json::from_str(
            r#"{"fan_status":"ON","current_fan_output":1e21,"set_fan_output":-0,"current_temp":1e-7}"#,
        )
        .unwrap();
        assert_eq!(s.current_fan_output_text(), "1e+21");
        assert_eq!(s.set_fan_output_text(), "0");
        assert_eq!(s.current_temp_text(), "1e-7");
    }

    #[test]
    fn error_body() {
        let e: ErrorResponse = serde_json::from_str(r#"{"message": "Invalid input"}"#).unwrap();
        assert_eq!(e.message, "Invalid input");
    }
}
