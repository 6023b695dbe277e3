/// Format a setting value for display: at most six fractional digits,
/// trailing zeros and a dangling decimal point removed.
///
/// `1.25` → `"1.25"`, `1.0` → `"1"`, `0.1234567` → `"0.123457"`.
pub fn format_value(value: f32) -> String {
    let mut text = format!("{:.6}", value as f64);
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_zeros() {
        assert_eq!(format_value(1.25), "1.25");
        assert_eq!(format_value(1.0), "1");
        assert_eq!(format_value(0.5), "0.5");
        assert_eq!(format_value(10.0), "10");
    }

    #[test]
    fn limits_to_six_fraction_digits() {
        assert_eq!(format_value(0.1234567), "0.123457");
        assert_eq!(format_value(0.1), "0.1");
    }

    #[test]
    fn negative_values_and_zero() {
        assert_eq!(format_value(-0.25), "-0.25");
        assert_eq!(format_value(-0.0), "0");
        assert_eq!(format_value(-0.0000001), "0");
    }
}
