//! Formatting helpers for values shown on charts and in summary fields.

use super::stats::parse_stat;

/// Fixed-precision rendering (`7.26`, 1 → `7.3`).
pub fn format_value(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}

/// Level field as shown in the overlay: one decimal, invalid input reads as 0.
pub fn format_level(raw: &str) -> String {
    format_value(parse_stat(raw), 1)
}

pub fn or_placeholder<'a>(raw: &'a str, placeholder: &'a str) -> &'a str {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        placeholder
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_rounds_to_precision() {
        assert_eq!(format_value(7.24, 1), "7.2");
        assert_eq!(format_value(7.26, 1), "7.3");
        assert_eq!(format_value(10.0, 1), "10.0");
    }

    #[test]
    fn level_defaults_to_zero() {
        assert_eq!(format_level(""), "0.0");
        assert_eq!(format_level("12"), "12.0");
    }

    #[test]
    fn placeholder_applies_to_blank_input() {
        assert_eq!(or_placeholder("  ", "Unknown"), "Unknown");
        assert_eq!(or_placeholder(" Ada ", "Unknown"), "Ada");
    }
}
