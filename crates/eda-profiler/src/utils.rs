//! Shared parsing helpers for the profiling engine.
//!
//! Numeric coercion is permissive: a value either parses to a finite `f64`
//! or it is left out of numeric aggregates. It is never an error.

use crate::dataset::Cell;

/// Characters commonly used in numeric formatting that may be stripped.
pub const NUMERIC_FORMAT_CHARS: [char; 6] = [',', '$', '%', '€', '£', ' '];

/// Clean a string for numeric parsing by removing formatting characters.
///
/// # Example
///
/// ```rust
/// use eda_profiler::utils::clean_numeric_string;
///
/// assert_eq!(clean_numeric_string("$1,234.56"), "1234.56");
/// assert_eq!(clean_numeric_string("  42%  "), "42");
/// ```
pub fn clean_numeric_string(s: &str) -> String {
    let mut result = s.trim().to_string();
    for c in NUMERIC_FORMAT_CHARS {
        result = result.replace(c, "");
    }
    result
}

/// Try to parse a string as a finite number.
///
/// Surrounding whitespace is ignored. `NaN` and infinities are rejected.
pub fn parse_numeric_string(s: &str, strip_formatting: bool) -> Option<f64> {
    let parsed = if strip_formatting {
        let cleaned = clean_numeric_string(s);
        if cleaned.is_empty() {
            return None;
        }
        cleaned.parse::<f64>().ok()
    } else {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<f64>().ok()
    };
    parsed.filter(|v| v.is_finite())
}

/// Coerce a cell to a finite number, if it has one.
///
/// Booleans and missing cells never coerce. The whole value must parse:
/// "12kg" is not read as 12, unlike prefix parsing.
pub fn parse_numeric_cell(cell: &Cell, strip_formatting: bool) -> Option<f64> {
    match cell {
        Cell::Number(v) if v.is_finite() => Some(*v),
        Cell::Text(s) => parse_numeric_string(s, strip_formatting),
        _ => None,
    }
}

/// Percentage of `part` in `whole`, 0 when `whole` is 0.
pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_numeric_string() {
        assert_eq!(clean_numeric_string("$1,234.56"), "1234.56");
        assert_eq!(clean_numeric_string("€100"), "100");
        assert_eq!(clean_numeric_string("1 000"), "1000");
    }

    #[test]
    fn test_parse_numeric_string_plain() {
        assert_eq!(parse_numeric_string("42", false), Some(42.0));
        assert_eq!(parse_numeric_string(" -3.5 ", false), Some(-3.5));
        assert_eq!(parse_numeric_string("1e3", false), Some(1000.0));
        assert_eq!(parse_numeric_string("", false), None);
        assert_eq!(parse_numeric_string("hello", false), None);
        assert_eq!(parse_numeric_string("$12", false), None);
    }

    #[test]
    fn test_parse_numeric_string_rejects_non_finite() {
        assert_eq!(parse_numeric_string("NaN", false), None);
        assert_eq!(parse_numeric_string("inf", false), None);
        assert_eq!(parse_numeric_string("-infinity", true), None);
    }

    #[test]
    fn test_parse_numeric_string_with_formatting() {
        assert_eq!(parse_numeric_string("$1,234.56", true), Some(1234.56));
        assert_eq!(parse_numeric_string("42%", true), Some(42.0));
        assert_eq!(parse_numeric_string("$", true), None);
    }

    #[test]
    fn test_parse_numeric_cell() {
        assert_eq!(parse_numeric_cell(&Cell::Number(2.5), false), Some(2.5));
        assert_eq!(parse_numeric_cell(&Cell::Text("7".into()), false), Some(7.0));
        assert_eq!(parse_numeric_cell(&Cell::Text("12kg".into()), false), None);
        assert_eq!(parse_numeric_cell(&Cell::Number(f64::NAN), false), None);
        assert_eq!(parse_numeric_cell(&Cell::Bool(true), false), None);
        assert_eq!(parse_numeric_cell(&Cell::Missing, false), None);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 4), 25.0);
        assert_eq!(percentage(3, 0), 0.0);
    }
}
