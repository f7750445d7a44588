//! Lenient parsing of user-entered numeric text.
//!
//! Parse failures are never errors: the field is simply treated as absent.

/// Parse a decimal that may use `,` or `.` as separator.
/// Surrounding whitespace is ignored; empty, unparseable and non-finite input is `None`.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Price paid: a decimal that is not negative
pub fn parse_price(text: &str) -> Option<f64> {
    let price = parse_decimal(text)?;
    if price < 0.0 {
        log::warn!("Ignoring negative price input {:?}", text);
        return None;
    }
    Some(price)
}

/// Vintage year as a whole number
pub fn parse_vintage(text: &str) -> Option<i32> {
    text.trim().parse::<i32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_separators() {
        assert_eq!(parse_decimal("12,50"), Some(12.5));
        assert_eq!(parse_decimal("12.50"), Some(12.5));
    }

    #[test]
    fn test_garbage_is_absent() {
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("   "), None);
        assert_eq!(parse_decimal("1,2,3"), None);
    }

    #[test]
    fn test_non_finite_is_absent() {
        assert_eq!(parse_decimal("inf"), None);
        assert_eq!(parse_decimal("NaN"), None);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(parse_decimal(" 7,25 "), Some(7.25));
    }

    #[test]
    fn test_price() {
        assert_eq!(parse_price("0"), Some(0.0));
        assert_eq!(parse_price("-3"), None);
        assert_eq!(parse_price("abc"), None);
    }

    #[test]
    fn test_vintage() {
        assert_eq!(parse_vintage("2016"), Some(2016));
        assert_eq!(parse_vintage(" 2018 "), Some(2018));
        assert_eq!(parse_vintage("20x8"), None);
        assert_eq!(parse_vintage(""), None);
    }
}
