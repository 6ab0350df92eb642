use crate::error::TypeError;

/// Numeric key in the first column of a reference table.
pub type RowCode = i64;

/// Parse a row code from raw cell text.
///
/// Surrounding whitespace is ignored. Anything else that is not a base-10
/// integer is rejected.
pub fn parse_code(raw: &str) -> Result<RowCode, TypeError> {
    raw.trim()
        .parse::<RowCode>()
        .map_err(|_| TypeError::InvalidCode { raw: raw.to_string() })
}

/// Parse a row code, coercing malformed input to `0`.
pub fn parse_code_lenient(raw: &str) -> RowCode {
    parse_code(raw).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integer() {
        assert_eq!(parse_code("42").unwrap(), 42);
        assert_eq!(parse_code("-7").unwrap(), -7);
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(parse_code("  15\n").unwrap(), 15);
    }

    #[test]
    fn rejects_non_numeric() {
        let err = parse_code("12a").unwrap_err();
        assert_eq!(err, TypeError::InvalidCode { raw: "12a".into() });
        assert!(parse_code("").is_err());
        assert!(parse_code("1.5").is_err());
    }

    #[test]
    fn lenient_coerces_to_zero() {
        assert_eq!(parse_code_lenient("abc"), 0);
        assert_eq!(parse_code_lenient(""), 0);
        assert_eq!(parse_code_lenient(" 9 "), 9);
    }

    #[test]
    fn error_display_quotes_raw() {
        let err = parse_code("x1").unwrap_err();
        assert_eq!(err.to_string(), "invalid row code: \"x1\"");
    }
}
