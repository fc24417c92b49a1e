//! Statement date validation: "05 Apr 2023" style dates.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// chrono pattern used by statement tables: day, short month, 4-digit year.
pub const STATEMENT_DATE_FORMAT: &str = "%d %b %Y";

// chrono's `%b` also accepts full month names when parsing, so the default
// pattern is shape-checked first.
static STATEMENT_DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}\s+[A-Za-z]{3}\s+\d{4}$").expect("valid date regex"));

/// Rewrite the "Sept" spelling some statements use into chrono's "Sep".
pub fn normalize_month_spelling(value: &str) -> String {
    value.replace("Sept", "Sep")
}

/// Parse `value` with `format` after month-spelling normalization.
///
/// Returns `None` for anything that does not parse; never panics.
pub fn parse_date(value: &str, format: &str) -> Option<NaiveDate> {
    let value = normalize_month_spelling(value);
    if format == STATEMENT_DATE_FORMAT && !STATEMENT_DATE_SHAPE.is_match(&value) {
        return None;
    }
    NaiveDate::parse_from_str(&value, format).ok()
}

/// Parse a statement date using [`STATEMENT_DATE_FORMAT`].
pub fn parse_statement_date(value: &str) -> Option<NaiveDate> {
    parse_date(value, STATEMENT_DATE_FORMAT)
}

/// True iff `value` is a well-formed statement date.
pub fn is_valid_date(value: &str) -> bool {
    parse_statement_date(value).is_some()
}

/// Render a date back into the statement pattern, e.g. `05 Apr 2023`.
pub fn format_statement_date(date: NaiveDate) -> String {
    date.format(STATEMENT_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_padded_and_unpadded_days() {
        assert!(is_valid_date("05 Apr 2023"));
        assert!(is_valid_date("5 Apr 2023"));
        assert_eq!(
            parse_statement_date("05 Apr 2023"),
            NaiveDate::from_ymd_opt(2023, 4, 5)
        );
    }

    #[test]
    fn test_sept_is_normalized() {
        assert!(is_valid_date("15 Sept 2023"));
        assert_eq!(
            parse_statement_date("15 Sept 2023"),
            NaiveDate::from_ymd_opt(2023, 9, 15)
        );
        assert_eq!(normalize_month_spelling("15 Sept 2023"), "15 Sep 2023");
    }

    #[test]
    fn test_rejects_full_month_names() {
        assert!(!is_valid_date("5 April 2023"));
        assert!(!is_valid_date("15 September 2023"));
    }

    #[test]
    fn test_rejects_malformed_values() {
        for value in [
            "",
            "Balance brought forward",
            "2023-04-05",
            "05 Apr 23",
            "32 Jan 2024",
            "05 Apr 2023 extra",
            " 05 Apr 2023",
            "05/04/2023",
        ] {
            assert!(!is_valid_date(value), "{value:?} should be invalid");
        }
    }

    #[test]
    fn test_month_is_case_insensitive() {
        assert!(is_valid_date("01 JAN 2024"));
        assert!(is_valid_date("01 jan 2024"));
    }

    #[test]
    fn test_custom_format() {
        assert_eq!(
            parse_date("2024-02-29", "%Y-%m-%d"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(parse_date("2023-02-29", "%Y-%m-%d"), None);
    }

    #[test]
    fn test_format_round_trips() {
        let date = NaiveDate::from_ymd_opt(2023, 9, 15).unwrap();
        assert_eq!(format_statement_date(date), "15 Sep 2023");
        assert!(is_valid_date(&format_statement_date(date)));
    }
}
