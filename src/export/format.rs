//! Value formatting shared by the QIF and IIF writers

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::NaiveDate;

/// Fixed two-decimal amount with half-even rounding, e.g. `-1234.50`
pub fn format_amount(amount: &BigDecimal) -> String {
    format!("{:.2}", amount.with_scale_round(2, RoundingMode::HalfEven))
}

/// `MM/DD/YYYY`
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// Replace characters that would break a tab-delimited row
pub fn sanitize_field(text: &str) -> String {
    text.replace(['\t', '\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn amount(text: &str) -> String {
        format_amount(&BigDecimal::from_str(text).unwrap())
    }

    #[test]
    fn test_two_decimal_amounts() {
        assert_eq!(amount("100"), "100.00");
        assert_eq!(amount("-40"), "-40.00");
        assert_eq!(amount("0.5"), "0.50");
        assert_eq!(amount("1234.56"), "1234.56");
        assert_eq!(amount("0"), "0.00");
    }

    #[test]
    fn test_half_even_rounding() {
        assert_eq!(amount("0.125"), "0.12");
        assert_eq!(amount("0.135"), "0.14");
        assert_eq!(amount("2.675"), "2.68");
        assert_eq!(amount("-0.125"), "-0.12");
        assert_eq!(amount("-0.126"), "-0.13");
        assert_eq!(amount("0.004"), "0.00");
        assert_eq!(amount("-0.004"), "0.00");
        assert_eq!(amount("-0.005"), "0.00");
    }

    #[test]
    fn test_dates_and_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(format_date(&date), "03/09/2024");
        assert_eq!(sanitize_field("a\tb\r\nc"), "a b  c");
    }
}
