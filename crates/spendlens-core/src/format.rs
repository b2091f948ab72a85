//! Locale formatting utilities
//!
//! Pure functions turning raw numeric/date values into en-IN display
//! strings. Amounts use Indian digit grouping (₹12,34,567.89) and the
//! compact form abbreviates by lakh/crore magnitude.

use chrono::NaiveDate;

/// Full INR currency string with Indian grouping, always two decimals
pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("-₹{}", group_fixed(amount.abs()))
    } else {
        format!("₹{}", group_fixed(amount))
    }
}

/// Indian-grouped number without the currency symbol
pub fn format_amount(amount: f64) -> String {
    if amount < 0.0 {
        format!("-{}", group_fixed(amount.abs()))
    } else {
        group_fixed(amount)
    }
}

/// Abbreviated magnitude: crores, lakhs, thousands, else full currency
pub fn format_compact_currency(amount: f64) -> String {
    if amount >= 10_000_000.0 {
        format!("₹{:.2} Cr", amount / 10_000_000.0)
    } else if amount >= 100_000.0 {
        format!("₹{:.2} L", amount / 100_000.0)
    } else if amount >= 1_000.0 {
        format!("₹{:.2} K", amount / 1_000.0)
    } else {
        format_currency(amount)
    }
}

/// Parse a user-entered amount, tolerating comma grouping
///
/// Empty or unparseable input becomes zero, matching form-field semantics.
pub fn parse_amount_input(value: &str) -> f64 {
    value.replace(',', "").trim().parse().unwrap_or(0.0)
}

/// Short human date, e.g. `5 Mar 2024`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Extraction confidence as a percentage with one decimal
pub fn format_confidence(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

/// Two-decimal fixed string with Indian digit grouping
///
/// Non-finite amounts render as zero; they only arise from degraded
/// payloads and must not take the renderer down.
fn group_fixed(amount: f64) -> String {
    if !amount.is_finite() {
        return "0.00".to_string();
    }
    let fixed = format!("{:.2}", amount);
    let (int_part, frac_part) = fixed.split_once('.').expect("fixed-point format");
    format!("{}.{}", group_indian(int_part), frac_part)
}

/// Indian grouping: last three digits, then groups of two
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, back) = rest.split_at(rest.len() - 2);
        groups.push(back);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_small() {
        assert_eq!(format_currency(150.0), "₹150.00");
        assert_eq!(format_currency(0.0), "₹0.00");
        assert_eq!(format_currency(999.99), "₹999.99");
    }

    #[test]
    fn test_format_currency_indian_grouping() {
        assert_eq!(format_currency(1234.5), "₹1,234.50");
        assert_eq!(format_currency(100000.0), "₹1,00,000.00");
        assert_eq!(format_currency(1234567.89), "₹12,34,567.89");
        assert_eq!(format_currency(123456789.0), "₹12,34,56,789.00");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-1234.5), "-₹1,234.50");
    }

    #[test]
    fn test_format_currency_non_finite_renders_zero() {
        assert_eq!(format_currency(f64::INFINITY), "₹0.00");
        assert_eq!(format_currency(f64::NEG_INFINITY), "-₹0.00");
        assert_eq!(format_currency(f64::NAN), "₹0.00");
        assert_eq!(format_compact_currency(f64::NAN), "₹0.00");
    }

    #[test]
    fn test_format_amount_without_symbol() {
        assert_eq!(format_amount(1234567.89), "12,34,567.89");
    }

    #[test]
    fn test_compact_currency_magnitudes() {
        assert_eq!(format_compact_currency(10_000_000.0), "₹1.00 Cr");
        assert_eq!(format_compact_currency(250_000.0), "₹2.50 L");
        assert_eq!(format_compact_currency(1_500.0), "₹1.50 K");
        assert_eq!(format_compact_currency(950.0), "₹950.00");
    }

    #[test]
    fn test_parse_amount_input() {
        assert_eq!(parse_amount_input("1,23,456.78"), 123456.78);
        assert_eq!(parse_amount_input(" 450 "), 450.0);
        assert_eq!(parse_amount_input(""), 0.0);
        assert_eq!(parse_amount_input("abc"), 0.0);
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "5 Mar 2024");
        let date = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        assert_eq!(format_date(date), "25 Dec 2023");
    }

    #[test]
    fn test_format_confidence() {
        assert_eq!(format_confidence(0.925), "92.5%");
        assert_eq!(format_confidence(1.0), "100.0%");
    }
}
