// src/formatters.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats a raw date value as dd-mm-yyyy. Empty input formats as an empty
/// string; input that matches none of the accepted shapes is echoed back
/// unchanged rather than replaced with a placeholder.
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    parse_date(trimmed)
        .map(|date| date.format("%d-%m-%Y").to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.date_naive());
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(stamp.date());
    }
    NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok()
}

/// Formats an amount with en-IN digit grouping and exactly two decimals,
/// e.g. 123456.789 becomes "1,23,456.79". Zero and non-finite values format
/// as an empty string.
pub fn format_indian_number(number: f64) -> String {
    if number == 0.0 || !number.is_finite() {
        return String::new();
    }
    let rounded = format!("{:.2}", number.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let grouped = group_indian(int_part);
    if number < 0.0 {
        format!("-{}.{}", grouped, frac_part)
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}

// en-IN grouping: the last three digits form one group, everything before
// them is grouped in pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn plain_dates_format_day_first() {
        assert_eq!(format_date("2024-01-01"), "01-01-2024");
        assert_eq!(format_date("2023-12-31"), "31-12-2023");
    }

    #[test]
    fn timestamps_keep_only_the_date() {
        assert_eq!(format_date("2024-03-15T10:30:00Z"), "15-03-2024");
        assert_eq!(format_date("2024-03-15 10:30:00"), "15-03-2024");
    }

    #[test]
    fn empty_and_unparseable_dates_degrade() {
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("   "), "");
        assert_eq!(format_date("not a date"), "not a date");
    }

    #[test]
    fn small_amounts_group_like_plain_thousands() {
        assert_eq!(format_indian_number(100.0), "100.00");
        assert_eq!(format_indian_number(999.0), "999.00");
        assert_eq!(format_indian_number(1234.5), "1,234.50");
    }

    #[test]
    fn large_amounts_group_in_pairs_beyond_thousands() {
        assert_eq!(format_indian_number(123456.789), "1,23,456.79");
        assert_eq!(format_indian_number(10_000_000.0), "1,00,00,000.00");
        assert_eq!(format_indian_number(1_23_45_678.9), "1,23,45,678.90");
    }

    #[test]
    fn negative_amounts_keep_the_sign() {
        assert_eq!(format_indian_number(-54321.0), "-54,321.00");
    }

    #[test]
    fn zero_and_non_finite_amounts_format_empty() {
        assert_eq!(format_indian_number(0.0), "");
        assert_eq!(format_indian_number(f64::NAN), "");
        assert_eq!(format_indian_number(f64::INFINITY), "");
    }
}
