//! Presentation helpers for amounts and dates

use chrono::NaiveDate;

/// Group an integer amount with thousands separators, e.g. `1,250,000`
pub fn grouped(amount: f64) -> String {
    if !amount.is_finite() {
        return "n/a".to_string();
    }
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `UGX 1,250,000`
pub fn money(amount: f64, currency: &str) -> String {
    format!("{currency} {}", grouped(amount))
}

pub fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

pub fn date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped() {
        assert_eq!(grouped(0.0), "0");
        assert_eq!(grouped(999.0), "999");
        assert_eq!(grouped(1000.0), "1,000");
        assert_eq!(grouped(235_367.35), "235,367");
        assert_eq!(grouped(-50_000_000.0), "-50,000,000");
    }

    #[test]
    fn test_grouped_beyond_integer_range() {
        assert_eq!(grouped(2e19), "20,000,000,000,000,000,000");
        assert_eq!(grouped(-2e19), "-20,000,000,000,000,000,000");
        assert_eq!(grouped(-0.4), "0");
        assert_eq!(grouped(f64::INFINITY), "n/a");
        assert_eq!(grouped(f64::NAN), "n/a");
    }

    #[test]
    fn test_money_and_date() {
        assert_eq!(money(1_250_000.0, "UGX"), "UGX 1,250,000");
        let d = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(date(d), "07 Mar 2026");
        assert_eq!(percent(42.345), "42.3%");
    }
}
