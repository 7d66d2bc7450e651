//! Display formatting for currency and hours.
//!
//! Formatting never feeds back into the breakdown; values are rounded only
//! for display.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to two decimal places, halves away from zero.
///
/// # Examples
///
/// ```
/// use estimate_engine::export::round_half_up;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_half_up(Decimal::new(70312, 3)), Decimal::new(7031, 2));
/// assert_eq!(round_half_up(Decimal::new(1005, 3)), Decimal::new(101, 2));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn fixed_2dp(value: Decimal) -> String {
    let mut rounded = round_half_up(value);
    rounded.rescale(2);
    rounded.to_string()
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats an amount as US dollars, e.g. `$1,278.40`.
///
/// # Examples
///
/// ```
/// use estimate_engine::export::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(12784, 1)), "$1,278.40");
/// assert_eq!(format_currency(Decimal::new(-5, 0)), "-$5.00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let fixed = fixed_2dp(value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if round_half_up(value) < Decimal::ZERO { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

/// Formats hours with two decimal places, e.g. `15.50`.
pub fn format_hours(value: Decimal) -> String {
    fixed_2dp(value)
}

/// Formats an amount with two decimal places and no currency symbol.
pub fn format_amount(value: Decimal) -> String {
    fixed_2dp(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(dec("0")), "$0.00");
        assert_eq!(format_currency(dec("999.999")), "$1,000.00");
        assert_eq!(format_currency(dec("1234567.8")), "$1,234,567.80");
        assert_eq!(format_currency(dec("2556.8")), "$2,556.80");
    }

    #[test]
    fn test_format_currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec("0.125")), "$0.13");
        assert_eq!(format_currency(dec("-0.125")), "-$0.13");
    }

    #[test]
    fn test_negative_zero_after_rounding_has_no_sign() {
        assert_eq!(format_currency(dec("-0.001")), "$0.00");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(dec("15.5")), "15.50");
        assert_eq!(format_hours(dec("8")), "8.00");
        assert_eq!(format_hours(dec("2.666666")), "2.67");
    }

    #[test]
    fn test_round_half_up_leaves_short_values() {
        assert_eq!(round_half_up(dec("1278.4")), dec("1278.4"));
    }
}
