//! Boundary sanitization of numeric input.
//!
//! Invalid numbers are clamped where they enter the system so the
//! aggregation math only ever sees values in `0..=MAX_INPUT`.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// Clamps negative values to zero.
///
/// # Examples
///
/// ```
/// use estimate_engine::calculation::non_negative;
/// use rust_decimal::Decimal;
///
/// assert_eq!(non_negative(Decimal::new(-5, 0)), Decimal::ZERO);
/// assert_eq!(non_negative(Decimal::new(5, 0)), Decimal::new(5, 0));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    if value < Decimal::ZERO {
        Decimal::ZERO
    } else {
        value
    }
}

/// Upper bound for any single quantity, cost, hour count, multiplier,
/// rate or percent accepted from input (one trillion).
pub const MAX_INPUT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Clamps a value into `0..=MAX_INPUT`.
///
/// # Examples
///
/// ```
/// use estimate_engine::calculation::{bounded, MAX_INPUT};
/// use rust_decimal::Decimal;
///
/// assert_eq!(bounded(Decimal::new(-5, 0)), Decimal::ZERO);
/// assert_eq!(bounded(Decimal::new(5, 0)), Decimal::new(5, 0));
/// assert_eq!(bounded(Decimal::MAX), MAX_INPUT);
/// ```
pub fn bounded(value: Decimal) -> Decimal {
    non_negative(value).min(MAX_INPUT)
}

/// Converts a float to a sanitized decimal.
///
/// `NaN`, infinities and negative values all become zero.
///
/// # Examples
///
/// ```
/// use estimate_engine::calculation::decimal_from_f64;
/// use rust_decimal::Decimal;
///
/// assert_eq!(decimal_from_f64(f64::NAN), Decimal::ZERO);
/// assert_eq!(decimal_from_f64(-3.0), Decimal::ZERO);
/// assert_eq!(decimal_from_f64(1.5), Decimal::new(15, 1));
/// ```
pub fn decimal_from_f64(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(value)
        .map(non_negative)
        .unwrap_or(Decimal::ZERO)
}

/// Parses user-entered text the way a numeric form field would.
///
/// Surrounding whitespace is ignored; anything unparseable becomes zero.
pub fn parse_amount(input: &str) -> Decimal {
    let trimmed = input.trim();
    match trimmed.parse::<Decimal>() {
        Ok(value) => non_negative(value),
        Err(_) => trimmed
            .parse::<f64>()
            .map(decimal_from_f64)
            .unwrap_or(Decimal::ZERO),
    }
}

/// Converts a whole-number percent to a fraction (`10` → `0.10`).
///
/// Negative percents are treated as zero.
pub fn percent(value: Decimal) -> Decimal {
    non_negative(value) / Decimal::ONE_HUNDRED
}
