//! Shared arithmetic helpers for the pay calculations.

use rust_decimal::Decimal;

pub(crate) const SECONDS_PER_HOUR: i64 = 3600;
pub(crate) const MINUTES_PER_HOUR: i64 = 60;
pub(crate) const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

/// Rounds a currency or hour amount to two decimal places, half away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(85.2272)), dec!(85.23));
/// assert_eq!(round_half_up(dec!(0.125)), dec!(0.13));
/// assert_eq!(round_half_up(dec!(-0.125)), dec!(-0.13));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps a value to zero from below.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-1.5)), dec!(0));
/// assert_eq!(non_negative(dec!(2.5)), dec!(2.5));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Converts a whole number of seconds to fractional hours.
pub fn seconds_to_hours(seconds: u64) -> Decimal {
    Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR)
}
