//! Display helpers shared by every surface that renders a [`Snapshot`].
//!
//! [`Snapshot`]: crate::Snapshot

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;
use crate::models::ClockTime;

/// Currency symbol used when none is configured (Chinese yuan).
pub const DEFAULT_CURRENCY_SYMBOL: &str = "¥";

/// Formats a duration as `HH:MM:SS`.
///
/// Hours are not wrapped at 24, so long sessions keep growing.
///
/// ```
/// use salary_core::format::format_duration;
///
/// assert_eq!(format_duration(3661), "01:01:01");
/// assert_eq!(format_duration(360_000), "100:00:00");
/// ```
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Seconds from `now` until `end_time` on the same day, or 0 once past it.
pub fn compute_countdown(
    end_time: ClockTime,
    now: NaiveDateTime,
) -> u64 {
    let ends_at = end_time.on(now.date());
    if now > ends_at {
        return 0;
    }
    u64::try_from((ends_at - now).num_seconds()).unwrap_or(0)
}

/// `current` as a percentage of `target`, clamped to `[0, 100]`.
///
/// A non-positive target yields 0.
pub fn clamp_progress(
    current: Decimal,
    target: Decimal,
) -> Decimal {
    if target <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (current * Decimal::ONE_HUNDRED / target).clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Formats an amount with a currency symbol, thousands separators and two
/// fraction digits, e.g. `¥12,345.60` or `-¥3.50`.
pub fn format_currency(
    amount: Decimal,
    symbol: &str,
) -> String {
    let rounded = round_half_up(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = format!("{:.2}", rounded.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{sign}{symbol}{}.{fraction}", group_thousands(whole))
}

fn group_thousands(whole: &str) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn at(
        hour: u32,
        minute: u32,
        second: u32,
    ) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn format_duration_pads_every_component() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(59), "00:00:59");
        assert_eq!(format_duration(3661), "01:01:01");
    }

    #[test]
    fn format_duration_does_not_wrap_hours() {
        assert_eq!(format_duration(360_000), "100:00:00");
    }

    #[test]
    fn countdown_to_later_today() {
        let end = ClockTime::parse("18:00").unwrap();

        assert_eq!(compute_countdown(end, at(17, 58, 30)), 90);
        assert_eq!(compute_countdown(end, at(18, 0, 0)), 0);
    }

    #[test]
    fn countdown_does_not_roll_to_tomorrow() {
        let end = ClockTime::parse("06:00").unwrap();

        assert_eq!(compute_countdown(end, at(22, 0, 0)), 0);
    }

    #[test]
    fn progress_with_non_positive_target_is_zero() {
        assert_eq!(clamp_progress(dec!(50), dec!(0)), dec!(0));
        assert_eq!(clamp_progress(dec!(50), dec!(-10)), dec!(0));
    }

    #[test]
    fn progress_is_clamped_to_range() {
        assert_eq!(clamp_progress(dec!(-5), dec!(100)), dec!(0));
        assert_eq!(clamp_progress(dec!(150), dec!(100)), dec!(100));
        assert_eq!(clamp_progress(dec!(7200), dec!(28800)), dec!(25));
    }

    #[test]
    fn currency_has_symbol_grouping_and_two_places() {
        assert_eq!(format_currency(dec!(0), "¥"), "¥0.00");
        assert_eq!(format_currency(dec!(681.818), "¥"), "¥681.82");
        assert_eq!(format_currency(dec!(1234567.5), "$"), "$1,234,567.50");
        assert_eq!(format_currency(dec!(100000), "¥"), "¥100,000.00");
    }

    #[test]
    fn currency_keeps_sign_in_front_of_symbol() {
        assert_eq!(format_currency(dec!(-3.5), "¥"), "-¥3.50");
        assert_eq!(format_currency(dec!(-0.001), "¥"), "¥0.00");
    }
}
