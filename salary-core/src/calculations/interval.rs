//! Clock-window arithmetic for a working day.
//!
//! Two questions are answered here:
//!
//! * how many regular hours a work window holds once lunch is taken out
//!   ([`compute_work_hours`]), and
//! * how many seconds have been worked so far today at a given instant
//!   ([`compute_elapsed_work_seconds`]).
//!
//! # Lunch handling
//!
//! [`compute_work_hours`] subtracts lunch only when the lunch window lies
//! entirely inside the work window. A lunch that merely overlaps a boundary
//! is ignored rather than clipped. For a shift that crosses midnight, a lunch
//! starting before the shift start is read as falling on the next day.
//!
//! [`compute_elapsed_work_seconds`] works on today's date only; overnight
//! shifts are not rolled over.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::calculations::common::{MINUTES_PER_DAY, MINUTES_PER_HOUR, non_negative, round_half_up};
use crate::models::ClockTime;

/// Regular hours in a work window after removing a contained lunch break.
///
/// The result is rounded to two decimal places and never negative.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::ClockTime;
/// use salary_core::calculations::compute_work_hours;
///
/// let t = |s: &str| ClockTime::parse(s).unwrap();
///
/// let hours = compute_work_hours(t("09:00"), t("18:00"), t("12:00"), t("13:00"));
/// assert_eq!(hours, dec!(8));
///
/// // Overnight shift with a lunch just after midnight.
/// let hours = compute_work_hours(t("22:00"), t("06:00"), t("00:00"), t("00:30"));
/// assert_eq!(hours, dec!(7.5));
/// ```
pub fn compute_work_hours(
    work_start: ClockTime,
    work_end: ClockTime,
    lunch_start: ClockTime,
    lunch_end: ClockTime,
) -> Decimal {
    let start = work_start.minutes_since_midnight();
    let mut end = work_end.minutes_since_midnight();
    let mut lunch_from = lunch_start.minutes_since_midnight();
    let mut lunch_to = lunch_end.minutes_since_midnight();

    let crosses_midnight = end < start;
    if crosses_midnight {
        end += MINUTES_PER_DAY;
    }
    if lunch_to < lunch_from {
        lunch_to += MINUTES_PER_DAY;
    }
    if crosses_midnight && lunch_from < start {
        lunch_from += MINUTES_PER_DAY;
        lunch_to += MINUTES_PER_DAY;
    }

    let mut total_minutes = end - start;
    if lunch_from >= start && lunch_to <= end {
        total_minutes -= lunch_to - lunch_from;
    }

    non_negative(round_half_up(
        Decimal::from(total_minutes) / Decimal::from(MINUTES_PER_HOUR),
    ))
}

/// Seconds worked today between `work_start` and `now`, excluding lunch.
///
/// All window boundaries are placed on `now`'s calendar date. Before the
/// work start this returns 0. Once lunch has begun, the part of the lunch
/// already elapsed is deducted; after lunch ends, the whole lunch is.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use salary_core::ClockTime;
/// use salary_core::calculations::compute_elapsed_work_seconds;
///
/// let t = |s: &str| ClockTime::parse(s).unwrap();
/// let now = NaiveDate::from_ymd_opt(2025, 6, 2)
///     .unwrap()
///     .and_hms_opt(14, 0, 0)
///     .unwrap();
///
/// // 09:00 → 14:00 is five hours, one of them at lunch.
/// let seconds = compute_elapsed_work_seconds(t("09:00"), t("12:00"), t("13:00"), now);
/// assert_eq!(seconds, 4 * 3600);
/// ```
pub fn compute_elapsed_work_seconds(
    work_start: ClockTime,
    lunch_start: ClockTime,
    lunch_end: ClockTime,
    now: NaiveDateTime,
) -> u64 {
    let today = now.date();
    let started_at = work_start.on(today);
    if now < started_at {
        return 0;
    }

    let mut elapsed = (now - started_at).num_seconds();

    let lunch_from = lunch_start.on(today);
    let lunch_to = lunch_end.on(today);
    if now > lunch_from {
        if now > lunch_to {
            // An inverted lunch window deducts nothing rather than adding time.
            elapsed -= (lunch_to - lunch_from).num_seconds().max(0);
        } else {
            elapsed -= (now - lunch_from).num_seconds();
        }
    }

    u64::try_from(elapsed).unwrap_or(0)
}
