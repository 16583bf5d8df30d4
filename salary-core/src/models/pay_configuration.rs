use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

use super::{ClockTime, OvertimePolicy, PayScheme};

const SECONDS_PER_HOUR: i64 = 3600;

/// Pay and schedule settings the engine prices a session with.
///
/// All three rates are retained so that switching [`PayScheme`] keeps what
/// the user entered for the other schemes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayConfiguration {
    pub scheme: PayScheme,
    pub hourly_rate: Decimal,
    pub daily_rate: Decimal,
    pub monthly_rate: Decimal,

    /// Regular hours in a working day. Kept in step with the work and
    /// lunch windows by the engine, but may also be set directly.
    pub work_hours_per_day: Decimal,
    /// Only consulted by [`PayScheme::Monthly`].
    pub work_days_per_month: Decimal,

    /// Multiplier applied to the base rate for overtime hours.
    pub overtime_rate: Decimal,
    /// Overtime the user declares for today.
    pub overtime_hours: Decimal,
    pub overtime_policy: OvertimePolicy,

    pub work_start_time: ClockTime,
    pub work_end_time: ClockTime,
    pub lunch_start_time: ClockTime,
    pub lunch_end_time: ClockTime,
}

impl Default for PayConfiguration {
    fn default() -> Self {
        Self {
            scheme: PayScheme::Hourly,
            hourly_rate: Decimal::from(100),
            daily_rate: Decimal::from(800),
            monthly_rate: Decimal::from(15000),
            work_hours_per_day: Decimal::from(8),
            work_days_per_month: Decimal::from(22),
            overtime_rate: Decimal::new(15, 1),
            overtime_hours: Decimal::ZERO,
            overtime_policy: OvertimePolicy::Declared,
            work_start_time: clock(9, 0),
            work_end_time: clock(18, 0),
            lunch_start_time: clock(12, 0),
            lunch_end_time: clock(13, 0),
        }
    }
}

fn clock(
    hour: u32,
    minute: u32,
) -> ClockTime {
    ClockTime::new(hour, minute).unwrap_or_default()
}

impl PayConfiguration {
    /// The rate stored for `scheme`, whether or not it is the active one.
    pub fn rate_for(
        &self,
        scheme: PayScheme,
    ) -> Decimal {
        match scheme {
            PayScheme::Hourly => self.hourly_rate,
            PayScheme::Daily => self.daily_rate,
            PayScheme::Monthly => self.monthly_rate,
        }
    }

    pub fn active_rate(&self) -> Decimal {
        self.rate_for(self.scheme)
    }

    /// Length of the regular working day in whole seconds.
    pub fn target_work_seconds(&self) -> u64 {
        hours_to_seconds(self.work_hours_per_day)
    }

    /// Regular day plus the declared overtime, in whole seconds.
    pub fn session_target_seconds(&self) -> u64 {
        self.work_hours_per_day
            .checked_add(self.overtime_hours)
            .map_or(0, hours_to_seconds)
    }
}

/// Whole seconds in `hours`, or 0 when that does not fit in a `u64`.
fn hours_to_seconds(hours: Decimal) -> u64 {
    hours
        .checked_mul(Decimal::from(SECONDS_PER_HOUR))
        .and_then(|seconds| seconds.round().to_u64())
        .unwrap_or(0)
}
