//! Income derivation for the configured pay scheme.
//!
//! Every scheme is reduced to a base hourly rate:
//!
//! | Scheme  | Base hourly rate |
//! |---------|------------------|
//! | Hourly  | `hourly_rate` |
//! | Daily   | `daily_rate / work_hours_per_day` |
//! | Monthly | `monthly_rate / (work_days_per_month × work_hours_per_day)` |
//!
//! Income for a session is then
//!
//! ```text
//! min(worked_hours, work_hours_per_day) × base
//!   + overtime_hours × base × overtime_rate
//! ```
//!
//! where the overtime hours come from the configuration's
//! [`OvertimePolicy`]. Results are rounded half away from zero to two
//! decimal places; intermediate values are not rounded.
//!
//! A zero divisor makes the base rate undefined. That is a legal transient
//! state while the user edits the schedule, so the public income functions
//! report it as zero rather than failing. Amounts too large for a
//! [`Decimal`] are reported the same way.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{non_negative, round_half_up, seconds_to_hours};
use crate::models::{OvertimePolicy, PayConfiguration, PayScheme};

/// Errors raised while deriving an hourly rate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IncomeError {
    /// A rate divisor in the configuration is zero.
    #[error("cannot derive an hourly rate: {divisor} is zero")]
    DivisionByZero { divisor: &'static str },

    /// An intermediate amount does not fit in a [`Decimal`].
    #[error("amount out of range while computing {stage}")]
    Overflow { stage: &'static str },
}

fn overflow(stage: &'static str) -> IncomeError {
    IncomeError::Overflow { stage }
}

/// The un-rounded hourly rate implied by the active pay scheme.
///
/// # Errors
///
/// Returns [`IncomeError::DivisionByZero`] when `work_hours_per_day` (daily
/// and monthly schemes) or `work_days_per_month` (monthly scheme) is zero.
pub fn base_hourly_rate(config: &PayConfiguration) -> Result<Decimal, IncomeError> {
    match config.scheme {
        PayScheme::Hourly => Ok(config.hourly_rate),
        PayScheme::Daily => {
            if config.work_hours_per_day.is_zero() {
                return Err(IncomeError::DivisionByZero {
                    divisor: "work_hours_per_day",
                });
            }
            config
                .daily_rate
                .checked_div(config.work_hours_per_day)
                .ok_or(overflow("base hourly rate"))
        }
        PayScheme::Monthly => {
            if config.work_days_per_month.is_zero() {
                return Err(IncomeError::DivisionByZero {
                    divisor: "work_days_per_month",
                });
            }
            if config.work_hours_per_day.is_zero() {
                return Err(IncomeError::DivisionByZero {
                    divisor: "work_hours_per_day",
                });
            }
            config
                .work_days_per_month
                .checked_mul(config.work_hours_per_day)
                .and_then(|monthly_hours| config.monthly_rate.checked_div(monthly_hours))
                .ok_or(overflow("base hourly rate"))
        }
    }
}

/// Overtime hours to price, given the hours worked so far.
pub fn overtime_hours_used(
    config: &PayConfiguration,
    worked_hours: Decimal,
) -> Decimal {
    match config.overtime_policy {
        OvertimePolicy::Declared => config.overtime_hours,
        OvertimePolicy::ClockDerived => non_negative(worked_hours - config.work_hours_per_day),
    }
}

/// Income earned for `worked_seconds`, rounded to two decimal places.
///
/// Returns zero when the base rate cannot be derived or the amount is out
/// of range.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::{PayConfiguration, PayScheme};
/// use salary_core::calculations::compute_income;
///
/// let config = PayConfiguration {
///     scheme: PayScheme::Daily,
///     daily_rate: dec!(800),
///     work_hours_per_day: dec!(8),
///     ..Default::default()
/// };
///
/// assert_eq!(compute_income(&config, 4 * 3600), dec!(400.00));
/// ```
pub fn compute_income(
    config: &PayConfiguration,
    worked_seconds: u64,
) -> Decimal {
    checked_income(config, worked_seconds).unwrap_or_else(|error| {
        debug!(%error, "income cannot be derived, reporting zero");
        Decimal::ZERO
    })
}

fn checked_income(
    config: &PayConfiguration,
    worked_seconds: u64,
) -> Result<Decimal, IncomeError> {
    let base = base_hourly_rate(config)?;

    let worked_hours = seconds_to_hours(worked_seconds);
    let regular_hours = worked_hours.min(config.work_hours_per_day);
    let overtime_hours = overtime_hours_used(config, worked_hours);

    let regular_pay = regular_hours
        .checked_mul(base)
        .ok_or(overflow("regular pay"))?;
    let overtime_pay = overtime_hours
        .checked_mul(base)
        .and_then(|pay| pay.checked_mul(config.overtime_rate))
        .ok_or(overflow("overtime pay"))?;

    regular_pay
        .checked_add(overtime_pay)
        .map(round_half_up)
        .ok_or(overflow("income"))
}

/// Average hourly rate for a full day including declared overtime.
///
/// Without declared overtime this is the base rate. With overtime it blends
/// the regular day and the overtime premium over their combined hours.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::PayConfiguration;
/// use salary_core::calculations::derive_effective_hourly_rate;
///
/// let config = PayConfiguration {
///     overtime_hours: dec!(2),
///     ..Default::default()
/// };
///
/// // (8 × 100 + 2 × 100 × 1.5) / 10
/// assert_eq!(derive_effective_hourly_rate(&config), dec!(110.00));
/// ```
pub fn derive_effective_hourly_rate(config: &PayConfiguration) -> Decimal {
    checked_effective_rate(config).unwrap_or_else(|error| {
        debug!(%error, "effective rate cannot be derived, reporting zero");
        Decimal::ZERO
    })
}

fn checked_effective_rate(config: &PayConfiguration) -> Result<Decimal, IncomeError> {
    let base = base_hourly_rate(config)?;
    if config.overtime_hours <= Decimal::ZERO {
        return Ok(round_half_up(base));
    }

    let total_hours = config
        .work_hours_per_day
        .checked_add(config.overtime_hours)
        .ok_or(overflow("day length"))?;
    let regular_income = config
        .work_hours_per_day
        .checked_mul(base)
        .ok_or(overflow("regular pay"))?;
    let overtime_income = config
        .overtime_hours
        .checked_mul(base)
        .and_then(|pay| pay.checked_mul(config.overtime_rate))
        .ok_or(overflow("overtime pay"))?;

    regular_income
        .checked_add(overtime_income)
        .and_then(|income| income.checked_div(total_hours))
        .map(round_half_up)
        .ok_or(overflow("effective rate"))
}
