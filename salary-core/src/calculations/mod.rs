//! Pay calculations for a single working day.
//!
//! [`interval`] turns clock windows into hours and elapsed seconds;
//! [`income`] prices worked time under the configured pay scheme.

pub mod common;
pub mod income;
pub mod interval;

pub use income::{
    IncomeError, base_hourly_rate, compute_income, derive_effective_hourly_rate,
    overtime_hours_used,
};
pub use interval::{compute_elapsed_work_seconds, compute_work_hours};
