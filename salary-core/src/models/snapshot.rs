use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ClockTime;

/// Read-only view of the engine handed to display surfaces after each tick.
///
/// Serialises with the field names the widget surface expects:
/// `currentIncome`, `currentWorkTime`, `targetWorkTime` and `workEndTime`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(with = "rust_decimal::serde::float")]
    pub current_income: Decimal,
    #[serde(rename = "currentWorkTime")]
    pub current_worked_seconds: u64,
    #[serde(rename = "targetWorkTime")]
    pub target_work_seconds: u64,
    pub work_end_time: ClockTime,
}

impl Snapshot {
    /// Share of the regular day already worked, in percent within `[0, 100]`.
    pub fn progress_percent(&self) -> Decimal {
        crate::format::clamp_progress(
            Decimal::from(self.current_worked_seconds),
            Decimal::from(self.target_work_seconds),
        )
    }
}
