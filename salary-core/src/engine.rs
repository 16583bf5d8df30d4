//! The salary engine: pay configuration, session state and the tick step.
//!
//! # Session states
//!
//! ```text
//!            start()             stop()
//!   Idle ─────────────▶ Running ───────▶ Paused
//!    ▲                     ▲                │
//!    │                     └──── start() ───┘
//!    └──────────── reset() from any state
//! ```
//!
//! The engine performs no I/O and never reads the clock; a driver calls
//! [`SalaryEngine::tick`] with the current instant about once per second.
//! Each operation takes `&mut self`, so a configuration change is never
//! visible half-applied to a tick. Drivers sharing the engine across tasks
//! wrap it in a single mutex.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use salary_core::SalaryEngine;
//!
//! let mut engine = SalaryEngine::new();
//! engine.start();
//!
//! let now = NaiveDate::from_ymd_opt(2025, 6, 2)
//!     .unwrap()
//!     .and_hms_opt(11, 0, 0)
//!     .unwrap();
//! let snapshot = engine.tick(now);
//!
//! assert_eq!(snapshot.current_worked_seconds, 2 * 3600);
//! assert_eq!(snapshot.current_income, dec!(200.00));
//! ```

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::calculations::{
    compute_elapsed_work_seconds, compute_income, compute_work_hours, derive_effective_hourly_rate,
};
use crate::models::{ClockTime, ClockTimeError, OvertimePolicy, PayConfiguration, PayScheme, Snapshot};

/// Errors returned by engine setters. The engine state is left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A numeric field was given a negative value.
    #[error("{field} must be zero or greater, got {value}")]
    InvalidInput { field: &'static str, value: Decimal },

    /// A work-window time was not a valid "HH:MM" string.
    #[error(transparent)]
    InvalidTime(#[from] ClockTimeError),
}

/// One boundary of the work or lunch window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkWindowField {
    WorkStart,
    WorkEnd,
    LunchStart,
    LunchEnd,
}

impl WorkWindowField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WorkStart => "work_start_time",
            Self::WorkEnd => "work_end_time",
            Self::LunchStart => "lunch_start_time",
            Self::LunchEnd => "lunch_end_time",
        }
    }
}

impl fmt::Display for WorkWindowField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No session since the last reset.
    Idle,
    /// Accruing.
    Running,
    /// Started but stopped; accrued time is kept.
    Paused,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
        }
    }
}

/// Everything the engine owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineState {
    pub config: PayConfiguration,
    pub is_running: bool,
    /// Set by the first start after a reset; survives a stop.
    pub is_started: bool,
    pub current_worked_seconds: u64,
    /// Always rounded to two decimal places.
    pub current_income: Decimal,
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new(PayConfiguration::default())
    }
}

impl EngineState {
    pub fn new(config: PayConfiguration) -> Self {
        Self {
            config,
            is_running: false,
            is_started: false,
            current_worked_seconds: 0,
            current_income: Decimal::ZERO,
        }
    }

    pub fn session_state(&self) -> SessionState {
        match (self.is_started, self.is_running) {
            (_, true) => SessionState::Running,
            (true, false) => SessionState::Paused,
            (false, false) => SessionState::Idle,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_income: self.current_income,
            current_worked_seconds: self.current_worked_seconds,
            target_work_seconds: self.config.target_work_seconds(),
            work_end_time: self.config.work_end_time,
        }
    }
}

/// Real-time income calculator for a single working session.
#[derive(Debug, Clone)]
pub struct SalaryEngine {
    state: EngineState,
    last_snapshot: Snapshot,
}

impl Default for SalaryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SalaryEngine {
    /// An idle engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(PayConfiguration::default())
    }

    /// An idle engine with `config` taken as given; `work_hours_per_day` is
    /// not re-derived from the windows.
    pub fn with_config(config: PayConfiguration) -> Self {
        let state = EngineState::new(config);
        let last_snapshot = state.snapshot();
        Self {
            state,
            last_snapshot,
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn config(&self) -> &PayConfiguration {
        &self.state.config
    }

    pub fn session_state(&self) -> SessionState {
        self.state.session_state()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn is_started(&self) -> bool {
        self.state.is_started
    }

    pub fn target_work_seconds(&self) -> u64 {
        self.state.config.target_work_seconds()
    }

    /// Snapshot of the current state, independent of the last tick.
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn effective_hourly_rate(&self) -> Decimal {
        derive_effective_hourly_rate(&self.state.config)
    }

    // ─── configuration ──────────────────────────────────────────────────────

    /// Switches the active pay scheme. Income follows on the next tick.
    pub fn set_scheme(
        &mut self,
        scheme: PayScheme,
    ) {
        debug!(scheme = scheme.as_str(), "pay scheme set");
        self.state.config.scheme = scheme;
    }

    /// Sets the rate stored for `scheme`, active or not.
    pub fn set_rate(
        &mut self,
        scheme: PayScheme,
        value: Decimal,
    ) -> Result<(), EngineError> {
        let field = match scheme {
            PayScheme::Hourly => "hourly_rate",
            PayScheme::Daily => "daily_rate",
            PayScheme::Monthly => "monthly_rate",
        };
        let value = non_negative(field, value)?;
        let config = &mut self.state.config;
        match scheme {
            PayScheme::Hourly => config.hourly_rate = value,
            PayScheme::Daily => config.daily_rate = value,
            PayScheme::Monthly => config.monthly_rate = value,
        }
        debug!(field, %value, "rate set");
        Ok(())
    }

    /// Overrides the regular day length derived from the work windows.
    pub fn set_work_hours_per_day(
        &mut self,
        hours: Decimal,
    ) -> Result<(), EngineError> {
        self.state.config.work_hours_per_day = non_negative("work_hours_per_day", hours)?;
        debug!(%hours, target = self.target_work_seconds(), "work hours per day set");
        Ok(())
    }

    pub fn set_work_days_per_month(
        &mut self,
        days: Decimal,
    ) -> Result<(), EngineError> {
        self.state.config.work_days_per_month = non_negative("work_days_per_month", days)?;
        debug!(%days, "work days per month set");
        Ok(())
    }

    pub fn set_overtime_rate(
        &mut self,
        rate: Decimal,
    ) -> Result<(), EngineError> {
        self.state.config.overtime_rate = non_negative("overtime_rate", rate)?;
        debug!(%rate, "overtime rate set");
        Ok(())
    }

    pub fn set_overtime_hours(
        &mut self,
        hours: Decimal,
    ) -> Result<(), EngineError> {
        self.state.config.overtime_hours = non_negative("overtime_hours", hours)?;
        debug!(%hours, "overtime hours set");
        Ok(())
    }

    pub fn set_overtime_policy(
        &mut self,
        policy: OvertimePolicy,
    ) {
        debug!(policy = policy.as_str(), "overtime policy set");
        self.state.config.overtime_policy = policy;
    }

    /// Moves one window boundary and re-derives `work_hours_per_day`.
    pub fn set_work_window(
        &mut self,
        field: WorkWindowField,
        value: &str,
    ) -> Result<(), EngineError> {
        let time = ClockTime::parse(value).inspect_err(|error| {
            warn!(%field, %error, "rejected work window time");
        })?;

        let config = &mut self.state.config;
        match field {
            WorkWindowField::WorkStart => config.work_start_time = time,
            WorkWindowField::WorkEnd => config.work_end_time = time,
            WorkWindowField::LunchStart => config.lunch_start_time = time,
            WorkWindowField::LunchEnd => config.lunch_end_time = time,
        }
        config.work_hours_per_day = compute_work_hours(
            config.work_start_time,
            config.work_end_time,
            config.lunch_start_time,
            config.lunch_end_time,
        );

        debug!(
            %field,
            %time,
            work_hours_per_day = %config.work_hours_per_day,
            target = config.target_work_seconds(),
            "work window updated"
        );
        Ok(())
    }

    pub fn set_work_start_time(
        &mut self,
        value: &str,
    ) -> Result<(), EngineError> {
        self.set_work_window(WorkWindowField::WorkStart, value)
    }

    pub fn set_work_end_time(
        &mut self,
        value: &str,
    ) -> Result<(), EngineError> {
        self.set_work_window(WorkWindowField::WorkEnd, value)
    }

    pub fn set_lunch_start_time(
        &mut self,
        value: &str,
    ) -> Result<(), EngineError> {
        self.set_work_window(WorkWindowField::LunchStart, value)
    }

    pub fn set_lunch_end_time(
        &mut self,
        value: &str,
    ) -> Result<(), EngineError> {
        self.set_work_window(WorkWindowField::LunchEnd, value)
    }

    // ─── session control ────────────────────────────────────────────────────

    /// Starts or resumes accruing. Accrued time is kept.
    pub fn start(&mut self) {
        if self.state.is_running {
            return;
        }
        self.state.is_running = true;
        self.state.is_started = true;
        info!(worked = self.state.current_worked_seconds, "session running");
    }

    /// Pauses a running session.
    pub fn stop(&mut self) {
        if !self.state.is_running {
            return;
        }
        self.state.is_running = false;
        info!(worked = self.state.current_worked_seconds, "session paused");
    }

    /// Ends the session from any state and clears accrued time and income.
    pub fn reset(&mut self) {
        self.stop();
        self.state.is_started = false;
        self.state.current_worked_seconds = 0;
        self.state.current_income = Decimal::ZERO;
        self.last_snapshot = self.state.snapshot();
        info!("session reset");
    }

    // ─── accrual ────────────────────────────────────────────────────────────

    /// Recomputes worked time from the clock and prices it.
    ///
    /// Before a session has started this returns the previous snapshot
    /// unchanged.
    pub fn tick(
        &mut self,
        now: NaiveDateTime,
    ) -> Snapshot {
        if !self.state.is_started {
            return self.last_snapshot.clone();
        }

        let config = &self.state.config;
        let worked = compute_elapsed_work_seconds(
            config.work_start_time,
            config.lunch_start_time,
            config.lunch_end_time,
            now,
        );
        self.record(worked)
    }

    /// Sets worked time directly instead of deriving it from the clock.
    ///
    /// Ignored, like [`tick`](Self::tick), until a session has started.
    pub fn set_worked_seconds(
        &mut self,
        seconds: u64,
    ) -> Snapshot {
        if !self.state.is_started {
            return self.last_snapshot.clone();
        }
        self.record(seconds)
    }

    fn record(
        &mut self,
        worked_seconds: u64,
    ) -> Snapshot {
        self.state.current_worked_seconds = worked_seconds;
        self.state.current_income = compute_income(&self.state.config, worked_seconds);
        self.last_snapshot = self.state.snapshot();
        trace!(
            worked = worked_seconds,
            income = %self.state.current_income,
            "tick"
        );
        self.last_snapshot.clone()
    }
}

fn non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, EngineError> {
    if value.is_sign_negative() && !value.is_zero() {
        warn!(field, %value, "rejected negative value");
        return Err(EngineError::InvalidInput { field, value });
    }
    Ok(value)
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
    ) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn running_engine() -> SalaryEngine {
        let mut engine = SalaryEngine::new();
        engine.start();
        engine
    }

    // =========================================================================
    // state machine
    // =========================================================================

    #[test]
    fn new_engine_is_idle() {
        let engine = SalaryEngine::new();

        assert_eq!(engine.session_state(), SessionState::Idle);
        assert_eq!(engine.state().current_worked_seconds, 0);
        assert_eq!(engine.state().current_income, Decimal::ZERO);
        assert_eq!(engine.target_work_seconds(), 28_800);
    }

    #[test]
    fn start_stop_start_moves_through_states() {
        let mut engine = SalaryEngine::new();

        engine.start();
        assert_eq!(engine.session_state(), SessionState::Running);

        engine.stop();
        assert_eq!(engine.session_state(), SessionState::Paused);
        assert!(engine.is_started());

        engine.start();
        assert_eq!(engine.session_state(), SessionState::Running);
    }

    #[test]
    fn stop_while_idle_is_a_no_op() {
        let mut engine = SalaryEngine::new();
        engine.stop();

        assert_eq!(engine.session_state(), SessionState::Idle);
    }

    #[test]
    fn resume_keeps_accrued_time() {
        let mut engine = running_engine();
        engine.tick(at(10, 0));
        engine.stop();
        engine.start();

        assert_eq!(engine.state().current_worked_seconds, 3600);
        assert_eq!(engine.state().current_income, dec!(100.00));
    }

    #[test]
    fn reset_from_every_state_returns_to_idle() {
        let idle = SalaryEngine::new();
        let running = running_engine();
        let mut paused = running_engine();
        paused.tick(at(11, 0));
        paused.stop();

        for mut engine in [idle, running, paused] {
            engine.reset();

            let state = engine.state();
            assert!(!state.is_running);
            assert!(!state.is_started);
            assert_eq!(state.current_worked_seconds, 0);
            assert_eq!(state.current_income, Decimal::ZERO);
        }
    }

    // =========================================================================
    // tick
    // =========================================================================

    #[test]
    fn tick_before_start_returns_previous_snapshot() {
        let mut engine = SalaryEngine::new();
        let before = engine.snapshot();

        let snapshot = engine.tick(at(15, 0));

        assert_eq!(snapshot, before);
        assert_eq!(engine.state().current_worked_seconds, 0);
    }

    #[test]
    fn tick_after_reset_returns_cleared_snapshot() {
        let mut engine = running_engine();
        engine.tick(at(15, 0));
        engine.reset();

        let snapshot = engine.tick(at(16, 0));

        assert_eq!(snapshot.current_worked_seconds, 0);
        assert_eq!(snapshot.current_income, Decimal::ZERO);
    }

    #[test]
    fn tick_is_idempotent_for_the_same_instant() {
        let mut engine = running_engine();

        let first = engine.tick(at(14, 30));
        let second = engine.tick(at(14, 30));

        assert_eq!(first, second);
    }

    #[test]
    fn tick_while_paused_still_follows_the_clock() {
        let mut engine = running_engine();
        engine.stop();

        let snapshot = engine.tick(at(10, 0));

        assert_eq!(snapshot.current_worked_seconds, 3600);
    }

    #[test]
    fn tick_snapshot_carries_target_and_end_time() {
        let mut engine = running_engine();

        let snapshot = engine.tick(at(16, 0));

        assert_eq!(
            snapshot,
            Snapshot {
                current_income: dec!(600.00),
                current_worked_seconds: 6 * 3600,
                target_work_seconds: 8 * 3600,
                work_end_time: ClockTime::new(18, 0).unwrap(),
            }
        );
    }

    #[test]
    fn scheme_switch_applies_on_next_tick() {
        let mut engine = running_engine();
        engine.tick(at(13, 0));
        engine.set_scheme(PayScheme::Daily);
        engine.set_rate(PayScheme::Daily, dec!(1600)).unwrap();

        assert_eq!(engine.state().current_income, dec!(300.00));
        assert_eq!(engine.tick(at(13, 0)).current_income, dec!(600.00));
    }

    #[test]
    fn set_worked_seconds_prices_manual_time() {
        let mut engine = running_engine();

        let snapshot = engine.set_worked_seconds(5400);

        assert_eq!(snapshot.current_worked_seconds, 5400);
        assert_eq!(snapshot.current_income, dec!(150.00));
    }

    #[test]
    fn set_worked_seconds_ignored_while_idle() {
        let mut engine = SalaryEngine::new();

        let snapshot = engine.set_worked_seconds(5400);

        assert_eq!(snapshot.current_worked_seconds, 0);
    }

    // =========================================================================
    // setters
    // =========================================================================

    #[test]
    fn work_window_change_rederives_work_hours() {
        let mut engine = SalaryEngine::new();

        engine.set_work_end_time("17:30").unwrap();
        assert_eq!(engine.config().work_hours_per_day, dec!(7.5));
        assert_eq!(engine.target_work_seconds(), 27_000);

        engine.set_lunch_end_time("12:30").unwrap();
        assert_eq!(engine.config().work_hours_per_day, dec!(8.0));

        engine.set_work_start_time("08:00").unwrap();
        engine.set_lunch_start_time("11:30").unwrap();
        assert_eq!(engine.config().work_hours_per_day, dec!(8.5));
    }

    #[test]
    fn malformed_time_is_rejected_without_change() {
        let mut engine = SalaryEngine::new();

        let err = engine.set_work_start_time("nine").unwrap_err();

        assert!(matches!(err, EngineError::InvalidTime(_)));
        assert_eq!(engine.config().work_start_time.to_string(), "09:00");
        assert_eq!(engine.config().work_hours_per_day, dec!(8));
    }

    #[test]
    fn negative_values_are_rejected() {
        let mut engine = SalaryEngine::new();

        assert_eq!(
            engine.set_rate(PayScheme::Monthly, dec!(-1)),
            Err(EngineError::InvalidInput {
                field: "monthly_rate",
                value: dec!(-1)
            })
        );
        assert!(engine.set_overtime_hours(dec!(-0.5)).is_err());
        assert!(engine.set_overtime_rate(dec!(-2)).is_err());
        assert!(engine.set_work_hours_per_day(dec!(-8)).is_err());
        assert!(engine.set_work_days_per_month(dec!(-22)).is_err());
        assert_eq!(engine.config(), &PayConfiguration::default());
    }

    #[test]
    fn zero_is_accepted() {
        let mut engine = SalaryEngine::new();

        assert!(engine.set_work_hours_per_day(dec!(0)).is_ok());
        assert!(engine.set_overtime_rate(dec!(0)).is_ok());
        assert_eq!(engine.target_work_seconds(), 0);
    }

    #[test]
    fn rates_for_other_schemes_are_kept() {
        let mut engine = SalaryEngine::new();
        engine.set_rate(PayScheme::Daily, dec!(960)).unwrap();
        engine.set_scheme(PayScheme::Monthly);
        engine.set_scheme(PayScheme::Daily);

        assert_eq!(engine.config().active_rate(), dec!(960));
        assert_eq!(engine.config().hourly_rate, dec!(100));
    }

    #[test]
    fn effective_rate_tracks_declared_overtime() {
        let mut engine = SalaryEngine::new();
        assert_eq!(engine.effective_hourly_rate(), dec!(100.00));

        engine.set_overtime_hours(dec!(2)).unwrap();
        assert_eq!(engine.effective_hourly_rate(), dec!(110.00));
    }

    #[test]
    fn overtime_policy_switch_changes_income() {
        let mut engine = running_engine();
        engine.set_work_hours_per_day(dec!(4)).unwrap();

        assert_eq!(engine.tick(at(15, 0)).current_income, dec!(400.00));

        engine.set_overtime_policy(OvertimePolicy::ClockDerived);
        assert_eq!(engine.tick(at(15, 0)).current_income, dec!(550.00));
    }

    #[test]
    fn out_of_range_overtime_prices_as_zero() {
        let mut engine = running_engine();
        engine.set_overtime_hours(Decimal::MAX).unwrap();
        engine.set_overtime_rate(dec!(1000000000)).unwrap();

        let snapshot = engine.tick(at(10, 0));

        assert_eq!(snapshot.current_worked_seconds, 3600);
        assert_eq!(snapshot.current_income, Decimal::ZERO);
        assert_eq!(engine.effective_hourly_rate(), Decimal::ZERO);
    }
}
