use std::fmt;

use rust_decimal::Decimal;
use salary_core::{ClockTime, EngineError, OvertimePolicy, PayScheme, SalaryEngine, WorkWindowField};

use crate::utils::opt_decimal_display;

/// Startup overrides for the pay configuration, as entered on the command
/// line. Fields left `None` keep the engine default.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PayFormModel {
    pub scheme: Option<PayScheme>,
    pub hourly_rate: Option<Decimal>,
    pub daily_rate: Option<Decimal>,
    pub monthly_rate: Option<Decimal>,
    pub work_hours_per_day: Option<Decimal>,
    pub work_days_per_month: Option<Decimal>,
    pub overtime_rate: Option<Decimal>,
    pub overtime_hours: Option<Decimal>,
    pub overtime_policy: Option<OvertimePolicy>,

    pub work_start_time: Option<String>,
    pub work_end_time: Option<String>,
    pub lunch_start_time: Option<String>,
    pub lunch_end_time: Option<String>,
}

impl PayFormModel {
    /// Validates that every override would be accepted by the engine.
    ///
    /// Rules:
    /// - amounts, hours and multipliers must not be negative
    /// - window times must be "HH:MM"
    pub fn validate_for_submit(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (label, value) in self.amounts() {
            if let Some(value) = value
                && value.is_sign_negative()
                && !value.is_zero()
            {
                errors.push(format!("{label} must be zero or greater."));
            }
        }

        for (field, value) in self.windows() {
            if let Some(value) = value
                && ClockTime::parse(value).is_err()
            {
                errors.push(format!("{field} must be a time like 09:00."));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Pushes the overrides into `engine` through its setters.
    ///
    /// Window times go first so that an explicit `work_hours_per_day`
    /// wins over the value derived from them.
    pub fn apply_to(
        &self,
        engine: &mut SalaryEngine,
    ) -> Result<(), EngineError> {
        for (field, value) in self.windows() {
            if let Some(value) = value {
                engine.set_work_window(field, value)?;
            }
        }

        if let Some(scheme) = self.scheme {
            engine.set_scheme(scheme);
        }
        for (scheme, rate) in [
            (PayScheme::Hourly, self.hourly_rate),
            (PayScheme::Daily, self.daily_rate),
            (PayScheme::Monthly, self.monthly_rate),
        ] {
            if let Some(rate) = rate {
                engine.set_rate(scheme, rate)?;
            }
        }
        if let Some(hours) = self.work_hours_per_day {
            engine.set_work_hours_per_day(hours)?;
        }
        if let Some(days) = self.work_days_per_month {
            engine.set_work_days_per_month(days)?;
        }
        if let Some(rate) = self.overtime_rate {
            engine.set_overtime_rate(rate)?;
        }
        if let Some(hours) = self.overtime_hours {
            engine.set_overtime_hours(hours)?;
        }
        if let Some(policy) = self.overtime_policy {
            engine.set_overtime_policy(policy);
        }
        Ok(())
    }

    fn amounts(&self) -> [(&'static str, Option<Decimal>); 7] {
        [
            ("Hourly rate", self.hourly_rate),
            ("Daily rate", self.daily_rate),
            ("Monthly salary", self.monthly_rate),
            ("Work hours per day", self.work_hours_per_day),
            ("Work days per month", self.work_days_per_month),
            ("Overtime rate", self.overtime_rate),
            ("Overtime hours", self.overtime_hours),
        ]
    }

    fn windows(&self) -> [(WorkWindowField, Option<&str>); 4] {
        [
            (WorkWindowField::WorkStart, self.work_start_time.as_deref()),
            (WorkWindowField::WorkEnd, self.work_end_time.as_deref()),
            (WorkWindowField::LunchStart, self.lunch_start_time.as_deref()),
            (WorkWindowField::LunchEnd, self.lunch_end_time.as_deref()),
        ]
    }
}

impl fmt::Display for PayFormModel {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "—".to_string());

        writeln!(
            f,
            "Scheme:          {}",
            self.scheme.map_or("—", |s| s.as_str())
        )?;
        writeln!(f, "Hourly rate:     {}", opt_decimal_display(&self.hourly_rate))?;
        writeln!(f, "Daily rate:      {}", opt_decimal_display(&self.daily_rate))?;
        writeln!(f, "Monthly salary:  {}", opt_decimal_display(&self.monthly_rate))?;
        writeln!(
            f,
            "Hours per day:   {}",
            opt_decimal_display(&self.work_hours_per_day)
        )?;
        writeln!(
            f,
            "Days per month:  {}",
            opt_decimal_display(&self.work_days_per_month)
        )?;
        writeln!(f, "Overtime rate:   {}", opt_decimal_display(&self.overtime_rate))?;
        writeln!(f, "Overtime hours:  {}", opt_decimal_display(&self.overtime_hours))?;
        writeln!(
            f,
            "Overtime policy: {}",
            self.overtime_policy.map_or("—", |p| p.as_str())
        )?;
        writeln!(
            f,
            "Work window:     {} – {}",
            text(&self.work_start_time),
            text(&self.work_end_time)
        )?;
        write!(
            f,
            "Lunch window:    {} – {}",
            text(&self.lunch_start_time),
            text(&self.lunch_end_time)
        )
    }
}
