//! Line commands accepted by the console.
//!
//! Numeric arguments follow the form-field rule: a missing or empty value
//! reads as 0, thousands separators are accepted, anything else is
//! rejected without touching the engine.

use std::{io, path::PathBuf, str::FromStr};

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use salary_core::{EngineError, OvertimePolicy, PayScheme, SalaryEngine, WorkWindowField};

use crate::utils::{ParseDecimalError, parse_decimal};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    #[error("'{command}' needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("unknown pay scheme '{0}': expected hourly, daily or monthly")]
    UnknownScheme(String),

    #[error("unknown overtime policy '{0}': expected declared or clock")]
    UnknownPolicy(String),

    #[error("invalid worked time '{0}': expected whole seconds")]
    InvalidSeconds(String),

    #[error("cannot change log level: {0}")]
    Log(String),

    #[error("cannot open widget output '{}': {source}", path.display())]
    WidgetOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Amount(#[from] ParseDecimalError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Toggle,
    Reset,
    Scheme(PayScheme),
    Rate(PayScheme, Decimal),
    WorkHours(Decimal),
    WorkDays(Decimal),
    OvertimeHours(Decimal),
    OvertimeRate(Decimal),
    OvertimePolicy(OvertimePolicy),
    Window(WorkWindowField, String),
    Worked(u64),
    Widget,
    Status,
    Log(String),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Empty);
        };
        let rest: Vec<&str> = words.collect();
        let arg = rest.first().copied();
        let amount = || parse_decimal(&rest.join(""));

        let command = match name.to_ascii_lowercase().as_str() {
            "start" => Self::Start,
            "stop" => Self::Stop,
            "toggle" => Self::Toggle,
            "reset" => Self::Reset,
            "scheme" => Self::Scheme(scheme_arg("scheme", arg)?),
            "rate" => {
                let scheme = scheme_arg("rate", arg)?;
                Self::Rate(scheme, parse_decimal(&rest[1..].join(""))?)
            }
            "hours" => Self::WorkHours(amount()?),
            "days" => Self::WorkDays(amount()?),
            "ot-hours" => Self::OvertimeHours(amount()?),
            "ot-rate" => Self::OvertimeRate(amount()?),
            "ot-policy" => {
                let value = arg.ok_or(CommandError::MissingArgument {
                    command: "ot-policy",
                    what: "declared or clock",
                })?;
                let policy = OvertimePolicy::parse(value)
                    .ok_or_else(|| CommandError::UnknownPolicy(value.to_string()))?;
                Self::OvertimePolicy(policy)
            }
            "work-start" => window(WorkWindowField::WorkStart, "work-start", arg)?,
            "work-end" => window(WorkWindowField::WorkEnd, "work-end", arg)?,
            "lunch-start" => window(WorkWindowField::LunchStart, "lunch-start", arg)?,
            "lunch-end" => window(WorkWindowField::LunchEnd, "lunch-end", arg)?,
            "worked" => {
                let value = arg.unwrap_or("0");
                let seconds = value
                    .parse()
                    .map_err(|_| CommandError::InvalidSeconds(value.to_string()))?;
                Self::Worked(seconds)
            }
            "widget" => Self::Widget,
            "status" => Self::Status,
            "log" => Self::Log(
                arg.ok_or(CommandError::MissingArgument {
                    command: "log",
                    what: "a level or filter directive",
                })?
                .to_string(),
            ),
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => return Err(CommandError::Unknown(name.to_string())),
        };
        Ok(command)
    }
}

fn scheme_arg(
    command: &'static str,
    arg: Option<&str>,
) -> Result<PayScheme, CommandError> {
    let value = arg.ok_or(CommandError::MissingArgument {
        command,
        what: "hourly, daily or monthly",
    })?;
    PayScheme::parse(value).ok_or_else(|| CommandError::UnknownScheme(value.to_string()))
}

fn window(
    field: WorkWindowField,
    command: &'static str,
    arg: Option<&str>,
) -> Result<Command, CommandError> {
    let value = arg.ok_or(CommandError::MissingArgument {
        command,
        what: "a time like 09:00",
    })?;
    Ok(Command::Window(field, value.to_string()))
}

impl Command {
    /// Whether the command goes through [`Command::apply`].
    pub fn touches_engine(&self) -> bool {
        !matches!(
            self,
            Self::Widget | Self::Status | Self::Log(_) | Self::Help | Self::Quit
        )
    }

    /// Applies an engine command. Returns whether the session is running
    /// afterwards; commands that do not touch the engine are no-ops.
    pub fn apply(
        &self,
        engine: &mut SalaryEngine,
    ) -> Result<bool, CommandError> {
        debug!(command = ?self, "applying command");
        match self {
            Self::Start => engine.start(),
            Self::Stop => engine.stop(),
            Self::Toggle => {
                if engine.is_running() {
                    engine.stop();
                } else {
                    engine.start();
                }
            }
            Self::Reset => {
                engine.stop();
                engine.reset();
            }
            Self::Scheme(scheme) => engine.set_scheme(*scheme),
            Self::Rate(scheme, value) => engine.set_rate(*scheme, *value)?,
            Self::WorkHours(hours) => engine.set_work_hours_per_day(*hours)?,
            Self::WorkDays(days) => engine.set_work_days_per_month(*days)?,
            Self::OvertimeHours(hours) => engine.set_overtime_hours(*hours)?,
            Self::OvertimeRate(rate) => engine.set_overtime_rate(*rate)?,
            Self::OvertimePolicy(policy) => engine.set_overtime_policy(*policy),
            Self::Window(field, value) => engine.set_work_window(*field, value)?,
            Self::Worked(seconds) => {
                engine.set_worked_seconds(*seconds);
            }
            Self::Widget | Self::Status | Self::Log(_) | Self::Help | Self::Quit => {}
        }
        Ok(engine.is_running())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn parse(line: &str) -> Command {
        line.parse().unwrap()
    }

    // =========================================================================
    // parsing
    // =========================================================================

    #[test]
    fn parses_session_commands_case_insensitively() {
        assert_eq!(parse("START"), Command::Start);
        assert_eq!(parse("  stop "), Command::Stop);
        assert_eq!(parse("Toggle"), Command::Toggle);
        assert_eq!(parse("reset"), Command::Reset);
        assert_eq!(parse("q"), Command::Quit);
    }

    #[test]
    fn parses_rate_with_thousands_separator() {
        assert_eq!(
            parse("rate monthly 15,000"),
            Command::Rate(PayScheme::Monthly, dec!(15000))
        );
    }

    #[test]
    fn missing_amount_reads_as_zero() {
        assert_eq!(parse("ot-hours"), Command::OvertimeHours(dec!(0)));
        assert_eq!(parse("rate daily"), Command::Rate(PayScheme::Daily, dec!(0)));
    }

    #[test]
    fn parses_window_and_policy() {
        assert_eq!(
            parse("lunch-end 13:30"),
            Command::Window(WorkWindowField::LunchEnd, "13:30".to_string())
        );
        assert_eq!(
            parse("ot-policy clock"),
            Command::OvertimePolicy(OvertimePolicy::ClockDerived)
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!("".parse::<Command>(), Err(CommandError::Empty)));
        assert!(matches!("dance".parse::<Command>(), Err(CommandError::Unknown(_))));
        assert!(matches!(
            "scheme weekly".parse::<Command>(),
            Err(CommandError::UnknownScheme(_))
        ));
        assert!(matches!(
            "hours eight".parse::<Command>(),
            Err(CommandError::Amount(_))
        ));
        assert!(matches!(
            "worked -5".parse::<Command>(),
            Err(CommandError::InvalidSeconds(_))
        ));
        assert!(matches!(
            "work-start".parse::<Command>(),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    // =========================================================================
    // applying
    // =========================================================================

    #[test]
    fn toggle_flips_running_state() {
        let mut engine = SalaryEngine::new();

        assert!(Command::Toggle.apply(&mut engine).unwrap());
        assert!(!Command::Toggle.apply(&mut engine).unwrap());
        assert!(engine.is_started());
    }

    #[test]
    fn reset_from_running_returns_to_idle() {
        let mut engine = SalaryEngine::new();
        Command::Start.apply(&mut engine).unwrap();
        Command::Worked(3600).apply(&mut engine).unwrap();

        let running = Command::Reset.apply(&mut engine).unwrap();

        assert!(!running);
        assert!(!engine.is_started());
        assert_eq!(engine.snapshot().current_worked_seconds, 0);
    }

    #[test]
    fn worked_prices_manual_time() {
        let mut engine = SalaryEngine::new();
        Command::Start.apply(&mut engine).unwrap();

        Command::Worked(5400).apply(&mut engine).unwrap();

        assert_eq!(engine.snapshot().current_income, dec!(150.00));
    }

    #[test]
    fn negative_rate_is_rejected_by_engine() {
        let mut engine = SalaryEngine::new();

        let err = Command::Rate(PayScheme::Hourly, dec!(-1))
            .apply(&mut engine)
            .unwrap_err();

        assert!(matches!(err, CommandError::Engine(EngineError::InvalidInput { .. })));
        assert_eq!(engine.config().hourly_rate, dec!(100));
    }

    #[test]
    fn window_change_rederives_day_length() {
        let mut engine = SalaryEngine::new();

        Command::Window(WorkWindowField::WorkEnd, "19:00".to_string())
            .apply(&mut engine)
            .unwrap();

        assert_eq!(engine.config().work_hours_per_day, dec!(9));
        assert_eq!(engine.target_work_seconds(), 32_400);
    }
}
