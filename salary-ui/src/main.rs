use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;
use tokio::io::BufReader;
use tracing::{debug, info};

use salary_core::{OvertimePolicy, PayScheme, clock::SystemClock};
use salary_ui::{
    App, Settings, build_engine, logging, models::PayFormModel, utils::parse_decimal,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Live salary ticker.
///
/// Accrues income second by second across the configured work day, with a
/// command console on stdin and an optional compact widget line.
#[derive(Debug, Parser)]
#[command(name = "SalaryTicker", version)]
struct Cli {
    /// TOML file with runtime settings (timers, logging, widget, currency).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Active pay scheme: hourly, daily or monthly.
    #[arg(long, value_parser = parse_scheme)]
    scheme: Option<PayScheme>,

    #[arg(long, value_parser = parse_decimal)]
    hourly_rate: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    daily_rate: Option<Decimal>,

    /// Monthly salary.
    #[arg(long, value_parser = parse_decimal)]
    monthly_rate: Option<Decimal>,

    /// Regular hours per day. Overrides the value derived from the windows.
    #[arg(long, value_parser = parse_decimal)]
    work_hours: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    work_days: Option<Decimal>,

    /// Overtime pay multiplier.
    #[arg(long, value_parser = parse_decimal)]
    overtime_rate: Option<Decimal>,

    /// Declared overtime hours for the day.
    #[arg(long, value_parser = parse_decimal)]
    overtime_hours: Option<Decimal>,

    /// Where overtime comes from: declared or clock.
    #[arg(long, value_parser = parse_policy)]
    overtime_policy: Option<OvertimePolicy>,

    /// Start of the work day, HH:MM.
    #[arg(long)]
    work_start: Option<String>,

    #[arg(long)]
    work_end: Option<String>,

    #[arg(long)]
    lunch_start: Option<String>,

    #[arg(long)]
    lunch_end: Option<String>,

    /// Open the compact widget at startup.
    #[arg(long)]
    widget: bool,

    /// Start the session immediately.
    #[arg(long)]
    autostart: bool,

    /// Log filter, e.g. `debug` or `info,salary_core=trace`.
    #[arg(long)]
    log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Exit after this many timer ticks.
    #[arg(long)]
    ticks: Option<u64>,
}

impl Cli {
    fn pay_form(&self) -> PayFormModel {
        PayFormModel {
            scheme: self.scheme,
            hourly_rate: self.hourly_rate,
            daily_rate: self.daily_rate,
            monthly_rate: self.monthly_rate,
            work_hours_per_day: self.work_hours,
            work_days_per_month: self.work_days,
            overtime_rate: self.overtime_rate,
            overtime_hours: self.overtime_hours,
            overtime_policy: self.overtime_policy,
            work_start_time: self.work_start.clone(),
            work_end_time: self.work_end.clone(),
            lunch_start_time: self.lunch_start.clone(),
            lunch_end_time: self.lunch_end.clone(),
        }
    }

    /// Settings file (or defaults) with command-line flags on top.
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(level) = &self.log_level {
            settings.log_level = level.clone();
        }
        if let Some(path) = &self.log_file {
            settings.log_file = Some(path.clone());
        }
        settings.show_widget |= self.widget;
        Ok(settings)
    }
}

fn parse_scheme(s: &str) -> Result<PayScheme, String> {
    PayScheme::parse(s).ok_or_else(|| format!("unknown pay scheme '{s}'"))
}

fn parse_policy(s: &str) -> Result<OvertimePolicy, String> {
    OvertimePolicy::parse(s).ok_or_else(|| format!("unknown overtime policy '{s}'"))
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings()?;

    logging::init_logging(&settings.log_level);
    if !settings.log_console {
        logging::set_console_enabled(false)?;
    }
    if let Some(path) = &settings.log_file {
        logging::enable_file_logging(path)?;
    }
    debug!(?settings, "settings loaded");

    let form = cli.pay_form();
    info!("pay configuration overrides\n{form}");
    let mut engine = build_engine(&form).context("invalid pay configuration")?;
    if cli.autostart {
        engine.start();
    }
    info!(scheme = engine.config().scheme.as_str(), "starting salary ticker");

    let app = App::new(engine, Arc::new(SystemClock), settings);
    app.run(BufReader::new(tokio::io::stdin()), cli.ticks).await
}
