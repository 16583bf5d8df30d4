//! The tick driver and console loop.
//!
//! One task owns the timers and the console. The engine sits behind a
//! mutex so every command and tick runs against a consistent state, and
//! snapshots leave through the relay to the widget.

use std::{
    fs::File,
    io::{self, Write},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use anyhow::{Context, anyhow};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};
use tracing::{debug, info, trace, warn};

use salary_core::{
    SalaryEngine, Snapshot,
    clock::Clock,
    format::compute_countdown,
    relay::WidgetRelay,
};

use crate::{
    commands::{Command, CommandError},
    logging,
    models::PayFormModel,
    settings::Settings,
    views::{self, hints},
};

pub type SharedEngine = Arc<Mutex<SalaryEngine>>;

type WidgetOutput = Box<dyn Write + Send>;

/// What the console should do after a line was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Quiet,
    Show(String),
    Quit,
}

pub struct App {
    engine: SharedEngine,
    relay: WidgetRelay,
    clock: Arc<dyn Clock>,
    settings: Settings,
    countdown_seconds: u64,
    widget: Option<JoinHandle<WidgetOutput>>,
}

impl App {
    pub fn new(
        engine: SalaryEngine,
        clock: Arc<dyn Clock>,
        settings: Settings,
    ) -> Self {
        let mut app = Self {
            engine: Arc::new(Mutex::new(engine)),
            relay: WidgetRelay::new(),
            clock,
            settings,
            countdown_seconds: 0,
            widget: None,
        };
        app.refresh_countdown();
        app
    }

    pub fn engine(&self) -> SharedEngine {
        Arc::clone(&self.engine)
    }

    pub fn relay(&self) -> &WidgetRelay {
        &self.relay
    }

    pub fn countdown_seconds(&self) -> u64 {
        self.countdown_seconds
    }

    fn lock(&self) -> MutexGuard<'_, SalaryEngine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advances the engine to the clock's current time and hands the
    /// result to the widget.
    pub fn tick(&self) -> Snapshot {
        let snapshot = self.lock().tick(self.clock.now());
        trace!(
            worked = snapshot.current_worked_seconds,
            income = %snapshot.current_income,
            "tick"
        );
        self.relay.publish(snapshot.clone());
        snapshot
    }

    pub fn refresh_countdown(&mut self) {
        let end = self.lock().config().work_end_time;
        self.countdown_seconds = compute_countdown(end, self.clock.now());
    }

    pub fn render_dashboard(&self) -> String {
        views::render_dashboard(
            &self.lock(),
            self.countdown_seconds,
            &self.settings.currency_symbol,
        )
    }

    /// Parses and runs one console line.
    pub fn handle_line(
        &mut self,
        line: &str,
    ) -> Result<Reply, CommandError> {
        if line.trim().is_empty() {
            return Ok(Reply::Quiet);
        }
        let command: Command = line.parse()?;

        if command.touches_engine() {
            let running = command.apply(&mut self.lock())?;
            if running {
                self.tick();
            } else {
                let snapshot = self.lock().snapshot();
                self.relay.publish(snapshot);
            }
            self.refresh_countdown();
            return Ok(Reply::Show(self.render_dashboard()));
        }

        let reply = match command {
            Command::Widget => {
                if self.open_widget()? {
                    Reply::Show("widget opened".to_string())
                } else {
                    Reply::Show("widget already open".to_string())
                }
            }
            Command::Status => Reply::Show(self.render_dashboard()),
            Command::Log(level) => {
                logging::set_log_level(&level).map_err(|e| CommandError::Log(format!("{e:#}")))?;
                info!(%level, "log level changed");
                Reply::Show(format!("log level set to '{level}'"))
            }
            Command::Help => Reply::Show(views::build_help(hints::ALL)),
            Command::Quit => Reply::Quit,
            _ => Reply::Quiet,
        };
        Ok(reply)
    }

    /// Opens the widget on the configured output, stdout by default.
    /// Returns `false` if one is already open.
    pub fn open_widget(&mut self) -> Result<bool, CommandError> {
        if self.widget.as_ref().is_some_and(|handle| !handle.is_finished()) {
            debug!("widget already open");
            return Ok(false);
        }

        let out: WidgetOutput = match &self.settings.widget_output {
            Some(path) => Box::new(
                File::options()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| CommandError::WidgetOutput {
                        path: path.clone(),
                        source,
                    })?,
            ),
            None => Box::new(io::stdout()),
        };

        let subscriber = self.relay.subscribe();
        let snapshot = self.lock().snapshot();
        self.relay.publish(snapshot);

        self.widget = Some(tokio::spawn(views::run_widget(
            subscriber,
            Arc::clone(&self.clock),
            self.settings.currency_symbol.clone(),
            self.settings.countdown_period(),
            out,
        )));
        info!("widget opened");
        Ok(true)
    }

    /// Runs until `quit`, Ctrl-C, or `max_ticks` timer ticks.
    ///
    /// The engine only follows the clock on timer ticks while the session
    /// is running. End of input closes the console but the timers keep
    /// running.
    pub async fn run<R: AsyncBufRead + Unpin>(
        mut self,
        input: R,
        max_ticks: Option<u64>,
    ) -> anyhow::Result<()> {
        let mut lines = input.lines();
        let mut input_open = true;

        let mut ticker = interval(self.settings.tick_period());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut countdown = interval(self.settings.countdown_period());
        countdown.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut ticks = 0u64;

        if self.settings.show_widget {
            self.open_widget().context("opening widget")?;
        }
        println!("{}", views::build_status_bar(hints::DASHBOARD));
        info!(
            tick_ms = self.settings.tick_millis,
            countdown_ms = self.settings.countdown_millis,
            "ticker ready"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if self.lock().is_running() {
                        self.tick();
                    }
                    ticks += 1;
                    if max_ticks.is_some_and(|max| ticks >= max) {
                        info!(ticks, "tick limit reached");
                        break;
                    }
                }
                _ = countdown.tick() => self.refresh_countdown(),
                line = lines.next_line(), if input_open => {
                    match line.context("reading console input")? {
                        Some(line) => match self.handle_line(&line) {
                            Ok(Reply::Quit) => break,
                            Ok(Reply::Show(text)) => println!("{text}"),
                            Ok(Reply::Quiet) => {}
                            Err(error) => {
                                warn!(%error, "command rejected");
                                println!("error: {error}");
                            }
                        },
                        None => {
                            debug!("console input closed");
                            input_open = false;
                        }
                    }
                }
                signal = tokio::signal::ctrl_c() => {
                    signal.context("listening for Ctrl-C")?;
                    info!("interrupted");
                    break;
                }
            }
        }

        if let Some(widget) = self.widget.take() {
            widget.abort();
        }
        info!("ticker stopped");
        Ok(())
    }
}

/// Builds the engine for a run from the default configuration plus the
/// command-line overrides.
pub fn build_engine(form: &PayFormModel) -> anyhow::Result<SalaryEngine> {
    form.validate_for_submit()
        .map_err(|errors| anyhow!(errors.join(" ")))?;

    let mut engine = SalaryEngine::new();
    form.apply_to(&mut engine)
        .context("applying pay configuration")?;
    debug!(config = ?engine.config(), "engine configured");
    Ok(engine)
}
