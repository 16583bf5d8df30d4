//! Runtime settings for the ticker.
//!
//! Settings cover how the shell runs (timer periods, logging, widget,
//! currency symbol). Pay configuration is deliberately absent: it starts
//! from the engine defaults on every launch.
//!
//! ```toml
//! tick_millis = 1000
//! countdown_millis = 1000
//! log_level = "info,salary_core=debug"
//! log_file = "ticker.log"
//! log_console = true
//! show_widget = true
//! widget_output = "/dev/pts/3"
//! currency_symbol = "$"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use salary_core::format::DEFAULT_CURRENCY_SYMBOL;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} must be greater than zero")]
    ZeroPeriod { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Period of the worked-time/income timer.
    pub tick_millis: u64,
    /// Period of the end-of-shift countdown timer.
    pub countdown_millis: u64,
    /// Bare level or full `EnvFilter` directive.
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    /// Whether log records are echoed to the terminal.
    pub log_console: bool,
    /// Open the widget surface at startup.
    pub show_widget: bool,
    /// Where the widget draws. Stdout, shared with the console, when unset.
    pub widget_output: Option<PathBuf>,
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_millis: 1000,
            countdown_millis: 1000,
            log_level: "info".to_string(),
            log_file: None,
            log_console: true,
            show_widget: false,
            widget_output: None,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl Settings {
    /// Reads and validates a TOML settings file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tick_millis == 0 {
            return Err(SettingsError::ZeroPeriod {
                field: "tick_millis",
            });
        }
        if self.countdown_millis == 0 {
            return Err(SettingsError::ZeroPeriod {
                field: "countdown_millis",
            });
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    pub fn countdown_period(&self) -> Duration {
        Duration::from_millis(self.countdown_millis)
    }
}
