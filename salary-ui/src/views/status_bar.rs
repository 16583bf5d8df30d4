//! Command hints shown under the dashboard and by `help`.

/// One console command and what it does.
pub struct CommandHint {
    pub usage: &'static str,
    pub action: &'static str,
}

impl CommandHint {
    pub const fn new(
        usage: &'static str,
        action: &'static str,
    ) -> Self {
        Self { usage, action }
    }
}

/// One-line hint bar, e.g. `start: Start │ stop: Pause`.
pub fn build_status_bar(hints: &[CommandHint]) -> String {
    hints
        .iter()
        .map(|h| format!("{}: {}", h.usage, h.action))
        .collect::<Vec<_>>()
        .join(" │ ")
}

/// Full command listing with aligned usage column.
pub fn build_help(hints: &[CommandHint]) -> String {
    let width = hints.iter().map(|h| h.usage.len()).max().unwrap_or(0);
    hints
        .iter()
        .map(|h| format!("  {:width$}  {}", h.usage, h.action))
        .collect::<Vec<_>>()
        .join("\n")
}

pub mod hints {
    use super::CommandHint;

    pub const START: CommandHint = CommandHint::new("start", "Start");
    pub const STOP: CommandHint = CommandHint::new("stop", "Pause");
    pub const TOGGLE: CommandHint = CommandHint::new("toggle", "Start/Pause");
    pub const RESET: CommandHint = CommandHint::new("reset", "Reset");
    pub const HELP: CommandHint = CommandHint::new("help", "Commands");
    pub const QUIT: CommandHint = CommandHint::new("quit", "Quit");

    pub const DASHBOARD: &[CommandHint] = &[TOGGLE, RESET, HELP, QUIT];

    pub const ALL: &[CommandHint] = &[
        START,
        STOP,
        TOGGLE,
        RESET,
        CommandHint::new("scheme <hourly|daily|monthly>", "Switch pay scheme"),
        CommandHint::new("rate <scheme> <amount>", "Set the rate for a scheme"),
        CommandHint::new("hours <h>", "Regular hours per day"),
        CommandHint::new("days <d>", "Work days per month"),
        CommandHint::new("ot-hours <h>", "Declared overtime hours"),
        CommandHint::new("ot-rate <r>", "Overtime multiplier"),
        CommandHint::new("ot-policy <declared|clock>", "Overtime source"),
        CommandHint::new("work-start <HH:MM>", "Start of the work day"),
        CommandHint::new("work-end <HH:MM>", "End of the work day"),
        CommandHint::new("lunch-start <HH:MM>", "Start of lunch"),
        CommandHint::new("lunch-end <HH:MM>", "End of lunch"),
        CommandHint::new("worked <seconds>", "Set worked time by hand"),
        CommandHint::new("widget", "Open the compact widget"),
        CommandHint::new("status", "Show the dashboard"),
        CommandHint::new("log <level>", "Change log filter"),
        HELP,
        QUIT,
    ];
}
