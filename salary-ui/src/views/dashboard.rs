use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use salary_core::{
    SalaryEngine, SessionState,
    format::{clamp_progress, format_currency, format_duration},
};

use super::status_bar::{build_status_bar, hints};

const BAR_WIDTH: usize = 20;

/// Renders the main view from the live engine state.
///
/// Progress is measured against the session target (regular day plus
/// declared overtime). An idle session shows zero income and time.
pub fn render_dashboard(
    engine: &SalaryEngine,
    countdown_seconds: u64,
    currency_symbol: &str,
) -> String {
    let state = engine.state();
    let config = &state.config;
    let session = engine.session_state();

    let (worked, income) = match session {
        SessionState::Idle => (0, Decimal::ZERO),
        SessionState::Running | SessionState::Paused => {
            (state.current_worked_seconds, state.current_income)
        }
    };
    let target = config.session_target_seconds();
    let percent = clamp_progress(Decimal::from(worked), Decimal::from(target))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let lines = [
        format!("Status:    {}", session.as_str()),
        format!("Income:    {}", format_currency(income, currency_symbol)),
        format!(
            "Progress:  {:>3}% {}",
            percent.to_u64().unwrap_or(0),
            progress_bar(percent, BAR_WIDTH)
        ),
        format!(
            "Worked:    {} / {}",
            format_duration(worked),
            format_duration(target)
        ),
        format!("Ends in:   {}", format_duration(countdown_seconds)),
        format!(
            "Rate:      {}/h ({})",
            format_currency(engine.effective_hourly_rate(), currency_symbol),
            config.scheme.as_str()
        ),
        format!(
            "Overtime:  {} h x {} ({})",
            config.overtime_hours.normalize(),
            config.overtime_rate.normalize(),
            config.overtime_policy.as_str()
        ),
        build_status_bar(hints::DASHBOARD),
    ];
    lines.join("\n")
}

/// `[####------]` with `width` cells, filled in proportion to `percent`.
pub fn progress_bar(
    percent: Decimal,
    width: usize,
) -> String {
    let share = clamp_progress(percent, Decimal::ONE_HUNDRED);
    let filled = (share * Decimal::from(width) / Decimal::ONE_HUNDRED)
        .floor()
        .to_usize()
        .unwrap_or(0)
        .min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(dec!(0), 10), "[----------]");
        assert_eq!(progress_bar(dec!(25), 10), "[##--------]");
        assert_eq!(progress_bar(dec!(100), 10), "[##########]");
        assert_eq!(progress_bar(dec!(250), 4), "[####]");
    }

    #[test]
    fn idle_dashboard_shows_zeros() {
        let engine = SalaryEngine::new();

        let text = render_dashboard(&engine, 3600, "¥");

        assert_eq!(
            lines(&text)[..6].to_vec(),
            vec![
                "Status:    idle",
                "Income:    ¥0.00",
                "Progress:    0% [--------------------]",
                "Worked:    00:00:00 / 08:00:00",
                "Ends in:   01:00:00",
                "Rate:      ¥100.00/h (hourly)",
            ]
        );
    }

    #[test]
    fn running_dashboard_uses_session_target() {
        let mut engine = SalaryEngine::new();
        engine.set_overtime_hours(dec!(2)).unwrap();
        engine.start();
        let now = NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap();
        engine.tick(now);

        let text = render_dashboard(&engine, 14_400, "$");

        // 4 h worked of a 10 h session target.
        assert!(text.contains("Progress:   40% [########------------]"));
        assert!(text.contains("Worked:    04:00:00 / 10:00:00"));
        assert!(text.contains("Overtime:  2 h x 1.5 (declared)"));
        assert!(text.ends_with("toggle: Start/Pause │ reset: Reset │ help: Commands │ quit: Quit"));
    }
}
