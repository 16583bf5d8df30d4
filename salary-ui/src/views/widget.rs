//! Compact widget surface.
//!
//! The widget never reads the engine. It renders whatever the relay last
//! delivered and keeps its own end-of-shift countdown from the clock.

use std::{io::Write, sync::Arc, time::Duration};

use rust_decimal::{Decimal, RoundingStrategy};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, warn};

use salary_core::{
    Snapshot,
    clock::Clock,
    format::{compute_countdown, format_currency, format_duration},
    relay::WidgetSubscriber,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetView {
    currency_symbol: String,
    snapshot: Option<Snapshot>,
    countdown_seconds: u64,
}

impl WidgetView {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            snapshot: None,
            countdown_seconds: 0,
        }
    }

    pub fn update(
        &mut self,
        snapshot: Snapshot,
    ) {
        self.snapshot = Some(snapshot);
    }

    /// Recomputes the countdown against the last delivered end time.
    pub fn refresh_countdown(
        &mut self,
        now: chrono::NaiveDateTime,
    ) {
        if let Some(snapshot) = &self.snapshot {
            self.countdown_seconds = compute_countdown(snapshot.work_end_time, now);
        }
    }

    /// Progress against the regular day, to one decimal.
    pub fn progress(&self) -> Decimal {
        self.snapshot.as_ref().map_or(Decimal::ZERO, |s| {
            s.progress_percent()
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        })
    }

    /// `None` until the first snapshot arrives.
    pub fn render(&self) -> Option<String> {
        let snapshot = self.snapshot.as_ref()?;
        Some(format!(
            "{} | {:.1}% | {} left",
            format_currency(snapshot.current_income, &self.currency_symbol),
            self.progress(),
            format_duration(self.countdown_seconds)
        ))
    }
}

/// Drives a widget until the relay goes away, redrawing one line on `out`
/// for every snapshot and every countdown period. Hands `out` back when
/// done.
pub async fn run_widget<W: Write + Send>(
    mut subscriber: WidgetSubscriber,
    clock: Arc<dyn Clock>,
    currency_symbol: String,
    countdown_period: Duration,
    mut out: W,
) -> W {
    let mut view = WidgetView::new(currency_symbol);
    if let Some(snapshot) = subscriber.latest() {
        view.update(snapshot);
    }

    let mut countdown = interval(countdown_period);
    countdown.set_missed_tick_behavior(MissedTickBehavior::Skip);

    debug!("widget opened");
    loop {
        tokio::select! {
            next = subscriber.next() => match next {
                Some(snapshot) => view.update(snapshot),
                None => break,
            },
            _ = countdown.tick() => {}
        }

        view.refresh_countdown(clock.now());
        if let Some(line) = view.render()
            && let Err(error) = write!(out, "\r{line}").and_then(|()| out.flush())
        {
            warn!(%error, "widget output failed, closing");
            return out;
        }
    }

    if let Err(error) = writeln!(out).and_then(|()| out.flush()) {
        warn!(%error, "widget output failed while closing");
    }
    debug!("widget closed");
    out
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use salary_core::{ClockTime, clock::ManualClock, relay::WidgetRelay};

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

    fn snapshot(worked: u64) -> Snapshot {
        Snapshot {
            current_income: dec!(1234.5),
            current_worked_seconds: worked,
            target_work_seconds: 28_800,
            work_end_time: ClockTime::parse("18:00").unwrap(),
        }
    }

    #[test]
    fn renders_nothing_before_first_snapshot() {
        assert_eq!(WidgetView::new("¥").render(), None);
    }

    #[test]
    fn renders_income_progress_and_countdown() {
        let mut view = WidgetView::new("¥");
        view.update(snapshot(10_000));
        view.refresh_countdown(at(16, 30));

        // 10000 / 28800 = 34.72%
        assert_eq!(view.progress(), dec!(34.7));
        assert_eq!(
            view.render().as_deref(),
            Some("¥1,234.50 | 34.7% | 01:30:00 left")
        );
    }

    #[test]
    fn progress_caps_at_one_hundred() {
        let mut view = WidgetView::new("$");
        view.update(snapshot(40_000));

        assert_eq!(view.progress(), dec!(100.0));
    }

    #[tokio::test]
    async fn widget_stops_when_relay_closes() {
        let relay = WidgetRelay::new();
        let subscriber = relay.subscribe();
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(at(17, 0)));
        relay.publish(snapshot(3600));

        let task = tokio::spawn(run_widget(
            subscriber,
            clock,
            "¥".to_string(),
            Duration::from_secs(60),
            Vec::new(),
        ));
        drop(relay);

        let out = String::from_utf8(task.await.unwrap()).unwrap();
        assert!(out.contains("\r¥1,234.50 | 12.5% | 01:00:00 left"));
        assert!(out.ends_with('\n'));
    }
}
