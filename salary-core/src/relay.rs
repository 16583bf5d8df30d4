//! One-way channel carrying snapshots from the main surface to the widget.
//!
//! Delivery is best effort: only the latest snapshot is kept, a slow widget
//! skips intermediate ones, and publishing while no widget is open drops
//! the snapshot.

use tokio::sync::watch;
use tracing::trace;

use crate::models::Snapshot;

#[derive(Debug)]
pub struct WidgetRelay {
    sender: watch::Sender<Option<Snapshot>>,
}

impl Default for WidgetRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetRelay {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    /// Attaches a display surface.
    pub fn subscribe(&self) -> WidgetSubscriber {
        WidgetSubscriber {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn has_subscriber(&self) -> bool {
        self.sender.receiver_count() > 0
    }

    /// Pushes a snapshot to the widget. Returns `false` if none was open.
    pub fn publish(
        &self,
        snapshot: Snapshot,
    ) -> bool {
        if !self.has_subscriber() {
            trace!("no widget open, snapshot dropped");
            return false;
        }
        self.sender.send_replace(Some(snapshot));
        true
    }
}

/// Receiving end held by the widget surface.
#[derive(Debug)]
pub struct WidgetSubscriber {
    receiver: watch::Receiver<Option<Snapshot>>,
}

impl WidgetSubscriber {
    /// Waits for the next snapshot. `None` once the relay is gone.
    pub async fn next(&mut self) -> Option<Snapshot> {
        loop {
            if self.receiver.changed().await.is_err() {
                return None;
            }
            if let Some(snapshot) = self.receiver.borrow_and_update().clone() {
                return Some(snapshot);
            }
        }
    }

    /// Most recent snapshot, without waiting.
    pub fn latest(&self) -> Option<Snapshot> {
        self.receiver.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::ClockTime;

    fn snapshot(income: rust_decimal::Decimal) -> Snapshot {
        Snapshot {
            current_income: income,
            current_worked_seconds: 3600,
            target_work_seconds: 28_800,
            work_end_time: ClockTime::new(18, 0).unwrap(),
        }
    }

    #[test]
    fn publish_without_widget_is_dropped() {
        let relay = WidgetRelay::new();

        assert!(!relay.publish(snapshot(dec!(1))));
    }

    #[tokio::test]
    async fn subscriber_sees_latest_snapshot_only() {
        let relay = WidgetRelay::new();
        let mut widget = relay.subscribe();

        assert!(relay.publish(snapshot(dec!(1))));
        assert!(relay.publish(snapshot(dec!(2))));

        assert_eq!(widget.next().await, Some(snapshot(dec!(2))));
        assert_eq!(widget.latest(), Some(snapshot(dec!(2))));
    }

    #[tokio::test]
    async fn subscriber_ends_when_relay_is_dropped() {
        let relay = WidgetRelay::new();
        let mut widget = relay.subscribe();
        drop(relay);

        assert_eq!(widget.next().await, None);
    }

    #[test]
    fn closing_the_widget_detaches_it() {
        let relay = WidgetRelay::new();
        let widget = relay.subscribe();
        assert!(relay.has_subscriber());

        drop(widget);
        assert!(!relay.has_subscriber());
    }
}
