//! Broadcast fan-out of committed writes to WebSocket sessions.

use tokio::sync::broadcast;
use tracing::trace;

use crate::domain::ChangeEvent;
use crate::domain::ports::ChangeNotifier;

/// Events buffered per subscriber before it is considered lagging.
pub const DEFAULT_FEED_CAPACITY: usize = 256;

/// [`ChangeNotifier`] backed by a `tokio` broadcast channel.
///
/// A subscriber that falls more than the channel capacity behind loses the
/// oldest events and observes `RecvError::Lagged` on its next receive.
#[derive(Debug, Clone)]
pub struct BroadcastChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl BroadcastChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Receive every event published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastChangeFeed {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_CAPACITY)
    }
}

impl ChangeNotifier for BroadcastChangeFeed {
    fn publish(&self, event: ChangeEvent) {
        // `send` only fails when nobody is listening.
        if self.sender.send(event).is_err() {
            trace!("change event dropped; no subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::fixture_now;
    use crate::domain::{ChangeKind, ChangeTable};
    use rstest::rstest;
    use tokio::sync::broadcast::error::RecvError;

    fn deleted(id: &str) -> ChangeEvent {
        ChangeEvent::deleted(ChangeTable::Rooms, id, fixture_now())
    }

    #[rstest]
    fn publishing_without_subscribers_is_silent() {
        let feed = BroadcastChangeFeed::default();
        feed.publish(deleted("101"));
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn subscribers_receive_events_in_order() {
        let feed = BroadcastChangeFeed::default();
        let mut rx = feed.subscribe();
        feed.publish(deleted("a"));
        feed.publish(deleted("b"));

        let first = rx.recv().await.expect("first");
        let second = rx.recv().await.expect("second");
        assert_eq!((first.id.as_str(), second.id.as_str()), ("a", "b"));
        assert_eq!(first.kind, ChangeKind::Delete);
    }

    #[rstest]
    #[tokio::test]
    async fn slow_subscribers_observe_lag() {
        let feed = BroadcastChangeFeed::new(2);
        let mut rx = feed.subscribe();
        for id in ["a", "b", "c", "d"] {
            feed.publish(deleted(id));
        }
        assert!(matches!(rx.recv().await, Err(RecvError::Lagged(2))));
        assert_eq!(rx.recv().await.expect("after lag").id, "c");
    }
}
