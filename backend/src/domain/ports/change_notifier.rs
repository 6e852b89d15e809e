//! Driven port for publishing committed writes to realtime subscribers.

use crate::domain::ChangeEvent;

/// Fan-out of change events.
///
/// Publishing is fire-and-forget: implementations must not block and must
/// not fail the write that triggered the event.
#[cfg_attr(test, mockall::automock)]
pub trait ChangeNotifier: Send + Sync {
    /// Offer an event to current subscribers.
    fn publish(&self, event: ChangeEvent);
}

/// Notifier that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpChangeNotifier;

impl ChangeNotifier for NoOpChangeNotifier {
    fn publish(&self, _event: ChangeEvent) {}
}
