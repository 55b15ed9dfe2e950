//! App-wide event bus.
//!
//! Screens that are not looking at a repository stream (the notification
//! badge, the profile header) still need to hear about cross-cutting
//! changes. Delivery is best-effort: a lagging receiver misses events and
//! re-reads its state instead.

use tokio::sync::broadcast;
use uuid::Uuid;

/// Default channel capacity; events are tiny and transient.
const EVENT_CAPACITY: usize = 64;

/// Cross-cutting application events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The first-launch catalog population finished.
    CatalogPopulated { count: usize },
    /// A favorite flag changed.
    FavoriteChanged { id: String, is_favorite: bool },
    /// The user signed in, signed out, or was deleted.
    SessionChanged,
    /// A notification landed in the in-app center.
    NotificationPosted { id: Uuid },
}

/// Cheaply clonable handle to the broadcast channel.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. Having no subscribers is not an error.
    pub fn emit(&self, event: AppEvent) {
        tracing::trace!(?event, "emitting app event");
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_events() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.emit(AppEvent::SessionChanged);

        assert_eq!(rx.recv().await.unwrap(), AppEvent::SessionChanged);
    }

    #[test]
    fn emit_without_subscribers_is_fine() {
        EventBus::new().emit(AppEvent::SessionChanged);
    }
}
