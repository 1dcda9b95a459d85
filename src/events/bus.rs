//! # Event bus for broadcasting lifecycle events.
//!
//! [`Bus`] wraps [`tokio::sync::broadcast`]. Controllers and coordinators
//! publish synchronously from the control thread; task runners publish from
//! the tokio runtime. Creating a bus and publishing do not need a runtime.
//!
//! ```text
//! Publishers:                        Consumer:
//!   Controller  ──┐
//!   Coordinator ──┼──► Bus ──► LifecycleRuntime listener ──► SubscriberSet
//!   TaskScope   ──┘
//! ```
//!
//! ## Rules
//! - `publish()` never blocks and never fails; with no receivers the event is dropped.
//! - One ring buffer of `capacity` events is shared by all receivers.
//! - Receivers that fall behind get `RecvError::Lagged(n)` and skip `n` events.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for lifecycle events.
///
/// Cheap to clone; every controller keeps its own clone.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (clamped to at least 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all current receivers.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a receiver that observes events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    /// Number of live receivers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Bus::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[test]
    fn publish_without_receivers_is_silent() {
        let bus = Bus::new(0);
        assert_eq!(bus.receiver_count(), 0);
        bus.publish(Event::new(EventKind::ScopeStarted));
    }

    #[test]
    fn receiver_sees_later_events_only() {
        let bus = Bus::new(8);
        bus.publish(Event::new(EventKind::ScreenAttached));
        let mut rx = bus.subscribe();
        bus.publish(Event::new(EventKind::ScreenDetached));

        let ev = rx.try_recv().expect("one event");
        assert_eq!(ev.kind, EventKind::ScreenDetached);
        assert!(rx.try_recv().is_err());
    }
}
