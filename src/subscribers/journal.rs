//! # In-memory event journal.
//!
//! [`Journal`] keeps the most recent events it receives, in delivery order.
//! Hosts use it for on-device diagnostics screens; tests use it to assert on
//! what the lifecycle layer published. Once `max_events` is reached the
//! oldest event is dropped for each new one.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Subscriber that records recent events in memory.
pub struct Journal {
    events: Mutex<VecDeque<Event>>,
    capacity: usize,
    max_events: usize,
}

impl Journal {
    /// Events kept by default.
    pub const DEFAULT_MAX_EVENTS: usize = 4096;

    /// Creates an empty journal with the default queue capacity.
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Creates an empty journal with a custom queue capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::new()),
            capacity,
            max_events: Self::DEFAULT_MAX_EVENTS,
        }
    }

    /// Caps the number of retained events (min 1).
    pub fn with_max_events(mut self, max_events: usize) -> Self {
        self.max_events = max_events.max(1);
        self
    }

    /// Returns a copy of the retained events.
    pub async fn events(&self) -> Vec<Event> {
        self.events.lock().await.iter().cloned().collect()
    }

    /// Returns retained event kinds in delivery order.
    pub async fn kinds(&self) -> Vec<EventKind> {
        self.events.lock().await.iter().map(|e| e.kind).collect()
    }

    /// Number of retained events of `kind`.
    pub async fn count(&self, kind: EventKind) -> usize {
        self.events
            .lock()
            .await
            .iter()
            .filter(|e| e.kind == kind)
            .count()
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Subscribe for Journal {
    async fn on_event(&self, event: &Event) {
        let mut events = self.events.lock().await;
        while events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(event.clone());
    }

    fn name(&self) -> &'static str {
        "journal"
    }

    fn queue_capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keeps_only_the_latest_events() {
        let journal = Journal::new().with_max_events(2);
        journal.on_event(&Event::new(EventKind::ScreenAttached)).await;
        journal.on_event(&Event::new(EventKind::ScopeStarted)).await;
        journal.on_event(&Event::new(EventKind::ScopeCancelled)).await;

        assert_eq!(
            journal.kinds().await,
            vec![EventKind::ScopeStarted, EventKind::ScopeCancelled]
        );
        assert_eq!(journal.count(EventKind::ScreenAttached).await, 0);
    }

    #[tokio::test]
    async fn zero_cap_still_keeps_the_last_event() {
        let journal = Journal::new().with_max_events(0);
        journal.on_event(&Event::new(EventKind::ScreenAttached)).await;
        journal.on_event(&Event::new(EventKind::ScreenDetached)).await;
        assert_eq!(journal.kinds().await, vec![EventKind::ScreenDetached]);
    }
}
