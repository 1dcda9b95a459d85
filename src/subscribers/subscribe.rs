//! # Core subscriber trait
//!
//! `Subscribe` is the extension point for observing lifecycle events. Each
//! subscriber is driven by a dedicated worker fed by a bounded queue owned by
//! the [`SubscriberSet`](crate::SubscriberSet).
//!
//! ## Contract
//! - Implementations may be slow; they never block the control thread or
//!   other subscribers.
//! - On queue overflow, events for that subscriber are dropped and a
//!   `SubscriberOverflow` event is published.

use async_trait::async_trait;

use crate::events::Event;

/// Contract for event subscribers.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tilefocus::{Event, EventKind, Subscribe};
///
/// struct FocusAudit;
///
/// #[async_trait]
/// impl Subscribe for FocusAudit {
///     async fn on_event(&self, ev: &Event) {
///         if ev.kind == EventKind::FocusFallback {
///             // record which screens lose their remembered focus
///         }
///     }
///
///     fn name(&self) -> &'static str { "focus-audit" }
/// }
/// ```
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single event.
    async fn on_event(&self, event: &Event);

    /// Human-readable name (for logs and overflow events).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred capacity of this subscriber's queue.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
