//! Lifecycle events: types and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `ViewLifecycleController`, `ContainerCoordinator`,
//!   `TaskScope` and its task runner, `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: `LifecycleRuntime` listener (fans out to `SubscriberSet`),
//!   or any code holding a `Bus::subscribe()` receiver.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
