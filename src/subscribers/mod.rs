//! # Event subscribers.
//!
//! ```text
//! Controller ── publish(Event) ──► Bus ──► LifecycleRuntime listener
//!                                               │
//!                                               ▼
//!                                         SubscriberSet::emit
//!                                     ┌─────────┼─────────┐
//!                                     ▼         ▼         ▼
//!                                  Journal  LogWriter  Custom
//! ```
//!
//! - [`Subscribe`] the trait to implement for custom observers
//! - [`SubscriberSet`] bounded, panic-isolated fan-out
//! - [`Journal`] in-memory record of events
//! - `LogWriter` stdout writer (`logging` feature)

mod journal;
#[cfg(any(test, feature = "logging"))]
mod log;
mod set;
mod subscribe;

pub use journal::Journal;
#[cfg(any(test, feature = "logging"))]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
