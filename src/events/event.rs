//! # Lifecycle events emitted by controllers, coordinators and task scopes.
//!
//! The [`EventKind`] enum classifies events across five groups:
//! - **Lifecycle**: attach/detach, scope start/cancel, contract violations
//! - **Tasks**: scoped task starting/stopped/failed/rejected, drain results
//! - **Focus**: saved, restored, fallback applied, skipped
//! - **Layout**: built, build failed, released, leave-focus, rebuild retention
//! - **Plumbing**: subscriber overflow/panic, external launches
//!
//! The [`Event`] struct carries optional metadata (screen, cycle, task,
//! direction, reason).
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore order when subscribers see events late.
//!
//! ## Example
//! ```rust
//! use tilefocus::{Direction, Event, EventKind};
//!
//! let ev = Event::new(EventKind::FocusLeaveRequested)
//!     .with_screen("home")
//!     .with_direction(Direction::Left)
//!     .with_reason("propagate");
//!
//! assert_eq!(ev.kind, EventKind::FocusLeaveRequested);
//! assert_eq!(ev.screen.as_deref(), Some("home"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::layout::Direction;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets `task` (subscriber name) and `reason` (panic message).
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets `task` (subscriber name) and `reason` (`full` / `closed`).
    SubscriberOverflow,

    // === Lifecycle ===
    /// Controller attached to a screen.
    ///
    /// Sets `screen`, `cycle`.
    ScreenAttached,

    /// Controller detached from its screen.
    ///
    /// Sets `screen`, `cycle`.
    ScreenDetached,

    /// Task scope started (screen became active).
    ///
    /// Sets `screen`, `cycle` (scope generation).
    ScopeStarted,

    /// Task scope cancelled.
    ///
    /// Sets `screen`, `cycle` (scope generation); `reason` is
    /// `cancelled_by_task` when a task cancelled the scope and it was rearmed.
    ScopeCancelled,

    /// A transition was requested from a state that does not permit it.
    ///
    /// Sets `screen`, `reason` (error label and message).
    ContractViolated,

    // === Tasks ===
    /// A scoped task is starting.
    ///
    /// Sets `screen`, `task`, `cycle`.
    TaskStarting,

    /// A scoped task finished successfully or stopped on cancellation.
    ///
    /// Sets `screen`, `task`, `cycle`; `reason = "cancelled"` for graceful stops.
    TaskStopped,

    /// A scoped task failed.
    ///
    /// Sets `screen`, `task`, `cycle`, `reason`.
    TaskFailed,

    /// A task was not scheduled or was dropped before it ran.
    ///
    /// Sets `screen`, `task`, `reason` (`scope_inactive`, `scope_cancelled`,
    /// `no_runtime`, `cancelled_before_start`).
    TaskRejected,

    /// All tasks of cancelled scopes stopped within the grace period.
    ///
    /// Sets `screen`.
    DrainCompleted,

    /// Some tasks of cancelled scopes were still running after the grace period.
    ///
    /// Sets `screen`, `reason` (stuck task names).
    GraceExceeded,

    // === Focus ===
    /// Focus snapshot stored on pause.
    ///
    /// Sets `screen`, `cycle`; `reason = "empty"` when nothing was focused.
    FocusSaved,

    /// Remembered element received focus again.
    ///
    /// Sets `screen`, `cycle`.
    FocusRestored,

    /// Default-focus policy applied.
    ///
    /// Sets `screen`, `cycle`, `reason` (`nearest`, `first`, `lost`).
    FocusFallback,

    /// Focus settling skipped.
    ///
    /// Sets `screen`, `cycle`, `reason` (`already_focused`, `unavailable`, `no_target`).
    FocusSkipped,

    // === Layout ===
    /// Tile layout built and mounted.
    ///
    /// Sets `screen`, `cycle`.
    LayoutBuilt,

    /// Tile layout could not be built.
    ///
    /// Sets `screen`, `reason`.
    LayoutBuildFailed,

    /// Tile layout released and its engine notified.
    ///
    /// Sets `screen`, `cycle`.
    LayoutReleased,

    /// Focus would leave the tile layout.
    ///
    /// Sets `screen`, `direction`, `reason` (`propagate` / `consumed`).
    FocusLeaveRequested,

    /// The layout is about to rebuild its elements.
    ///
    /// Sets `screen`, `reason` (`held` / `lost`).
    RebuildFocusRetention,

    // === External launches ===
    /// External component launched.
    ///
    /// Sets `screen`, `task` (target package).
    ExternalLaunched,

    /// External launch failed.
    ///
    /// Sets `screen`, `task` (target package), `reason`.
    ExternalLaunchFailed,
}

/// Lifecycle event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the screen the event belongs to.
    pub screen: Option<Arc<str>>,
    /// Attach cycle or scope generation.
    pub cycle: Option<u64>,
    /// Task (or launch target) name.
    pub task: Option<Arc<str>>,
    /// Directional key involved.
    pub direction: Option<Direction>,
    /// Human-readable reason.
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            screen: None,
            cycle: None,
            task: None,
            direction: None,
            reason: None,
        }
    }

    /// Attaches a screen name.
    #[inline]
    pub fn with_screen(mut self, screen: impl Into<Arc<str>>) -> Self {
        self.screen = Some(screen.into());
        self
    }

    /// Attaches a cycle or scope generation.
    #[inline]
    pub fn with_cycle(mut self, cycle: u64) -> Self {
        self.cycle = Some(cycle);
        self
    }

    /// Attaches a task name.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Attaches a direction.
    #[inline]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_task(subscriber)
            .with_reason(reason)
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_task(subscriber)
            .with_reason(info)
    }

    /// True for events about subscriber plumbing itself.
    #[inline]
    pub fn is_subscriber_event(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SubscriberOverflow | EventKind::SubscriberPanicked
        )
    }
}
