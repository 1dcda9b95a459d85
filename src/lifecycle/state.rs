//! # Lifecycle states and transitions.
//!
//! ```text
//!            attach            activate
//! Detached ─────────► Attached ─────────► Active
//!    ▲                  │                │  ▲
//!    │      detach      │          pause │  │ activate
//!    ├──────────────────┘                ▼  │
//!    │              detach            Paused
//!    └────────────────────────────────────┘
//! ```

use std::fmt;

/// State of a [`ViewLifecycleController`](crate::ViewLifecycleController).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LifecycleState {
    #[default]
    Detached,
    Attached,
    Active,
    Paused,
}

/// Requested lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Attach,
    Activate,
    Pause,
    Detach,
}

impl LifecycleState {
    /// State reached by applying `op`, or `None` if `op` is not allowed here.
    pub fn next(self, op: Transition) -> Option<LifecycleState> {
        use LifecycleState::*;
        match (self, op) {
            (Detached, Transition::Attach) => Some(Attached),
            (Attached | Paused, Transition::Activate) => Some(Active),
            (Active, Transition::Pause) => Some(Paused),
            (Attached | Paused, Transition::Detach) => Some(Detached),
            _ => None,
        }
    }

    /// Returns a short stable label (lowercase).
    pub fn as_label(&self) -> &'static str {
        match self {
            LifecycleState::Detached => "detached",
            LifecycleState::Attached => "attached",
            LifecycleState::Active => "active",
            LifecycleState::Paused => "paused",
        }
    }
}

impl Transition {
    pub const ALL: [Transition; 4] = [
        Transition::Attach,
        Transition::Activate,
        Transition::Pause,
        Transition::Detach,
    ];

    /// Returns a short stable label (lowercase).
    pub fn as_label(&self) -> &'static str {
        match self {
            Transition::Attach => "attach",
            Transition::Activate => "activate",
            Transition::Pause => "pause",
            Transition::Detach => "detach",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}
