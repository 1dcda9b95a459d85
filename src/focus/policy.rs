//! # Default-focus policy.
//!
//! When remembered focus cannot be restored the controller still has to put
//! focus somewhere, otherwise the remote control has nothing to act on.
//!
//! ```text
//! restore(memory) ── true ──► Restored
//!        │ false / no memory
//!        ▼
//! NearestThenFirst: focus_nearest(memory) ── true ──► Nearest
//!                          │ false
//!                          ▼
//!                   focus_first() ── true ──► First
//!                          │ false
//!                          ▼
//!                         Lost
//! ```

use super::{FocusCapability, FocusMemory};

/// What to do when remembered focus is missing or stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Nearest element to the remembered position, then the first focusable one.
    #[default]
    NearestThenFirst,
    /// Always the first focusable element.
    FirstOnly,
    /// Leave focus where it is.
    Disabled,
}

/// Result of settling focus on activate or after a data load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
    /// The remembered element got focus again.
    Restored,
    /// Focus moved to the element nearest the remembered position.
    Nearest,
    /// Focus moved to the first focusable element.
    First,
    /// Something inside the screen already had focus; nothing was changed.
    AlreadyFocused,
    /// The screen is gone or not in a state that permits focus.
    Unavailable,
    /// There is no focus target (no layout attached).
    NoTarget,
    /// Nothing could be focused.
    Lost,
}

impl FocusOutcome {
    /// Returns a short stable label (snake_case) for use in logs/events.
    pub fn as_label(&self) -> &'static str {
        match self {
            FocusOutcome::Restored => "restored",
            FocusOutcome::Nearest => "nearest",
            FocusOutcome::First => "first",
            FocusOutcome::AlreadyFocused => "already_focused",
            FocusOutcome::Unavailable => "unavailable",
            FocusOutcome::NoTarget => "no_target",
            FocusOutcome::Lost => "lost",
        }
    }

    /// True if some element ends up focused.
    pub fn is_focused(&self) -> bool {
        matches!(
            self,
            FocusOutcome::Restored
                | FocusOutcome::Nearest
                | FocusOutcome::First
                | FocusOutcome::AlreadyFocused
        )
    }
}

impl FallbackPolicy {
    /// Applies the policy to `target`, using `memory` as the remembered position.
    pub fn apply<F>(self, target: &mut F, memory: Option<&F::Memory>) -> FocusOutcome
    where
        F: FocusCapability + ?Sized,
    {
        match self {
            FallbackPolicy::Disabled => FocusOutcome::Lost,
            FallbackPolicy::FirstOnly => first(target),
            FallbackPolicy::NearestThenFirst => {
                if memory.is_some_and(|m| target.focus_nearest(m)) {
                    FocusOutcome::Nearest
                } else {
                    first(target)
                }
            }
        }
    }

    /// Restores `memory`, falling back to the policy when that fails.
    pub fn restore_or_fallback<F>(self, target: &mut F, memory: Option<&F::Memory>) -> FocusOutcome
    where
        F: FocusCapability + ?Sized,
    {
        if FocusMemory::restore(Some(&mut *target), memory) {
            return FocusOutcome::Restored;
        }
        self.apply(target, memory)
    }
}

fn first<F: FocusCapability + ?Sized>(target: &mut F) -> FocusOutcome {
    if target.focus_first() {
        FocusOutcome::First
    } else {
        FocusOutcome::Lost
    }
}
