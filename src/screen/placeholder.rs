//! # Placeholder focus.
//!
//! A zero-size focusable element a screen puts focus on while its tile
//! layout is rebuilt, so the remote control never loses its target. It is
//! focusable only for a short hold window and then reverts.
//!
//! Time is passed in explicitly; the host decides which clock drives it.

use std::time::{Duration, Instant};

/// Time-boxed focus holder.
#[derive(Debug, Clone)]
pub struct PlaceholderFocus {
    hold: Duration,
    focusable_until: Option<Instant>,
}

impl PlaceholderFocus {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            focusable_until: None,
        }
    }

    /// Starts (or extends) a hold window beginning at `now`.
    pub fn hold_at(&mut self, now: Instant) {
        self.focusable_until = Some(now + self.hold);
    }

    /// True while inside the hold window.
    pub fn is_focusable_at(&self, now: Instant) -> bool {
        self.focusable_until.is_some_and(|until| now < until)
    }

    /// Ends an expired hold window. Returns `true` if one was ended.
    pub fn release_expired(&mut self, now: Instant) -> bool {
        match self.focusable_until {
            Some(until) if now >= until => {
                self.focusable_until = None;
                true
            }
            _ => false,
        }
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }
}

impl Default for PlaceholderFocus {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}
