//! # Focus memory.
//!
//! [`FocusMemory`] holds at most one snapshot for one controller. The
//! snapshot is overwritten on every pause (also with "nothing focused"), read
//! on every resume and after data loads, and discarded when a new attach
//! cycle starts.
//!
//! ```text
//! pause ──► snapshot(target) ──► store(Some(m) | None)
//! resume ─► restore(target, memory) ──► false ──► FallbackPolicy
//! attach ─► clear()
//! ```

use super::FocusCapability;

/// Per-controller focus snapshot slot.
#[derive(Debug)]
pub struct FocusMemory<M> {
    slot: Option<M>,
}

impl<M> FocusMemory<M> {
    /// Creates an empty memory.
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Captures the focused element of `target`.
    ///
    /// Returns `None` if there is no target or nothing is focused in it.
    pub fn snapshot<F>(target: Option<&F>) -> Option<M>
    where
        F: FocusCapability<Memory = M> + ?Sized,
    {
        target.and_then(|t| t.snapshot_focus())
    }

    /// Tries to focus the element described by `memory` inside `target`.
    ///
    /// Missing target, missing memory and stale memory all return `false`.
    pub fn restore<F>(target: Option<&mut F>, memory: Option<&M>) -> bool
    where
        F: FocusCapability<Memory = M> + ?Sized,
    {
        match (target, memory) {
            (Some(t), Some(m)) => t.restore_focus(m),
            _ => false,
        }
    }

    /// Overwrites the stored snapshot.
    pub fn store(&mut self, memory: Option<M>) {
        self.slot = memory;
    }

    /// Returns the stored snapshot.
    pub fn get(&self) -> Option<&M> {
        self.slot.as_ref()
    }

    /// True if a snapshot is stored.
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// Drops the stored snapshot.
    pub fn clear(&mut self) {
        self.slot = None;
    }
}

impl<M> Default for FocusMemory<M> {
    fn default() -> Self {
        Self::new()
    }
}
