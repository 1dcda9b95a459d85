//! # Focus capability of a selectable-element container.
//!
//! [`FocusCapability`] is what the lifecycle layer needs from the tile-layout
//! collaborator to save and restore focus. The snapshot payload is an
//! associated type: the lifecycle layer stores it and hands it back, but never
//! looks inside.

/// Focus surface of a tile layout.
///
/// # Example
/// ```
/// use tilefocus::FocusCapability;
///
/// struct Strip { tiles: Vec<&'static str>, focused: Option<usize> }
///
/// impl FocusCapability for Strip {
///     type Memory = &'static str;
///
///     fn snapshot_focus(&self) -> Option<Self::Memory> {
///         self.focused.map(|i| self.tiles[i])
///     }
///     fn restore_focus(&mut self, memory: &Self::Memory) -> bool {
///         let found = self.tiles.iter().position(|t| t == memory);
///         if found.is_some() { self.focused = found; }
///         found.is_some()
///     }
///     fn focus_first(&mut self) -> bool {
///         self.focused = (!self.tiles.is_empty()).then_some(0);
///         self.focused.is_some()
///     }
///     fn has_focus(&self) -> bool { self.focused.is_some() }
/// }
/// ```
pub trait FocusCapability {
    /// Opaque, owned description of the focused element.
    type Memory;

    /// Describes the focused element, or `None` if nothing is focused.
    fn snapshot_focus(&self) -> Option<Self::Memory>;

    /// Moves focus to the remembered element.
    ///
    /// Returns `false` when the element no longer exists. Must not panic on
    /// stale memory.
    fn restore_focus(&mut self, memory: &Self::Memory) -> bool;

    /// Focuses the element closest to the remembered (now missing) position.
    ///
    /// "Closest" is defined by the implementation and must be deterministic.
    /// Returns `false` when it cannot be resolved.
    fn focus_nearest(&mut self, memory: &Self::Memory) -> bool {
        let _ = memory;
        false
    }

    /// Focuses the first focusable element; `false` when there is none.
    fn focus_first(&mut self) -> bool;

    /// True if an element inside currently holds focus.
    fn has_focus(&self) -> bool;
}

/// Focus target for screens without any selectable elements.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFocus;

impl FocusCapability for NoFocus {
    type Memory = ();

    fn snapshot_focus(&self) -> Option<()> {
        None
    }

    fn restore_focus(&mut self, _memory: &()) -> bool {
        false
    }

    fn focus_first(&mut self) -> bool {
        false
    }

    fn has_focus(&self) -> bool {
        false
    }
}
