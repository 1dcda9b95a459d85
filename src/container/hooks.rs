//! # Overridable coordinator behavior.
//!
//! Screens customize the coordinator by supplying a [`ContainerHooks`]
//! implementation instead of subclassing it. Every hook has a default.

use crate::layout::{Direction, TileLayout};
use crate::screen::Screen;

/// Decisions a screen can take over from its coordinator.
pub trait ContainerHooks<L: TileLayout, S: Screen + ?Sized> {
    /// Focus is about to leave `layout` in `direction`.
    ///
    /// Return `true` to let the key propagate to the host (default), `false`
    /// to consume it and keep focus inside.
    fn on_leave_focus(&mut self, direction: Direction, layout: &mut L) -> bool {
        let _ = (direction, layout);
        true
    }

    /// The layout is about to rebuild its elements.
    ///
    /// Default: ask the screen to park focus on its placeholder.
    fn retain_focus_before_rebuild(&mut self, screen: &S) -> bool {
        screen.hold_placeholder_focus()
    }
}

/// Hooks with every default left in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultContainerHooks;

impl<L: TileLayout, S: Screen + ?Sized> ContainerHooks<L, S> for DefaultContainerHooks {}
