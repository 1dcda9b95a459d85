//! Host-side collaborators: the screen a controller is attached to and the
//! view model that lives alongside it.
//!
//! Both are implemented by the host. The lifecycle layer only holds a
//! `Weak` reference to the screen and an `Arc` to the view model.

mod placeholder;

pub use placeholder::PlaceholderFocus;

use crate::layout::{Area, ViewId};

/// A navigable unit of the TV application, as seen by the lifecycle layer.
///
/// Methods take `&self`: screens are shared (`Arc`) with the host's view
/// system, so any mutable state lives behind interior mutability.
pub trait Screen {
    /// Area available for the primary tile layout.
    fn display_area(&self) -> Area;

    /// False while the screen cannot accept focus (hidden, being torn down).
    fn is_focus_available(&self) -> bool;

    /// True if some element of the screen itself holds focus.
    fn has_focus(&self) -> bool;

    /// Mounts `view` at child index 0, returning the view it replaced.
    fn mount_primary(&self, view: ViewId) -> Option<ViewId>;

    /// Removes `view` if it is still mounted.
    fn unmount_primary(&self, view: ViewId) {
        let _ = view;
    }

    /// Moves focus onto a placeholder while the layout rebuilds.
    ///
    /// Returns `true` if focus is being held.
    fn hold_placeholder_focus(&self) -> bool {
        false
    }
}

/// Presentation-side companion of a screen.
pub trait ViewModel {
    /// Called once per attach, before the view is wired up.
    fn on_pre_attach(&self) {}

    /// Called once per detach, after all view references are dropped.
    fn on_post_detach(&self) {}
}

/// View model with no behavior.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoViewModel;

impl ViewModel for NoViewModel {}
