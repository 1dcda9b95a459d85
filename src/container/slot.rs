//! Per-cycle layout ownership.

use std::sync::{Arc, Weak};

use crate::layout::{TileLayout, TileLayoutEngine, ViewId};
use crate::screen::Screen;

/// Engine plus the layout it built for the current attach cycle.
///
/// A slot dropped with a layout still mounted releases it exactly like
/// [`release`](Self::release).
pub(super) struct LayoutSlot<E, S>
where
    E: TileLayoutEngine,
    S: Screen + ?Sized,
{
    pub(super) engine: E,
    layout: Option<E::Layout>,
    screen: Option<Weak<S>>,
}

impl<E, S> LayoutSlot<E, S>
where
    E: TileLayoutEngine,
    S: Screen + ?Sized,
{
    pub(super) fn new(engine: E) -> Self {
        Self {
            engine,
            layout: None,
            screen: None,
        }
    }

    pub(super) fn layout(&self) -> Option<&E::Layout> {
        self.layout.as_ref()
    }

    pub(super) fn layout_mut(&mut self) -> Option<&mut E::Layout> {
        self.layout.as_mut()
    }

    /// Mounts `layout` as the primary child of `screen`.
    ///
    /// Returns the child it replaced, if any.
    pub(super) fn mount(&mut self, screen: &Arc<S>, layout: E::Layout) -> Option<ViewId> {
        let replaced = screen.mount_primary(layout.view_id());
        self.screen = Some(Arc::downgrade(screen));
        self.layout = Some(layout);
        replaced
    }

    /// Releases the layout, notifies the engine, then unmounts it from the
    /// screen if the screen is still alive.
    ///
    /// Returns the released view, or `None` when nothing was mounted.
    pub(super) fn release(&mut self) -> Option<ViewId> {
        let mut layout = self.layout.take()?;
        let view = layout.view_id();
        layout.release();
        self.engine.on_layout_released(&layout);
        if let Some(screen) = self.screen.take().and_then(|w| w.upgrade()) {
            screen.unmount_primary(view);
        }
        Some(view)
    }
}

impl<E, S> Drop for LayoutSlot<E, S>
where
    E: TileLayoutEngine,
    S: Screen + ?Sized,
{
    fn drop(&mut self) {
        self.release();
    }
}
