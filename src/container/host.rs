use std::sync::Arc;

/// Platform lifecycle callbacks, as delivered by the host view system.
///
/// | host callback  | transition |
/// |----------------|------------|
/// | `ViewCreated`  | attach     |
/// | `Resumed`      | activate   |
/// | `Paused`       | pause      |
/// | `ViewDestroyed`| detach     |
pub enum HostEvent<S: ?Sized> {
    ViewCreated(Arc<S>),
    Resumed,
    Paused,
    ViewDestroyed,
}

impl<S: ?Sized> HostEvent<S> {
    /// Returns a short stable label (snake_case).
    pub fn as_label(&self) -> &'static str {
        match self {
            HostEvent::ViewCreated(_) => "view_created",
            HostEvent::Resumed => "resumed",
            HostEvent::Paused => "paused",
            HostEvent::ViewDestroyed => "view_destroyed",
        }
    }
}

impl<S: ?Sized> std::fmt::Debug for HostEvent<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}
