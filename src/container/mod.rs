//! Screens that embed a tile layout.
//!
//! - [`ContainerCoordinator`] lifecycle controller plus per-cycle layout ownership
//! - [`ContainerHooks`] overridable leave-focus / rebuild decisions
//! - [`HostEvent`] platform callbacks mapped onto transitions

mod coordinator;
mod hooks;
mod host;
mod slot;

pub use coordinator::{ContainerCoordinator, KeyRoute};
pub use hooks::{ContainerHooks, DefaultContainerHooks};
pub use host::HostEvent;
