//! Focus save/restore.
//!
//! - [`FocusCapability`] what a tile layout must offer
//! - [`FocusMemory`] the per-controller snapshot slot
//! - [`FallbackPolicy`] / [`FocusOutcome`] what happens when memory is stale

mod capability;
mod memory;
mod policy;

pub use capability::{FocusCapability, NoFocus};
pub use memory::FocusMemory;
pub use policy::{FallbackPolicy, FocusOutcome};
