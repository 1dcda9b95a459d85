//! Screen lifecycle: the state machine and its controller.

mod controller;
mod state;

pub use controller::ViewLifecycleController;
pub use state::{LifecycleState, Transition};
