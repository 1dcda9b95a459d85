//! Background work bound to a screen's visible lifetime.
//!
//! - [`Task`] / [`TaskFn`] / [`TaskRef`] units of work
//! - [`TaskScope`] start, spawn, cancel, drain
//! - [`Completion`] finished-task result pulled by the control thread

mod runner;
#[allow(clippy::module_inception)]
mod scope;
mod task;
mod task_fn;

pub use runner::Completion;
pub use scope::TaskScope;
pub use task::{Task, checkpoint};
pub use task_fn::{TaskFn, TaskRef};
