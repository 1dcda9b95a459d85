//! Application-wide runtime: owns the bus and the subscriber set, and hands
//! out controllers and coordinators wired to them.

mod builder;
#[allow(clippy::module_inception)]
mod runtime;

pub use builder::RuntimeBuilder;
pub use runtime::LifecycleRuntime;
