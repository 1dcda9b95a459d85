//! # Closure tasks.
//!
//! Most screen work is a one-off future ("fetch this row"); [`TaskFn`] lets
//! it be spawned without a dedicated type. The closure is called once per
//! run, so each run owns its own future and captured state must be shared
//! through an `Arc` the closure clones.
//!
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use tilefocus::{TaskFn, TaskRef, TaskError};
//!
//! let t: TaskRef = TaskFn::arc("load-channels", |ctx: CancellationToken| async move {
//!     if ctx.is_cancelled() {
//!         return Err(TaskError::Canceled);
//!     }
//!     Ok::<_, TaskError>(())
//! });
//!
//! assert_eq!(t.name(), "load-channels");
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

use super::task::Task;

/// What a [`TaskScope`](crate::TaskScope) accepts.
pub type TaskRef = Arc<dyn Task>;

/// A named closure producing one future per run.
#[derive(Debug)]
pub struct TaskFn<F> {
    label: Arc<str>,
    make: F,
}

impl<F> TaskFn<F> {
    pub fn new(label: impl Into<Arc<str>>, make: F) -> Self {
        Self {
            label: label.into(),
            make,
        }
    }

    /// Same as [`TaskFn::new`], already wrapped for [`TaskScope::spawn`](crate::TaskScope::spawn).
    pub fn arc(label: impl Into<Arc<str>>, make: F) -> Arc<Self> {
        Arc::new(Self::new(label, make))
    }
}

#[async_trait]
impl<F, Fut> Task for TaskFn<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.label
    }

    async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError> {
        let fut = (self.make)(ctx);
        fut.await
    }
}
