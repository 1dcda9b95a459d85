//! # Scoped background work.
//!
//! A [`Task`] is one unit of asynchronous work started under a screen's
//! [`TaskScope`](crate::TaskScope): loading a channel list, refreshing a
//! row, polling a pairing code. It receives a [`CancellationToken`] that is
//! cancelled when the screen stops being visible and should return
//! [`TaskError::Canceled`] at the next [`checkpoint`].

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

/// # Asynchronous, cancelable unit bound to a screen.
///
/// # Example
/// ```
/// use tokio_util::sync::CancellationToken;
/// use async_trait::async_trait;
/// use tilefocus::{Task, TaskError, checkpoint};
///
/// struct LoadRows;
///
/// #[async_trait]
/// impl Task for LoadRows {
///     fn name(&self) -> &str { "load-rows" }
///
///     async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError> {
///         checkpoint(&ctx)?;
///         // fetch...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Executes the task until completion or cancellation.
    async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError>;
}

/// Cooperative cancellation point.
///
/// Returns `Err(TaskError::Canceled)` once `ctx` is cancelled.
pub fn checkpoint(ctx: &CancellationToken) -> Result<(), TaskError> {
    if ctx.is_cancelled() {
        Err(TaskError::Canceled)
    } else {
        Ok(())
    }
}
