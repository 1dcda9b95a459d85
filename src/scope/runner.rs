//! # Run one scoped task.
//!
//! ```text
//! token cancelled before start ──► publish TaskRejected (not run)
//!
//! publish TaskStarting ──► task.run(child)
//!     Ok(())          ──► publish TaskStopped
//!     Err(Canceled)   ──► publish TaskStopped (reason "cancelled")
//!     Err(Fail)       ──► publish TaskFailed
//!                    └──► send Completion { task, generation, result }
//! ```
//!
//! Exactly one terminal event is published per task that actually ran.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    error::TaskError,
    events::{Bus, Event, EventKind},
};

use super::task_fn::TaskRef;

/// Result of a finished scoped task, delivered to the control thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Task name.
    pub task: Arc<str>,
    /// Generation of the scope the task ran under.
    pub generation: u64,
    /// What the task returned.
    pub result: Result<(), TaskError>,
}

/// Where a task runs and reports to.
#[derive(Clone)]
pub(crate) struct RunContext {
    pub owner: Arc<str>,
    pub generation: u64,
    pub bus: Bus,
    pub done: mpsc::UnboundedSender<Completion>,
}

/// Executes `task` under `token`, publishing lifecycle events.
pub(crate) async fn run_task(task: TaskRef, token: CancellationToken, cx: RunContext) {
    let name: Arc<str> = Arc::from(task.name());

    if token.is_cancelled() {
        cx.bus.publish(
            event(&cx, EventKind::TaskRejected, &name).with_reason("cancelled_before_start"),
        );
        return;
    }

    cx.bus.publish(event(&cx, EventKind::TaskStarting, &name));
    let result = task.run(token).await;

    match &result {
        Ok(()) => cx.bus.publish(event(&cx, EventKind::TaskStopped, &name)),
        Err(TaskError::Canceled) => cx
            .bus
            .publish(event(&cx, EventKind::TaskStopped, &name).with_reason("cancelled")),
        Err(e) => cx
            .bus
            .publish(event(&cx, EventKind::TaskFailed, &name).with_reason(e.to_string())),
    }

    // The scope may already be gone; nobody to tell then.
    let _ = cx.done.send(Completion {
        task: name,
        generation: cx.generation,
        result,
    });
}

fn event(cx: &RunContext, kind: EventKind, task: &Arc<str>) -> Event {
    Event::new(kind)
        .with_screen(Arc::clone(&cx.owner))
        .with_cycle(cx.generation)
        .with_task(Arc::clone(task))
}
