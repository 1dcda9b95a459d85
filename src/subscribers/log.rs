//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [attached] screen=home cycle=1
//! [scope-started] screen=home generation=1
//! [task-failed] screen=home task=load-channels err="timeout"
//! [focus-saved] screen=home cycle=1
//! [focus-fallback] screen=home policy=first
//! [leave-focus] screen=home dir=Left decision=propagate
//! [contract-violated] screen=home err="cannot pause while attached"
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Stdout logging subscriber.
///
/// Enabled via the `logging` feature. Not intended for production use;
/// implement a custom [`Subscribe`] for structured logging.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self
    }

    fn line(e: &Event) -> Option<String> {
        let screen = e.screen.as_deref().unwrap_or("-");
        let reason = e.reason.as_deref().unwrap_or("");
        let task = e.task.as_deref().unwrap_or("-");
        let cycle = e.cycle.unwrap_or(0);

        let line = match e.kind {
            EventKind::ScreenAttached => format!("[attached] screen={screen} cycle={cycle}"),
            EventKind::ScreenDetached => format!("[detached] screen={screen} cycle={cycle}"),
            EventKind::ScopeStarted => format!("[scope-started] screen={screen} generation={cycle}"),
            EventKind::ScopeCancelled => {
                format!("[scope-cancelled] screen={screen} generation={cycle}")
            }
            EventKind::ContractViolated => format!("[contract-violated] screen={screen} err={reason:?}"),
            EventKind::TaskStarting => format!("[task-starting] screen={screen} task={task}"),
            EventKind::TaskStopped => format!("[task-stopped] screen={screen} task={task} {reason}"),
            EventKind::TaskFailed => format!("[task-failed] screen={screen} task={task} err={reason:?}"),
            EventKind::TaskRejected => format!("[task-rejected] screen={screen} task={task} why={reason}"),
            EventKind::DrainCompleted => format!("[drained] screen={screen}"),
            EventKind::GraceExceeded => format!("[grace-exceeded] screen={screen} stuck={reason}"),
            EventKind::FocusSaved => format!("[focus-saved] screen={screen} cycle={cycle} {reason}"),
            EventKind::FocusRestored => format!("[focus-restored] screen={screen} cycle={cycle}"),
            EventKind::FocusFallback => format!("[focus-fallback] screen={screen} policy={reason}"),
            EventKind::FocusSkipped => format!("[focus-skipped] screen={screen} why={reason}"),
            EventKind::LayoutBuilt => format!("[layout-built] screen={screen} cycle={cycle}"),
            EventKind::LayoutBuildFailed => format!("[layout-failed] screen={screen} err={reason:?}"),
            EventKind::LayoutReleased => format!("[layout-released] screen={screen} cycle={cycle}"),
            EventKind::FocusLeaveRequested => format!(
                "[leave-focus] screen={screen} dir={:?} decision={reason}",
                e.direction
            ),
            EventKind::RebuildFocusRetention => format!("[rebuild] screen={screen} focus={reason}"),
            EventKind::ExternalLaunched => format!("[launched] screen={screen} package={task}"),
            EventKind::ExternalLaunchFailed => {
                format!("[launch-failed] screen={screen} package={task} err={reason:?}")
            }
            EventKind::SubscriberPanicked | EventKind::SubscriberOverflow => return None,
        };
        Some(line)
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        if let Some(line) = Self::line(e) {
            println!("{line}");
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}
