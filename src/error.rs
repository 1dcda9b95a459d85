//! Error types used by the lifecycle layer, its collaborators and scoped tasks.
//!
//! The taxonomy follows how a failure should be treated by the caller:
//!
//! - [`LifecycleError`] — contract violations (a transition called from the
//!   wrong state, a second activate). These are caller ordering bugs.
//! - [`LayoutError`] — collaborator failures while building the tile layout;
//!   reported to the screen host, never retried here.
//! - [`CoordinatorError`] — union of the two, returned by coordinator attach.
//! - [`TaskError`] — outcome of one scoped background task.
//! - [`RuntimeError`] — draining cancelled scopes exceeded its grace period.
//! - [`LaunchError`] — the injected external-app launcher failed.
//!
//! Expected absences (stale focus memory, no focusable element, a layout that
//! was already released) are not errors and have no variant here.
//!
//! Every enum provides `as_label()`, a short stable snake_case label for
//! logs and events.

use std::time::Duration;
use thiserror::Error;

use crate::lifecycle::{LifecycleState, Transition};

/// # Contract violations of the lifecycle state machine.
///
/// Returned when a transition is requested from a state that does not permit
/// it. The controller also logs these at `error` level and publishes
/// [`EventKind::ContractViolated`](crate::EventKind::ContractViolated);
/// with [`Config::strict_contracts`](crate::Config::strict_contracts) it
/// panics instead of returning.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// Transition requested from a state that does not allow it.
    #[error("cannot {op} while {from}")]
    InvalidTransition {
        /// The requested transition.
        op: Transition,
        /// State the controller was in.
        from: LifecycleState,
    },

    /// A task scope is already running for this owner.
    #[error("task scope already active for '{owner}'")]
    AlreadyActive {
        /// Name of the owning screen.
        owner: String,
    },
}

impl LifecycleError {
    /// Returns a short stable label (snake_case) for use in logs/events.
    ///
    /// # Example
    /// ```
    /// use tilefocus::LifecycleError;
    ///
    /// let err = LifecycleError::AlreadyActive { owner: "home".into() };
    /// assert_eq!(err.as_label(), "lifecycle_already_active");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            LifecycleError::InvalidTransition { .. } => "lifecycle_invalid_transition",
            LifecycleError::AlreadyActive { .. } => "lifecycle_already_active",
        }
    }
}

/// # Failures of the tile-layout collaborator.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The host reported a zero-sized display area.
    #[error("degenerate display area {width}x{height}")]
    DegenerateArea {
        /// Reported width.
        width: u32,
        /// Reported height.
        height: u32,
    },

    /// The engine could not construct the layout.
    #[error("layout build failed: {reason}")]
    BuildFailed {
        /// Engine-provided reason.
        reason: String,
    },
}

impl LayoutError {
    /// Returns a short stable label (snake_case) for use in logs/events.
    pub fn as_label(&self) -> &'static str {
        match self {
            LayoutError::DegenerateArea { .. } => "layout_degenerate_area",
            LayoutError::BuildFailed { .. } => "layout_build_failed",
        }
    }
}

/// # Errors returned by [`ContainerCoordinator`](crate::ContainerCoordinator) transitions.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinatorError {
    /// Contract violation of the underlying controller.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// The tile layout could not be built.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

impl CoordinatorError {
    /// Returns a short stable label (snake_case) for use in logs/events.
    pub fn as_label(&self) -> &'static str {
        match self {
            CoordinatorError::Lifecycle(e) => e.as_label(),
            CoordinatorError::Layout(e) => e.as_label(),
        }
    }

    /// True for caller ordering bugs, false for collaborator failures.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, CoordinatorError::Lifecycle(_))
    }
}

/// # Outcome of a scoped background task.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Task failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Task observed cancellation of its scope and stopped.
    #[error("scope cancelled")]
    Canceled,
}

impl TaskError {
    /// Returns a short stable label (snake_case) for use in logs/events.
    ///
    /// # Example
    /// ```
    /// use tilefocus::TaskError;
    ///
    /// assert_eq!(TaskError::Canceled.as_label(), "task_canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Canceled => "task_canceled",
        }
    }

    /// Convenience constructor for [`TaskError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        TaskError::Fail {
            error: error.into(),
        }
    }
}

/// # Errors raised while draining cancelled scopes.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Some tasks did not observe cancellation within the grace period.
    #[error("drain timeout {grace:?} exceeded; stuck: {stuck:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Names of tasks that were still running.
        stuck: Vec<String>,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/events.
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }
}

/// # Errors from the injected [`ExternalAppLauncher`](crate::ExternalAppLauncher).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaunchError {
    /// No launcher was injected into the coordinator.
    #[error("no external launcher configured")]
    NoLauncher,

    /// The target package is not installed.
    #[error("package '{package}' is not installed")]
    NotInstalled {
        /// Requested package.
        package: String,
    },

    /// The platform refused or failed the launch.
    #[error("launch failed: {reason}")]
    Failed {
        /// Platform-provided reason.
        reason: String,
    },
}

impl LaunchError {
    /// Returns a short stable label (snake_case) for use in logs/events.
    pub fn as_label(&self) -> &'static str {
        match self {
            LaunchError::NoLauncher => "launch_no_launcher",
            LaunchError::NotInstalled { .. } => "launch_not_installed",
            LaunchError::Failed { .. } => "launch_failed",
        }
    }
}
