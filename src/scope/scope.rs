//! # Task scope bound to a screen's visible lifetime.
//!
//! [`TaskScope`] owns at most one active [`CancellationToken`]. Every task
//! spawned while the scope is active gets a child of that token; cancelling
//! the scope cancels all of them at once.
//!
//! ```text
//! start() ──► generation += 1, fresh token ──► publish ScopeStarted
//!   │
//!   ├─ spawn(task) ──► tokio::spawn(run_task(child token))
//!   │                         │
//!   │                         └─► Completion ──► drain_completions()
//!   │                                             (current generation only)
//!   ▼
//! cancel_all() ──► token.cancel() ──► publish ScopeCancelled
//!                       │
//!                       └─► handles move to draining ──► wait_drained(grace)
//! ```
//!
//! ## Rules
//! - `start()` fails with `AlreadyActive` while a scope runs.
//! - A scope cancelled by one of its own tasks stays present (`is_active()`)
//!   but rejects spawns until `rearm()`, `start()` or `cancel_all()`.
//! - `cancel_all()` is idempotent; with no scope it does nothing.
//! - `spawn()` never panics: without an active scope or a tokio runtime the
//!   task is rejected (`TaskRejected`) and `false` is returned.
//! - Completions of a cancelled generation are dropped, never returned.

use std::sync::Arc;
use std::time::Duration;

use tokio::{runtime::Handle, sync::mpsc, task::JoinHandle, time};
use tokio_util::sync::CancellationToken;

use crate::{
    error::{LifecycleError, RuntimeError},
    events::{Bus, Event, EventKind},
};

use super::{
    runner::{Completion, RunContext, run_task},
    task_fn::TaskRef,
};

struct Spawned {
    name: Arc<str>,
    handle: JoinHandle<()>,
}

struct ActiveScope {
    token: CancellationToken,
    generation: u64,
    tasks: Vec<Spawned>,
}

/// Cancellable group of tasks owned by one screen.
pub struct TaskScope {
    owner: Arc<str>,
    bus: Bus,
    generation: u64,
    active: Option<ActiveScope>,
    draining: Vec<Spawned>,
    done_tx: mpsc::UnboundedSender<Completion>,
    done_rx: mpsc::UnboundedReceiver<Completion>,
}

impl TaskScope {
    /// Creates an idle scope for `owner`.
    pub fn new(owner: impl Into<Arc<str>>, bus: Bus) -> Self {
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        Self {
            owner: owner.into(),
            bus,
            generation: 0,
            active: None,
            draining: Vec::new(),
            done_tx,
            done_rx,
        }
    }

    /// Starts a new scope.
    ///
    /// A scope whose token was cancelled from inside (by one of its tasks)
    /// counts as ended and is retired first.
    pub fn start(&mut self) -> Result<u64, LifecycleError> {
        if self.is_active() && !self.is_cancelled() {
            return Err(LifecycleError::AlreadyActive {
                owner: self.owner.to_string(),
            });
        }
        self.retire();

        self.generation += 1;
        self.active = Some(ActiveScope {
            token: CancellationToken::new(),
            generation: self.generation,
            tasks: Vec::new(),
        });
        self.bus.publish(self.event(EventKind::ScopeStarted));
        Ok(self.generation)
    }

    /// True from `start()` until `cancel_all()`, even if a task cancelled
    /// the token in between.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// True when the present scope was cancelled from inside.
    pub fn is_cancelled(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| a.token.is_cancelled())
    }

    /// Replaces a scope cancelled from inside with a fresh generation.
    ///
    /// Returns the new generation, or `None` when there was nothing to rearm.
    pub fn rearm(&mut self) -> Option<u64> {
        if !self.is_cancelled() {
            return None;
        }
        self.bus.publish(
            self.event(EventKind::ScopeCancelled)
                .with_reason("cancelled_by_task"),
        );
        self.start().ok()
    }

    /// Generation of the most recently started scope (0 before the first).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Token of the active scope.
    pub fn token(&self) -> Option<CancellationToken> {
        self.active
            .as_ref()
            .filter(|a| !a.token.is_cancelled())
            .map(|a| a.token.clone())
    }

    /// Schedules `task` under the active scope.
    ///
    /// Returns `false` (and publishes `TaskRejected`) when there is no active
    /// scope or no tokio runtime on the current thread.
    pub fn spawn(&mut self, task: TaskRef) -> bool {
        let reason = match &self.active {
            None => Some("scope_inactive"),
            Some(a) if a.token.is_cancelled() => Some("scope_cancelled"),
            Some(_) => None,
        };
        if let Some(reason) = reason {
            self.reject(&task, reason);
            return false;
        }
        let Ok(handle) = Handle::try_current() else {
            self.reject(&task, "no_runtime");
            return false;
        };

        let cx = RunContext {
            owner: Arc::clone(&self.owner),
            generation: self.generation,
            bus: self.bus.clone(),
            done: self.done_tx.clone(),
        };
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let name: Arc<str> = Arc::from(task.name());
        let child = active.token.child_token();

        active.tasks.retain(|s| !s.handle.is_finished());
        active.tasks.push(Spawned {
            name,
            handle: handle.spawn(run_task(task, child, cx)),
        });
        true
    }

    /// Cancels every task of the active scope.
    ///
    /// Idempotent and reentrant-safe; a no-op when no scope exists.
    pub fn cancel_all(&mut self) {
        if self.active.is_none() {
            return;
        }
        let was_live = !self.is_cancelled();
        self.retire();
        if was_live {
            self.bus.publish(self.event(EventKind::ScopeCancelled));
        }
    }

    /// Names of unfinished tasks in the active scope.
    pub fn running(&self) -> Vec<String> {
        self.active
            .iter()
            .flat_map(|a| a.tasks.iter())
            .filter(|s| !s.handle.is_finished())
            .map(|s| s.name.to_string())
            .collect()
    }

    /// Number of tasks of cancelled scopes that may still be running.
    pub fn draining(&self) -> usize {
        self.draining
            .iter()
            .filter(|s| !s.handle.is_finished())
            .count()
    }

    /// Returns completions of the active scope that arrived since the last call.
    ///
    /// Completions from cancelled generations are discarded.
    pub fn drain_completions(&mut self) -> Vec<Completion> {
        let live = self.token().map(|_| self.generation);
        let mut out = Vec::new();
        while let Ok(c) = self.done_rx.try_recv() {
            if Some(c.generation) == live {
                out.push(c);
            }
        }
        out
    }

    /// Waits for tasks of cancelled scopes to stop.
    ///
    /// Tasks still running after `grace` are aborted and reported as stuck.
    pub async fn wait_drained(&mut self, grace: Duration) -> Result<(), RuntimeError> {
        let deadline = time::Instant::now() + grace;
        let mut stuck = Vec::new();

        for mut spawned in self.draining.drain(..) {
            if time::timeout_at(deadline, &mut spawned.handle).await.is_err() {
                spawned.handle.abort();
                stuck.push(spawned.name.to_string());
            }
        }

        if stuck.is_empty() {
            self.bus.publish(self.event(EventKind::DrainCompleted));
            Ok(())
        } else {
            self.bus.publish(
                self.event(EventKind::GraceExceeded)
                    .with_reason(stuck.join(",")),
            );
            Err(RuntimeError::GraceExceeded { grace, stuck })
        }
    }

    fn retire(&mut self) {
        if let Some(active) = self.active.take() {
            active.token.cancel();
            self.draining.retain(|s| !s.handle.is_finished());
            self.draining.extend(active.tasks);
        }
    }

    fn reject(&self, task: &TaskRef, reason: &'static str) {
        self.bus.publish(
            Event::new(EventKind::TaskRejected)
                .with_screen(Arc::clone(&self.owner))
                .with_task(task.name())
                .with_reason(reason),
        );
    }

    fn event(&self, kind: EventKind) -> Event {
        Event::new(kind)
            .with_screen(Arc::clone(&self.owner))
            .with_cycle(self.generation)
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        if let Some(active) = &self.active {
            active.token.cancel();
        }
    }
}

impl std::fmt::Debug for TaskScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskScope")
            .field("owner", &self.owner)
            .field("generation", &self.generation)
            .field("active", &self.is_active())
            .field("draining", &self.draining.len())
            .finish()
    }
}
