//! # View lifecycle controller.
//!
//! [`ViewLifecycleController`] drives one screen through
//! `Detached → Attached → Active ⇄ Paused → Detached`, owns the screen's
//! [`TaskScope`] and mediates focus save/restore through [`FocusMemory`].
//!
//! ```text
//! attach(screen)   Weak<S> stored, memory cleared, cycle += 1, on_pre_attach
//! activate(focus)  scope.start(), settle focus ─► FocusOutcome
//! pause(focus)     memory.store(snapshot), state Paused, scope.cancel_all()
//! detach()         Weak dropped, on_post_detach, memory cleared
//! ```
//!
//! ## Rules
//! - The scope is active iff the state is `Active`.
//! - Focus memory never crosses an attach cycle.
//! - Transitions from the wrong state are contract violations: logged with
//!   `tracing::error!`, published as `ContractViolated`, returned as
//!   [`LifecycleError`] (or a panic with `strict_contracts`).
//! - The controller never keeps a destroyed screen alive.

use std::sync::{Arc, Weak};
use std::time::Duration;

use crate::{
    config::Config,
    error::{LifecycleError, RuntimeError},
    events::{Bus, Event, EventKind},
    focus::{FallbackPolicy, FocusCapability, FocusMemory, FocusOutcome},
    scope::{Completion, TaskRef, TaskScope},
    screen::{Screen, ViewModel},
};

use super::state::{LifecycleState, Transition};

/// Lifecycle state machine of one screen.
///
/// `S` is the host's screen type, `F` the focus target (usually the tile
/// layout) whose memory type is stored across pauses.
pub struct ViewLifecycleController<S: Screen + ?Sized, F: FocusCapability + ?Sized> {
    name: Arc<str>,
    state: LifecycleState,
    cycle: u64,
    screen: Option<Weak<S>>,
    view_model: Arc<dyn ViewModel>,
    scope: TaskScope,
    memory: FocusMemory<F::Memory>,
    policy: FallbackPolicy,
    strict: bool,
    grace: Duration,
    bus: Bus,
}

impl<S, F> ViewLifecycleController<S, F>
where
    S: Screen + ?Sized,
    F: FocusCapability + ?Sized,
{
    /// Creates a detached controller.
    pub fn new(
        name: impl Into<Arc<str>>,
        view_model: Arc<dyn ViewModel>,
        bus: Bus,
        cfg: &Config,
    ) -> Self {
        let name = name.into();
        Self {
            scope: TaskScope::new(Arc::clone(&name), bus.clone()),
            name,
            state: LifecycleState::Detached,
            cycle: 0,
            screen: None,
            view_model,
            memory: FocusMemory::new(),
            policy: cfg.fallback,
            strict: cfg.strict_contracts,
            grace: cfg.grace,
            bus,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Current attach cycle (0 before the first attach).
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// The attached screen, if it is still alive.
    pub fn screen(&self) -> Option<Arc<S>> {
        self.screen.as_ref().and_then(Weak::upgrade)
    }

    /// Remembered focus of the current cycle.
    pub fn focus_memory(&self) -> Option<&F::Memory> {
        self.memory.get()
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.policy
    }

    pub fn scope(&self) -> &TaskScope {
        &self.scope
    }

    /// True while the task scope runs.
    pub fn is_scope_active(&self) -> bool {
        self.scope.is_active()
    }

    /// Checks whether `op` is allowed now, without side effects.
    pub fn check(&self, op: Transition) -> Result<(), LifecycleError> {
        match self.state.next(op) {
            Some(_) => Ok(()),
            None if op == Transition::Activate && self.state == LifecycleState::Active => {
                Err(LifecycleError::AlreadyActive {
                    owner: self.name.to_string(),
                })
            }
            None => Err(LifecycleError::InvalidTransition {
                op,
                from: self.state,
            }),
        }
    }

    /// Begins a new attach cycle for `screen`.
    pub fn attach(&mut self, screen: &Arc<S>) -> Result<(), LifecycleError> {
        self.ensure(Transition::Attach)?;

        self.screen = Some(Arc::downgrade(screen));
        self.memory.clear();
        self.cycle += 1;
        self.state = LifecycleState::Attached;
        self.view_model.on_pre_attach();

        self.bus.publish(self.event(EventKind::ScreenAttached));
        Ok(())
    }

    /// Makes the screen visible: starts the task scope and settles focus.
    ///
    /// From `Active` this fails with [`LifecycleError::AlreadyActive`] and
    /// the running scope is left untouched.
    pub fn activate(&mut self, focus: Option<&mut F>) -> Result<FocusOutcome, LifecycleError> {
        self.ensure(Transition::Activate)?;
        if let Err(e) = self.scope.start() {
            return Err(self.violation(e));
        }
        self.state = LifecycleState::Active;

        Ok(self.settle_focus(focus))
    }

    /// Hides the screen: remembers focus, then cancels the task scope.
    ///
    /// The snapshot is stored unconditionally, so "nothing focused"
    /// overwrites an older memory.
    pub fn pause(&mut self, focus: Option<&F>) -> Result<(), LifecycleError> {
        self.ensure(Transition::Pause)?;

        let snapshot = FocusMemory::snapshot(focus);
        let saved = if snapshot.is_some() { "element" } else { "empty" };
        self.memory.store(snapshot);
        self.bus
            .publish(self.event(EventKind::FocusSaved).with_reason(saved));

        self.state = LifecycleState::Paused;
        self.scope.cancel_all();
        Ok(())
    }

    /// Ends the attach cycle.
    pub fn detach(&mut self) -> Result<(), LifecycleError> {
        self.ensure(Transition::Detach)?;

        self.screen = None;
        self.view_model.on_post_detach();
        self.memory.clear();
        self.scope.cancel_all();
        self.state = LifecycleState::Detached;

        self.bus.publish(self.event(EventKind::ScreenDetached));
        Ok(())
    }

    /// Re-settles focus after a data load replaced the focusable content.
    ///
    /// Only acts while `Active`; otherwise returns `Unavailable`.
    pub fn keep_focus_after_load(&self, focus: Option<&mut F>) -> FocusOutcome {
        if self.state != LifecycleState::Active {
            return FocusOutcome::Unavailable;
        }
        self.settle_focus(focus)
    }

    /// Schedules `task` under the screen's scope.
    ///
    /// While `Active`, a scope cancelled by one of its own tasks is rearmed
    /// first, so a visible screen can always schedule work.
    pub fn spawn(&mut self, task: TaskRef) -> bool {
        if self.state == LifecycleState::Active {
            self.scope.rearm();
        }
        self.scope.spawn(task)
    }

    /// Finished tasks of the current scope.
    pub fn drain_completions(&mut self) -> Vec<Completion> {
        self.scope.drain_completions()
    }

    /// Waits up to the configured grace for cancelled tasks to stop.
    pub async fn wait_drained(&mut self) -> Result<(), RuntimeError> {
        self.scope.wait_drained(self.grace).await
    }

    pub(crate) fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Event tagged with this screen and cycle.
    pub(crate) fn event(&self, kind: EventKind) -> Event {
        Event::new(kind)
            .with_screen(Arc::clone(&self.name))
            .with_cycle(self.cycle)
    }

    /// [`check`](Self::check) that reports a failure as a contract violation.
    pub(crate) fn ensure(&self, op: Transition) -> Result<(), LifecycleError> {
        self.check(op).map_err(|e| self.violation(e))
    }

    fn violation(&self, err: LifecycleError) -> LifecycleError {
        tracing::error!(
            screen = %self.name,
            state = %self.state,
            error = %err,
            "lifecycle contract violated"
        );
        self.bus.publish(
            self.event(EventKind::ContractViolated)
                .with_reason(err.to_string()),
        );
        if self.strict {
            panic!("{}: {err}", self.name);
        }
        err
    }

    fn settle_focus(&self, focus: Option<&mut F>) -> FocusOutcome {
        let outcome = self.resolve_focus(focus);
        let kind = match outcome {
            FocusOutcome::Restored => EventKind::FocusRestored,
            FocusOutcome::Nearest | FocusOutcome::First | FocusOutcome::Lost => {
                EventKind::FocusFallback
            }
            FocusOutcome::AlreadyFocused | FocusOutcome::Unavailable | FocusOutcome::NoTarget => {
                EventKind::FocusSkipped
            }
        };
        self.bus
            .publish(self.event(kind).with_reason(outcome.as_label()));
        outcome
    }

    fn resolve_focus(&self, focus: Option<&mut F>) -> FocusOutcome {
        let Some(screen) = self.screen() else {
            return FocusOutcome::Unavailable;
        };
        if !screen.is_focus_available() {
            return FocusOutcome::Unavailable;
        }
        let Some(target) = focus else {
            return FocusOutcome::NoTarget;
        };
        if screen.has_focus() || target.has_focus() {
            return FocusOutcome::AlreadyFocused;
        }
        self.policy.restore_or_fallback(target, self.memory.get())
    }
}

impl<S, F> std::fmt::Debug for ViewLifecycleController<S, F>
where
    S: Screen + ?Sized,
    F: FocusCapability + ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewLifecycleController")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("cycle", &self.cycle)
            .field("scope", &self.scope)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaskError;
    use crate::layout::{Area, RowsEngine, RowsLayout, TileLayoutEngine};
    use crate::scope::TaskFn;
    use crate::testing::{CountingViewModel, FakeScreen};
    use tokio_util::sync::CancellationToken;

    type Controller = ViewLifecycleController<FakeScreen, RowsLayout>;

    fn controller(bus: &Bus) -> (Controller, Arc<CountingViewModel>) {
        let vm = Arc::new(CountingViewModel::default());
        let c = Controller::new("home", vm.clone(), bus.clone(), &crate::testing::lenient());
        (c, vm)
    }

    fn rows(ids: &[u64]) -> RowsLayout {
        RowsEngine::new()
            .with_row(1, ids)
            .build(Area::new(1920, 1080))
            .expect("layout")
    }

    fn kinds(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<EventKind> {
        let mut out = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            out.push(ev.kind);
        }
        out
    }

    #[test]
    fn full_cycle_moves_through_states() {
        let bus = Bus::new(64);
        let (mut c, vm) = controller(&bus);
        let screen = Arc::new(FakeScreen::new());
        let mut layout = rows(&[10, 11]);

        c.attach(&screen).expect("attach");
        assert_eq!(c.state(), LifecycleState::Attached);
        assert_eq!(vm.attached(), 1);
        assert!(!c.is_scope_active());

        assert_eq!(c.activate(Some(&mut layout)), Ok(FocusOutcome::First));
        assert_eq!(c.state(), LifecycleState::Active);
        assert!(c.is_scope_active());

        c.pause(Some(&layout)).expect("pause");
        assert_eq!(c.state(), LifecycleState::Paused);
        assert!(!c.is_scope_active());

        c.detach().expect("detach");
        assert_eq!(c.state(), LifecycleState::Detached);
        assert_eq!(vm.detached(), 1);
        assert!(c.screen().is_none());
        assert!(c.focus_memory().is_none());
    }

    #[test]
    fn pause_then_activate_restores_exact_element() {
        let bus = Bus::new(64);
        let (mut c, _vm) = controller(&bus);
        let screen = Arc::new(FakeScreen::new());
        let mut layout = rows(&[10, 11, 12]);

        c.attach(&screen).expect("attach");
        c.activate(Some(&mut layout)).expect("activate");
        layout.focus_tile(12);
        c.pause(Some(&layout)).expect("pause");

        layout.clear_focus();
        assert_eq!(c.activate(Some(&mut layout)), Ok(FocusOutcome::Restored));
        assert_eq!(layout.focused_tile(), Some(12));
    }

    #[test]
    fn stale_memory_lands_on_first_tile() {
        let bus = Bus::new(64);
        let (mut c, _vm) = controller(&bus);
        let screen = Arc::new(FakeScreen::new());
        let mut layout = rows(&[10, 11, 12]);

        c.attach(&screen).expect("attach");
        c.activate(Some(&mut layout)).expect("activate");
        layout.focus_tile(11);
        c.pause(Some(&layout)).expect("pause");
        layout.remove_tile(11);

        let outcome = c.activate(Some(&mut layout)).expect("activate");
        assert!(matches!(outcome, FocusOutcome::Nearest | FocusOutcome::First));
        assert_eq!(layout.focused_tile(), Some(10));
    }

    #[test]
    fn pause_with_nothing_focused_overwrites_memory() {
        let bus = Bus::new(64);
        let (mut c, _vm) = controller(&bus);
        let screen = Arc::new(FakeScreen::new());
        let mut layout = rows(&[10, 11]);

        c.attach(&screen).expect("attach");
        c.activate(Some(&mut layout)).expect("activate");
        layout.focus_tile(11);
        c.pause(Some(&layout)).expect("pause");
        assert!(c.focus_memory().is_some());

        c.activate(Some(&mut layout)).expect("activate");
        layout.clear_focus();
        c.pause(Some(&layout)).expect("pause");
        assert!(c.focus_memory().is_none());
    }

    #[test]
    fn focus_already_held_is_not_touched() {
        let bus = Bus::new(64);
        let (mut c, _vm) = controller(&bus);
        let screen = Arc::new(FakeScreen::new());
        let mut layout = rows(&[10, 11]);

        c.attach(&screen).expect("attach");
        c.activate(Some(&mut layout)).expect("activate");
        layout.focus_tile(10);
        c.pause(Some(&layout)).expect("pause");

        layout.focus_tile(11);
        assert_eq!(c.activate(Some(&mut layout)), Ok(FocusOutcome::AlreadyFocused));
        assert_eq!(layout.focused_tile(), Some(11));
    }

    #[test]
    fn unavailable_screen_and_missing_target() {
        let bus = Bus::new(64);
        let (mut c, _vm) = controller(&bus);
        let screen = Arc::new(FakeScreen::new());

        c.attach(&screen).expect("attach");
        assert_eq!(c.activate(None), Ok(FocusOutcome::NoTarget));
        c.pause(None).expect("pause");

        screen.focus_available.set(false);
        let mut layout = rows(&[10]);
        assert_eq!(c.activate(Some(&mut layout)), Ok(FocusOutcome::Unavailable));
        assert!(!layout.has_focus());
    }

    #[test]
    fn dropped_screen_is_not_kept_alive() {
        let bus = Bus::new(64);
        let (mut c, _vm) = controller(&bus);
        let screen = Arc::new(FakeScreen::new());
        c.attach(&screen).expect("attach");
        drop(screen);

        assert!(c.screen().is_none());
        let mut layout = rows(&[10]);
        assert_eq!(c.activate(Some(&mut layout)), Ok(FocusOutcome::Unavailable));
    }

    #[test]
    fn wrong_order_is_a_contract_violation() {
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let (mut c, _vm) = controller(&bus);

        assert_eq!(
            c.pause(None),
            Err(LifecycleError::InvalidTransition {
                op: Transition::Pause,
                from: LifecycleState::Detached,
            })
        );
        assert_eq!(c.state(), LifecycleState::Detached);
        assert_eq!(kinds(&mut rx), vec![EventKind::ContractViolated]);
    }

    #[tokio::test]
    async fn double_activate_keeps_first_scope_running() {
        let bus = Bus::new(64);
        let (mut c, _vm) = controller(&bus);
        let screen = Arc::new(FakeScreen::new());
        c.attach(&screen).expect("attach");
        c.activate(None).expect("activate");

        let task: TaskRef = TaskFn::arc("poll", |ctx: CancellationToken| async move {
            ctx.cancelled().await;
            Err::<(), _>(TaskError::Canceled)
        });
        assert!(c.spawn(task));
        let generation = c.scope().generation();

        assert!(matches!(
            c.activate(None),
            Err(LifecycleError::AlreadyActive { .. })
        ));
        assert!(c.is_scope_active());
        assert_eq!(c.scope().generation(), generation);
        assert_eq!(c.scope().running(), vec!["poll".to_string()]);

        c.pause(None).expect("pause");
        assert_eq!(c.wait_drained().await, Ok(()));
    }

    #[tokio::test]
    async fn task_cancelling_its_scope_keeps_screen_schedulable() {
        let bus = Bus::new(64);
        let (mut c, _vm) = controller(&bus);
        let screen = Arc::new(FakeScreen::new());
        c.attach(&screen).expect("attach");
        c.activate(None).expect("activate");

        let token = c.scope().token().expect("token");
        let quit: TaskRef = TaskFn::arc("quit", move |_ctx: CancellationToken| {
            let token = token.clone();
            async move {
                token.cancel();
                Ok::<_, TaskError>(())
            }
        });
        assert!(c.spawn(quit));
        for _ in 0..100 {
            if c.scope().is_cancelled() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(c.scope().is_cancelled());
        assert_eq!(c.state(), LifecycleState::Active);
        assert!(c.is_scope_active());
        assert!(matches!(
            c.activate(None),
            Err(LifecycleError::AlreadyActive { .. })
        ));

        let poll: TaskRef = TaskFn::arc("poll", |ctx: CancellationToken| async move {
            ctx.cancelled().await;
            Err::<(), _>(TaskError::Canceled)
        });
        assert!(c.spawn(poll));
        assert_eq!(c.scope().generation(), 2);
        assert!(!c.scope().is_cancelled());
        assert_eq!(c.scope().running(), vec!["poll".to_string()]);

        c.pause(None).expect("pause");
        assert!(!c.is_scope_active());
        assert!(c.scope().running().is_empty());
        assert_eq!(c.wait_drained().await, Ok(()));
    }

    #[test]
    #[should_panic(expected = "cannot detach while active")]
    fn strict_contracts_panic() {
        let cfg = Config {
            strict_contracts: true,
            ..Config::default()
        };
        let mut c = Controller::new(
            "home",
            Arc::new(CountingViewModel::default()),
            Bus::new(8),
            &cfg,
        );
        let screen = Arc::new(FakeScreen::new());
        c.attach(&screen).expect("attach");
        c.activate(None).expect("activate");
        let _ = c.detach();
    }

    #[test]
    fn reattach_starts_clean_cycle() {
        let bus = Bus::new(64);
        let (mut c, vm) = controller(&bus);
        let screen = Arc::new(FakeScreen::new());
        let mut layout = rows(&[10, 11]);

        c.attach(&screen).expect("attach");
        c.activate(Some(&mut layout)).expect("activate");
        layout.focus_tile(11);
        c.pause(Some(&layout)).expect("pause");
        c.detach().expect("detach");

        let screen = Arc::new(FakeScreen::new());
        c.attach(&screen).expect("re-attach");
        assert_eq!(c.cycle(), 2);
        assert_eq!(vm.attached(), 2);
        assert!(c.focus_memory().is_none());
    }

    #[test]
    fn keep_focus_after_load_only_while_active() {
        let bus = Bus::new(64);
        let (mut c, _vm) = controller(&bus);
        let screen = Arc::new(FakeScreen::new());
        let mut layout = rows(&[10, 11]);

        c.attach(&screen).expect("attach");
        assert_eq!(
            c.keep_focus_after_load(Some(&mut layout)),
            FocusOutcome::Unavailable
        );

        c.activate(None).expect("activate");
        assert_eq!(c.keep_focus_after_load(Some(&mut layout)), FocusOutcome::First);
        assert_eq!(
            c.keep_focus_after_load(Some(&mut layout)),
            FocusOutcome::AlreadyFocused
        );
    }
}
