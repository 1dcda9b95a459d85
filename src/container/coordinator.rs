//! # Container coordinator.
//!
//! [`ContainerCoordinator`] is the lifecycle controller of a screen that
//! embeds a tile layout. It holds a [`ViewLifecycleController`] and adds the
//! layout's per-cycle ownership on top:
//!
//! ```text
//! attach(screen)
//!   ├─► controller.check(Attach)
//!   ├─► screen.display_area() ──► degenerate? ──► Err(DegenerateArea)
//!   ├─► engine.build(area)    ──► Err? ──────────► Err(Layout(..)), still Detached
//!   ├─► controller.attach(screen)
//!   └─► screen.mount_primary(view)                 publish LayoutBuilt
//!
//! dispatch_key(dir) ──► layout.move_focus(dir)
//!   Moved | Scrolled ──► Handled
//!   NoChange         ──► Unhandled
//!   WouldLeave       ──► hooks.on_leave_focus ──► Propagate | Handled
//!
//! detach()
//!   ├─► layout.release()
//!   ├─► engine.on_layout_released(&layout)
//!   ├─► screen.unmount_primary(view)               publish LayoutReleased
//!   ├─► layout = None
//!   └─► controller.detach()
//! ```
//!
//! One layout per attach cycle; it is never carried into the next one.
//! Dropping a coordinator that is still attached releases, notifies and
//! unmounts the layout the same way `detach()` does.

use std::sync::Arc;

use crate::{
    config::Config,
    error::{CoordinatorError, LaunchError, LayoutError},
    events::{Bus, EventKind},
    focus::FocusOutcome,
    launcher::{ExternalAppLauncher, LaunchRequest},
    layout::{Direction, LayoutSignal, MoveStatus, TileLayout, TileLayoutEngine},
    lifecycle::{LifecycleState, Transition, ViewLifecycleController},
    scope::{Completion, TaskRef},
    screen::{Screen, ViewModel},
};

use super::{
    hooks::{ContainerHooks, DefaultContainerHooks},
    host::HostEvent,
    slot::LayoutSlot,
};

/// Where a directional key ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRoute {
    /// Consumed inside the layout.
    Handled,
    /// Focus leaves the layout; the host should move it.
    Propagate,
    /// Nothing to act on.
    Unhandled,
}

/// Lifecycle controller of a screen hosting a tile layout.
pub struct ContainerCoordinator<E, S, H = DefaultContainerHooks>
where
    E: TileLayoutEngine,
    S: Screen + ?Sized,
{
    controller: ViewLifecycleController<S, E::Layout>,
    slot: LayoutSlot<E, S>,
    hooks: H,
    launcher: Option<Arc<dyn ExternalAppLauncher>>,
}

impl<E, S> ContainerCoordinator<E, S>
where
    E: TileLayoutEngine,
    S: Screen + ?Sized,
{
    /// Creates a detached coordinator with default hooks.
    pub fn new(
        name: impl Into<Arc<str>>,
        engine: E,
        view_model: Arc<dyn ViewModel>,
        bus: Bus,
        cfg: &Config,
    ) -> Self {
        Self {
            controller: ViewLifecycleController::new(name, view_model, bus, cfg),
            slot: LayoutSlot::new(engine),
            hooks: DefaultContainerHooks,
            launcher: None,
        }
    }
}

impl<E, S, H> ContainerCoordinator<E, S, H>
where
    E: TileLayoutEngine,
    S: Screen + ?Sized,
    H: ContainerHooks<E::Layout, S>,
{
    /// Replaces the hooks.
    pub fn with_hooks<H2>(self, hooks: H2) -> ContainerCoordinator<E, S, H2>
    where
        H2: ContainerHooks<E::Layout, S>,
    {
        ContainerCoordinator {
            controller: self.controller,
            slot: self.slot,
            hooks,
            launcher: self.launcher,
        }
    }

    /// Injects the platform launcher used by [`launch_external`](Self::launch_external).
    pub fn with_launcher(mut self, launcher: Arc<dyn ExternalAppLauncher>) -> Self {
        self.launcher = Some(launcher);
        self
    }

    pub fn controller(&self) -> &ViewLifecycleController<S, E::Layout> {
        &self.controller
    }

    pub fn state(&self) -> LifecycleState {
        self.controller.state()
    }

    /// The layout of the current cycle.
    pub fn layout(&self) -> Option<&E::Layout> {
        self.slot.layout()
    }

    pub fn layout_mut(&mut self) -> Option<&mut E::Layout> {
        self.slot.layout_mut()
    }

    pub fn engine(&self) -> &E {
        &self.slot.engine
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Builds and mounts the layout, then attaches the controller.
    ///
    /// On a layout failure nothing is attached and the state stays `Detached`.
    pub fn attach(&mut self, screen: &Arc<S>) -> Result<(), CoordinatorError> {
        self.controller.ensure(Transition::Attach)?;

        let area = screen.display_area();
        let built = if area.is_degenerate() {
            Err(LayoutError::DegenerateArea {
                width: area.width,
                height: area.height,
            })
        } else {
            self.slot.engine.build(area)
        };
        let layout = match built {
            Ok(layout) => layout,
            Err(e) => {
                self.controller.bus().publish(
                    self.controller
                        .event(EventKind::LayoutBuildFailed)
                        .with_reason(e.to_string()),
                );
                return Err(e.into());
            }
        };

        self.controller.attach(screen)?;
        let view = layout.view_id();
        let replaced = self.slot.mount(screen, layout);

        let reason = match replaced {
            Some(old) => format!("{view} {area} replaced {old}"),
            None => format!("{view} {area}"),
        };
        self.controller.bus().publish(
            self.controller
                .event(EventKind::LayoutBuilt)
                .with_reason(reason),
        );
        Ok(())
    }

    /// Activates the controller with the layout as focus target.
    pub fn activate(&mut self) -> Result<FocusOutcome, CoordinatorError> {
        Ok(self.controller.activate(self.slot.layout_mut())?)
    }

    /// Pauses the controller, remembering the layout's focus.
    pub fn pause(&mut self) -> Result<(), CoordinatorError> {
        Ok(self.controller.pause(self.slot.layout())?)
    }

    /// Releases and unmounts the layout, then detaches the controller.
    pub fn detach(&mut self) -> Result<(), CoordinatorError> {
        self.controller.ensure(Transition::Detach)?;

        if let Some(view) = self.slot.release() {
            self.controller.bus().publish(
                self.controller
                    .event(EventKind::LayoutReleased)
                    .with_reason(view.to_string()),
            );
        }

        Ok(self.controller.detach()?)
    }

    /// Maps a platform lifecycle callback onto a transition.
    ///
    /// Returns the focus outcome for `Resumed`, `None` otherwise.
    pub fn on_host_event(
        &mut self,
        event: HostEvent<S>,
    ) -> Result<Option<FocusOutcome>, CoordinatorError> {
        match event {
            HostEvent::ViewCreated(screen) => self.attach(&screen).map(|()| None),
            HostEvent::Resumed => self.activate().map(Some),
            HostEvent::Paused => self.pause().map(|()| None),
            HostEvent::ViewDestroyed => self.detach().map(|()| None),
        }
    }

    /// Routes a D-pad key into the layout.
    pub fn dispatch_key(&mut self, direction: Direction) -> KeyRoute {
        if self.controller.state() != LifecycleState::Active {
            return KeyRoute::Unhandled;
        }
        let Some(layout) = self.slot.layout_mut() else {
            return KeyRoute::Unhandled;
        };
        match layout.move_focus(direction) {
            MoveStatus::Moved | MoveStatus::Scrolled => KeyRoute::Handled,
            MoveStatus::NoChange => KeyRoute::Unhandled,
            MoveStatus::WouldLeave => {
                if self.leave_focus(direction) {
                    KeyRoute::Propagate
                } else {
                    KeyRoute::Handled
                }
            }
        }
    }

    /// Handles a notification from the layout engine.
    ///
    /// `FocusWouldLeave` returns whether the key propagates; `RebuildPending`
    /// returns whether focus is being held during the rebuild.
    pub fn on_layout_signal(&mut self, signal: LayoutSignal) -> bool {
        match signal {
            LayoutSignal::FocusWouldLeave(direction) => self.leave_focus(direction),
            LayoutSignal::RebuildPending => {
                let held = match self.controller.screen() {
                    Some(screen) => self.hooks.retain_focus_before_rebuild(&screen),
                    None => false,
                };
                self.controller.bus().publish(
                    self.controller
                        .event(EventKind::RebuildFocusRetention)
                        .with_reason(if held { "held" } else { "lost" }),
                );
                held
            }
        }
    }

    /// Re-settles focus in the layout after its content was reloaded.
    pub fn keep_focus_after_load(&mut self) -> FocusOutcome {
        self.controller.keep_focus_after_load(self.slot.layout_mut())
    }

    /// Schedules `task` under the screen's scope.
    pub fn spawn(&mut self, task: TaskRef) -> bool {
        self.controller.spawn(task)
    }

    /// Finished tasks of the current scope.
    pub fn drain_completions(&mut self) -> Vec<Completion> {
        self.controller.drain_completions()
    }

    /// Starts an external component through the injected launcher.
    pub fn launch_external(&self, request: &LaunchRequest) -> Result<(), LaunchError> {
        let result = match &self.launcher {
            Some(launcher) => launcher.launch(request),
            None => Err(LaunchError::NoLauncher),
        };
        let event = match &result {
            Ok(()) => self.controller.event(EventKind::ExternalLaunched),
            Err(e) => self
                .controller
                .event(EventKind::ExternalLaunchFailed)
                .with_reason(e.to_string()),
        };
        self.controller
            .bus()
            .publish(event.with_task(request.package()));
        result
    }

    fn leave_focus(&mut self, direction: Direction) -> bool {
        let propagate = match self.slot.layout_mut() {
            Some(layout) => self.hooks.on_leave_focus(direction, layout),
            None => true,
        };
        self.controller.bus().publish(
            self.controller
                .event(EventKind::FocusLeaveRequested)
                .with_direction(direction)
                .with_reason(if propagate { "propagate" } else { "consumed" }),
        );
        propagate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;
    use crate::focus::FocusCapability;
    use crate::layout::{Area, RowsEngine, RowsLayout, ViewId};
    use crate::testing::{CountingViewModel, FakeScreen};
    use std::sync::Mutex;

    type Coordinator<H = DefaultContainerHooks> = ContainerCoordinator<RowsEngine, FakeScreen, H>;

    fn engine() -> RowsEngine {
        RowsEngine::new()
            .with_row(1, &[10, 11, 12])
            .with_row(2, &[20, 21])
    }

    fn coordinator(bus: &Bus) -> Coordinator {
        Coordinator::new(
            "home",
            engine(),
            Arc::new(CountingViewModel::default()),
            bus.clone(),
            &crate::testing::lenient(),
        )
    }

    fn drain(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<Event> {
        let mut out = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            out.push(ev);
        }
        out
    }

    #[derive(Default)]
    struct KeepLeft {
        asked: Vec<Direction>,
    }

    impl ContainerHooks<RowsLayout, FakeScreen> for KeepLeft {
        fn on_leave_focus(&mut self, direction: Direction, _layout: &mut RowsLayout) -> bool {
            self.asked.push(direction);
            direction != Direction::Left
        }

        fn retain_focus_before_rebuild(&mut self, _screen: &FakeScreen) -> bool {
            false
        }
    }

    #[derive(Default)]
    struct FakeLauncher {
        launched: Mutex<Vec<String>>,
    }

    impl ExternalAppLauncher for FakeLauncher {
        fn launch(&self, request: &LaunchRequest) -> Result<(), LaunchError> {
            if request.package() == "missing" {
                return Err(LaunchError::NotInstalled {
                    package: request.package().to_string(),
                });
            }
            self.launched
                .lock()
                .expect("lock")
                .push(request.package().to_string());
            Ok(())
        }
    }

    #[test]
    fn attach_mounts_layout() {
        let bus = Bus::new(64);
        let mut c = coordinator(&bus);
        let screen = Arc::new(FakeScreen::new());

        c.attach(&screen).expect("attach");
        let view = c.layout().expect("layout").view_id();
        assert_eq!(screen.primary.get(), Some(view));
        assert_eq!(c.state(), LifecycleState::Attached);
    }

    #[test]
    fn degenerate_area_fails_before_attach() {
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let mut c = coordinator(&bus);
        let screen = Arc::new(FakeScreen::with_area(Area::new(0, 1080)));

        let err = c.attach(&screen).unwrap_err();
        assert_eq!(
            err,
            CoordinatorError::Layout(LayoutError::DegenerateArea {
                width: 0,
                height: 1080
            })
        );
        assert!(!err.is_contract_violation());
        assert_eq!(c.state(), LifecycleState::Detached);
        assert!(c.layout().is_none());
        assert_eq!(c.engine().built(), 0);
        assert_eq!(
            drain(&mut rx).iter().map(|e| e.kind).collect::<Vec<_>>(),
            vec![EventKind::LayoutBuildFailed]
        );
    }

    #[test]
    fn build_failure_propagates() {
        let bus = Bus::new(64);
        let mut c = Coordinator::new(
            "home",
            engine().with_tile_size(Area::new(4000, 100)),
            Arc::new(CountingViewModel::default()),
            bus,
            &Config::default(),
        );
        let screen = Arc::new(FakeScreen::new());
        assert!(matches!(
            c.attach(&screen),
            Err(CoordinatorError::Layout(LayoutError::BuildFailed { .. }))
        ));
        assert_eq!(c.state(), LifecycleState::Detached);
        assert!(screen.primary.get().is_none());
    }

    #[test]
    fn detach_from_attached_or_paused_leaves_nothing_behind() {
        for pause_first in [false, true] {
            let bus = Bus::new(64);
            let mut c = coordinator(&bus);
            let screen = Arc::new(FakeScreen::new());

            c.attach(&screen).expect("attach");
            let view = c.layout().expect("layout").view_id();
            if pause_first {
                c.activate().expect("activate");
                c.pause().expect("pause");
            }
            c.detach().expect("detach");

            assert!(c.layout().is_none());
            assert!(!c.controller().is_scope_active());
            assert_eq!(c.engine().released(), &[view]);
            assert_eq!(screen.primary.get(), None);
            assert_eq!(*screen.unmounted.borrow(), vec![view]);
        }
    }

    #[test]
    fn detach_while_active_is_rejected_and_keeps_layout() {
        let bus = Bus::new(64);
        let mut c = coordinator(&bus);
        let screen = Arc::new(FakeScreen::new());
        c.attach(&screen).expect("attach");
        c.activate().expect("activate");

        let err = c.detach().unwrap_err();
        assert!(err.is_contract_violation());
        assert!(c.layout().is_some());
        assert!(c.engine().released().is_empty());
    }

    struct SharedEngine {
        rows: RowsEngine,
        released: Arc<Mutex<Vec<ViewId>>>,
    }

    impl TileLayoutEngine for SharedEngine {
        type Layout = RowsLayout;

        fn build(&mut self, area: Area) -> Result<RowsLayout, LayoutError> {
            self.rows.build(area)
        }

        fn on_layout_released(&mut self, layout: &RowsLayout) {
            assert!(layout.is_released());
            self.released.lock().expect("lock").push(layout.view_id());
        }
    }

    #[test]
    fn dropping_attached_coordinator_releases_layout() {
        for activate in [false, true] {
            let released = Arc::new(Mutex::new(Vec::new()));
            let engine = SharedEngine {
                rows: engine(),
                released: Arc::clone(&released),
            };
            let mut c = ContainerCoordinator::<_, FakeScreen>::new(
                "home",
                engine,
                Arc::new(CountingViewModel::default()),
                Bus::new(64),
                &crate::testing::lenient(),
            );
            let screen = Arc::new(FakeScreen::new());
            c.attach(&screen).expect("attach");
            if activate {
                c.activate().expect("activate");
            }
            let view = c.layout().expect("layout").view_id();

            drop(c);
            assert_eq!(*released.lock().expect("lock"), vec![view]);
            assert_eq!(screen.primary.get(), None);
            assert_eq!(*screen.unmounted.borrow(), vec![view]);
        }
    }

    #[test]
    fn dropping_detached_coordinator_releases_nothing_twice() {
        let released = Arc::new(Mutex::new(Vec::new()));
        let engine = SharedEngine {
            rows: engine(),
            released: Arc::clone(&released),
        };
        let mut c = ContainerCoordinator::<_, FakeScreen>::new(
            "home",
            engine,
            Arc::new(CountingViewModel::default()),
            Bus::new(64),
            &crate::testing::lenient(),
        );
        let screen = Arc::new(FakeScreen::new());
        c.attach(&screen).expect("attach");
        c.detach().expect("detach");
        drop(c);
        assert_eq!(released.lock().expect("lock").len(), 1);
        assert_eq!(screen.unmounted.borrow().len(), 1);
    }

    #[test]
    fn each_cycle_gets_a_fresh_layout() {
        let bus = Bus::new(64);
        let mut c = coordinator(&bus);
        let screen = Arc::new(FakeScreen::new());

        c.attach(&screen).expect("attach");
        let first = c.layout().expect("layout").view_id();
        c.detach().expect("detach");
        c.attach(&screen).expect("attach");
        let second = c.layout().expect("layout").view_id();

        assert_ne!(first, second);
        assert_eq!(c.engine().built(), 2);
    }

    #[test]
    fn keys_move_inside_then_propagate() {
        let bus = Bus::new(64);
        let mut c = coordinator(&bus);
        let screen = Arc::new(FakeScreen::new());
        c.attach(&screen).expect("attach");
        assert_eq!(c.dispatch_key(Direction::Right), KeyRoute::Unhandled);

        c.activate().expect("activate");
        assert_eq!(c.dispatch_key(Direction::Right), KeyRoute::Handled);
        assert_eq!(c.layout().and_then(RowsLayout::focused_tile), Some(11));
        assert_eq!(c.dispatch_key(Direction::Up), KeyRoute::Propagate);
    }

    #[test]
    fn default_leave_focus_propagates_every_direction() {
        let bus = Bus::new(64);
        let mut c = coordinator(&bus);
        let screen = Arc::new(FakeScreen::new());
        c.attach(&screen).expect("attach");

        for direction in Direction::ALL {
            assert!(c.on_layout_signal(LayoutSignal::FocusWouldLeave(direction)));
        }
    }

    #[test]
    fn custom_hooks_can_consume_leave() {
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let mut c = coordinator(&bus).with_hooks(KeepLeft::default());
        let screen = Arc::new(FakeScreen::new());
        c.attach(&screen).expect("attach");
        c.activate().expect("activate");
        drain(&mut rx);

        assert_eq!(c.dispatch_key(Direction::Left), KeyRoute::Handled);
        assert_eq!(c.dispatch_key(Direction::Up), KeyRoute::Propagate);
        assert_eq!(c.hooks().asked, vec![Direction::Left, Direction::Up]);

        let leave: Vec<_> = drain(&mut rx)
            .into_iter()
            .filter(|e| e.kind == EventKind::FocusLeaveRequested)
            .map(|e| e.reason.as_deref().map(str::to_string))
            .collect();
        assert_eq!(
            leave,
            vec![Some("consumed".to_string()), Some("propagate".to_string())]
        );
    }

    #[test]
    fn rebuild_asks_screen_to_hold_focus() {
        let bus = Bus::new(64);
        let mut c = coordinator(&bus);
        let screen = Arc::new(FakeScreen::new());
        assert!(!c.on_layout_signal(LayoutSignal::RebuildPending));

        c.attach(&screen).expect("attach");
        assert!(c.on_layout_signal(LayoutSignal::RebuildPending));
        assert_eq!(screen.placeholder_holds.get(), 1);

        let mut c = c.with_hooks(KeepLeft::default());
        assert!(!c.on_layout_signal(LayoutSignal::RebuildPending));
        assert_eq!(screen.placeholder_holds.get(), 1);
        c.detach().expect("detach");
    }

    #[test]
    fn focus_survives_pause_and_reload() {
        let bus = Bus::new(64);
        let mut c = coordinator(&bus);
        let screen = Arc::new(FakeScreen::new());

        c.attach(&screen).expect("attach");
        assert_eq!(c.activate(), Ok(FocusOutcome::First));
        c.dispatch_key(Direction::Down);
        c.dispatch_key(Direction::Right);
        assert_eq!(c.layout().and_then(RowsLayout::focused_tile), Some(21));
        c.pause().expect("pause");

        let layout = c.layout_mut().expect("layout");
        layout.replace_rows(&[(1, &[10, 11]), (2, &[20, 22])]);
        layout.clear_focus();
        assert_eq!(c.activate(), Ok(FocusOutcome::Nearest));
        assert_eq!(c.layout().and_then(RowsLayout::focused_tile), Some(20));

        let layout = c.layout_mut().expect("layout");
        layout.replace_rows(&[(3, &[30])]);
        assert!(!layout.has_focus());
        assert_eq!(c.keep_focus_after_load(), FocusOutcome::First);
        assert_eq!(c.layout().and_then(RowsLayout::focused_tile), Some(30));
    }

    #[test]
    fn host_events_drive_transitions() {
        let bus = Bus::new(64);
        let mut c = coordinator(&bus);
        let screen = Arc::new(FakeScreen::new());

        assert_eq!(
            c.on_host_event(HostEvent::ViewCreated(Arc::clone(&screen))),
            Ok(None)
        );
        assert_eq!(
            c.on_host_event(HostEvent::Resumed),
            Ok(Some(FocusOutcome::First))
        );
        assert_eq!(c.on_host_event(HostEvent::Paused), Ok(None));
        assert_eq!(c.on_host_event(HostEvent::ViewDestroyed), Ok(None));
        assert_eq!(c.state(), LifecycleState::Detached);
        assert!(c.on_host_event(HostEvent::Paused).is_err());
    }

    #[test]
    fn launches_go_through_injected_launcher() {
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let c = coordinator(&bus);
        let req = LaunchRequest::new("tv.player");
        assert_eq!(c.launch_external(&req), Err(LaunchError::NoLauncher));

        let launcher = Arc::new(FakeLauncher::default());
        let c = c.with_launcher(launcher.clone());
        c.launch_external(&req).expect("launch");
        assert!(matches!(
            c.launch_external(&LaunchRequest::new("missing")),
            Err(LaunchError::NotInstalled { .. })
        ));
        assert_eq!(*launcher.launched.lock().expect("lock"), vec!["tv.player"]);

        let kinds: Vec<_> = drain(&mut rx).iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::ExternalLaunchFailed,
                EventKind::ExternalLaunched,
                EventKind::ExternalLaunchFailed
            ]
        );
    }
}
