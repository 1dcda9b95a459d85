//! # Example: tv_screen
//!
//! Walks a home screen through one visit: created, resumed, browsing with
//! the D-pad, a background load, a trip to the player app, and back.
//!
//! ## Flow
//! ```text
//! ViewCreated ──► attach: build rows, mount layout
//! Resumed     ──► activate: scope started, focus on first tile
//!   D-pad     ──► dispatch_key ──► Handled | Propagate
//!   load task ──► Completion ──► replace rows ──► keep_focus_after_load
//!   launch    ──► ExternalAppLauncher
//! Paused      ──► pause: focus remembered, scope cancelled
//! Resumed     ──► activate: focus restored
//! Paused / ViewDestroyed ──► detach: layout released
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example tv_screen --features logging
//! ```

use std::cell::{Cell, RefCell};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use tilefocus::{
    Area, Config, Direction, ExternalAppLauncher, HostEvent, LaunchError, LaunchExtra,
    LaunchRequest, LayoutSignal, LifecycleRuntime, LogWriter, PlaceholderFocus, Screen, Subscribe,
    TaskError, TaskFn, TaskRef, ViewId, ViewModel,
};

struct HomeScreen {
    primary: Cell<Option<ViewId>>,
    placeholder: RefCell<PlaceholderFocus>,
}

impl Screen for HomeScreen {
    fn display_area(&self) -> Area {
        Area::new(1920, 1080)
    }

    fn is_focus_available(&self) -> bool {
        true
    }

    fn has_focus(&self) -> bool {
        false
    }

    fn mount_primary(&self, view: ViewId) -> Option<ViewId> {
        println!("[screen] mount {view}");
        self.primary.replace(Some(view))
    }

    fn unmount_primary(&self, view: ViewId) {
        println!("[screen] unmount {view}");
        self.primary.set(None);
    }

    fn hold_placeholder_focus(&self) -> bool {
        let now = Instant::now();
        let mut placeholder = self.placeholder.borrow_mut();
        placeholder.release_expired(now);
        placeholder.hold_at(now);
        placeholder.is_focusable_at(now)
    }
}

struct HomeViewModel;

impl ViewModel for HomeViewModel {
    fn on_pre_attach(&self) {
        println!("[view-model] bind");
    }

    fn on_post_detach(&self) {
        println!("[view-model] unbind");
    }
}

struct PrintLauncher;

impl ExternalAppLauncher for PrintLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<(), LaunchError> {
        println!(
            "[launcher] {} {:?} extras={:?}",
            request.package(),
            request.component_name(),
            request.extras()
        );
        Ok(())
    }
}

fn load_channels() -> TaskRef {
    TaskFn::arc("load-channels", |ctx: CancellationToken| async move {
        tokio::select! {
            _ = ctx.cancelled() => Err(TaskError::Canceled),
            _ = tokio::time::sleep(Duration::from_millis(150)) => Ok(()),
        }
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::default();
    let rt = LifecycleRuntime::builder(cfg)
        .with_subscribers(vec![Arc::new(LogWriter::new()) as Arc<dyn Subscribe>])
        .build();

    let engine = tilefocus::RowsEngine::new()
        .with_row(1, &[101, 102, 103, 104])
        .with_row(2, &[201, 202, 203]);
    let mut home = rt
        .coordinator("home", engine, Arc::new(HomeViewModel))
        .with_launcher(Arc::new(PrintLauncher));

    let screen = Arc::new(HomeScreen {
        primary: Cell::new(None),
        placeholder: RefCell::new(rt.placeholder()),
    });

    home.on_host_event(HostEvent::ViewCreated(Arc::clone(&screen)))?;
    let outcome = home.on_host_event(HostEvent::Resumed)?;
    println!("[host] resumed, focus {outcome:?}");

    home.spawn(load_channels());
    for direction in [Direction::Right, Direction::Right, Direction::Down, Direction::Up] {
        println!("[host] key {direction:?} -> {:?}", home.dispatch_key(direction));
    }

    tokio::time::sleep(Duration::from_millis(200)).await;
    for done in home.drain_completions() {
        println!("[host] {} finished: {:?}", done.task, done.result);
        home.on_layout_signal(LayoutSignal::RebuildPending);
        if let Some(layout) = home.layout_mut() {
            layout.replace_rows(&[(1, &[101, 102, 105]), (2, &[201, 202, 203, 204])]);
        }
        println!("[host] after reload, focus {:?}", home.keep_focus_after_load());
    }

    let play = LaunchRequest::new("tv.player")
        .component("tv.player.PlaybackActivity")
        .clear_top(true)
        .extra("channel_id", LaunchExtra::Int(102));
    home.launch_external(&play)?;

    home.on_host_event(HostEvent::Paused)?;
    let outcome = home.on_host_event(HostEvent::Resumed)?;
    println!("[host] back from player, focus {outcome:?}");

    home.on_host_event(HostEvent::Paused)?;
    home.on_host_event(HostEvent::ViewDestroyed)?;

    rt.shutdown().await;
    Ok(())
}
