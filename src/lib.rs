//! # tilefocus
//!
//! **tilefocus** is the screen-lifecycle layer of a tile-based TV client.
//!
//! It ties background work to the time a screen is visible, remembers which
//! tile had remote-control focus across pause/resume and rebuilds, and routes
//! D-pad keys between a screen and the tile layout embedded in it. Rendering,
//! networking and the layout engine itself are collaborators behind traits.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   host view system                                   tile-layout engine
//!  (created/resumed/paused/destroyed, D-pad keys)      (build / move / release)
//!            │                                                 ▲
//!            ▼                                                 │
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  ContainerCoordinator                                             │
//! │  - owns one TileLayout per attach cycle                           │
//! │  - routes keys and LayoutSignals to ContainerHooks                │
//! │  ┌─────────────────────────────────────────────────────────────┐  │
//! │  │  ViewLifecycleController (Detached/Attached/Active/Paused)  │  │
//! │  │  - Weak<Screen>, Arc<dyn ViewModel>                         │  │
//! │  │  - TaskScope   (CancellationToken per activation)           │  │
//! │  │  - FocusMemory (snapshot on pause, restore on activate)     │  │
//! │  └─────────────────────────────────────────────────────────────┘  │
//! └──────┬───────────────────────────────────┬────────────────────────┘
//!        │ publish(Event)                    │ tokio::spawn(run_task)
//!        ▼                                   ▼
//! ┌─────────────────────────────┐    ┌──────────────────────────┐
//! │  Bus (broadcast channel)    │◄───│ scoped tasks             │
//! │  (Config::bus_capacity)     │    │ TaskStarting/Stopped/... │
//! └──────────────┬──────────────┘    └────────────┬─────────────┘
//!                ▼                                │ Completion
//!     LifecycleRuntime listener                   ▼
//!                ▼                        drain_completions()
//!          SubscriberSet                  (control thread)
//!        ┌───────┼────────┐
//!        ▼       ▼        ▼
//!     Journal LogWriter  custom
//! ```
//!
//! ### Lifecycle
//! ```text
//! attach(screen) ──► Attached ──► activate() ──► Active ──► pause() ──► Paused
//!      ▲                │            ▲                                   │  │
//!      │                │            └───────────── activate() ──────────┘  │
//!      └── detach() ◄───┴─────────────────────────────── detach() ◄─────────┘
//!
//! activate: scope.start()  ─► settle focus
//!             screen gone / unavailable ─► Unavailable
//!             no layout                 ─► NoTarget
//!             something focused         ─► AlreadyFocused
//!             memory restores           ─► Restored
//!             FallbackPolicy            ─► Nearest | First | Lost
//! pause:    memory.store(snapshot) ─► scope.cancel_all()
//! detach:   release layout ─► engine.on_layout_released ─► unmount ─► clear
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                                  |
//! |-------------------|---------------------------------------------------------------|-----------------------------------------------------|
//! | **Lifecycle**     | Screen state machine with scoped tasks and focus memory.      | [`ViewLifecycleController`], [`LifecycleState`]     |
//! | **Containers**    | Per-cycle tile layout ownership and key routing.              | [`ContainerCoordinator`], [`ContainerHooks`]        |
//! | **Focus**         | Snapshot/restore with a default-focus policy.                 | [`FocusCapability`], [`FocusMemory`], [`FallbackPolicy`] |
//! | **Tasks**         | Cancellable background work bound to visibility.              | [`TaskScope`], [`Task`], [`TaskFn`]                 |
//! | **Layouts**       | Layout contract and an in-memory row engine.                  | [`TileLayoutEngine`], [`TileLayout`], [`RowsEngine`] |
//! | **Subscriber API**| Observe every transition and focus decision.                  | [`Subscribe`], [`Journal`]                          |
//! | **Errors**        | Contract violations vs. collaborator failures.                | [`LifecycleError`], [`LayoutError`], [`CoordinatorError`] |
//! | **Configuration** | Centralized knobs.                                            | [`Config`]                                          |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use tilefocus::{Config, Journal, LifecycleRuntime, RowsEngine, NoViewModel, Subscribe};
//! # use tilefocus::{Area, Screen, ViewId};
//! # struct Home;
//! # impl Screen for Home {
//! #     fn display_area(&self) -> Area { Area::new(1920, 1080) }
//! #     fn is_focus_available(&self) -> bool { true }
//! #     fn has_focus(&self) -> bool { false }
//! #     fn mount_primary(&self, _view: ViewId) -> Option<ViewId> { None }
//! # }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let journal = Arc::new(Journal::new());
//!     let rt = LifecycleRuntime::builder(Config::default())
//!         .with_subscribers(vec![journal.clone() as Arc<dyn Subscribe>])
//!         .build();
//!
//!     let engine = RowsEngine::new().with_row(1, &[10, 11, 12]);
//!     let mut home = rt.coordinator("home", engine, Arc::new(NoViewModel));
//!
//!     let screen = Arc::new(Home);
//!     home.attach(&screen)?;
//!     home.activate()?;
//!     home.pause()?;
//!     home.detach()?;
//!
//!     rt.shutdown().await;
//!     assert!(!journal.kinds().await.is_empty());
//!     Ok(())
//! }
//! ```
mod config;
mod container;
mod error;
mod events;
mod focus;
mod launcher;
mod layout;
mod lifecycle;
mod runtime;
mod scope;
mod screen;
mod subscribers;

#[cfg(test)]
mod testing;

// ---- Public re-exports ----

pub use config::Config;
pub use container::{ContainerCoordinator, ContainerHooks, DefaultContainerHooks, HostEvent, KeyRoute};
pub use error::{CoordinatorError, LaunchError, LayoutError, LifecycleError, RuntimeError, TaskError};
pub use events::{Bus, Event, EventKind};
pub use focus::{FallbackPolicy, FocusCapability, FocusMemory, FocusOutcome, NoFocus};
pub use launcher::{ExternalAppLauncher, LaunchExtra, LaunchRequest};
pub use layout::{
    Area, Direction, LayoutSignal, MoveStatus, RowsEngine, RowsFocus, RowsLayout, TileLayout,
    TileLayoutEngine, ViewId,
};
pub use lifecycle::{LifecycleState, Transition, ViewLifecycleController};
pub use runtime::{LifecycleRuntime, RuntimeBuilder};
pub use scope::{Completion, Task, TaskFn, TaskRef, TaskScope, checkpoint};
pub use screen::{NoViewModel, PlaceholderFocus, Screen, ViewModel};
pub use subscribers::{Journal, Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
