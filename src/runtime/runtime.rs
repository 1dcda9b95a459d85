//! # Lifecycle runtime: bus, subscribers, and factories.
//!
//! ```text
//! LifecycleRuntime::builder(cfg).with_subscribers(subs).build()
//!     ├─► Bus::new(cfg.bus_capacity_clamped())
//!     ├─► SubscriberSet::new(subs)        one worker per subscriber
//!     └─► listener: Bus.subscribe() ─► SubscriberSet::emit(&Event)
//!
//! runtime.coordinator(name, engine, vm) ─► ContainerCoordinator (bus + cfg wired)
//! runtime.controller(name, vm)          ─► ViewLifecycleController
//!
//! shutdown()
//!     ├─► stop listener (after forwarding what is already on the bus)
//!     └─► SubscriberSet::shutdown()  workers finish their queues
//! ```

use std::sync::Arc;

use tokio::{sync::broadcast::error::RecvError, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    container::ContainerCoordinator,
    events::{Bus, Event},
    focus::FocusCapability,
    layout::TileLayoutEngine,
    lifecycle::ViewLifecycleController,
    screen::{PlaceholderFocus, Screen, ViewModel},
    subscribers::{Subscribe, SubscriberSet},
};

use super::builder::RuntimeBuilder;

/// Owns the event plumbing shared by all screens of one application.
pub struct LifecycleRuntime {
    cfg: Config,
    bus: Bus,
    subs: Arc<SubscriberSet>,
    listener: JoinHandle<()>,
    token: CancellationToken,
}

impl LifecycleRuntime {
    /// Starts building a runtime.
    pub fn builder(cfg: Config) -> RuntimeBuilder {
        RuntimeBuilder::new(cfg)
    }

    pub(super) fn start(cfg: Config, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(subscribers, bus.clone()));
        let token = CancellationToken::new();

        // Subscribe before spawning so nothing published after build() is missed.
        let rx = bus.subscribe();
        let listener = tokio::spawn(listen(rx, Arc::clone(&subs), token.clone()));

        Self {
            cfg,
            bus,
            subs,
            listener,
            token,
        }
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Number of registered subscribers.
    pub fn subscribers(&self) -> usize {
        self.subs.len()
    }

    /// Creates a detached controller wired to this runtime.
    pub fn controller<S, F>(
        &self,
        name: impl Into<Arc<str>>,
        view_model: Arc<dyn ViewModel>,
    ) -> ViewLifecycleController<S, F>
    where
        S: Screen + ?Sized,
        F: FocusCapability + ?Sized,
    {
        ViewLifecycleController::new(name, view_model, self.bus.clone(), &self.cfg)
    }

    /// Creates a detached coordinator wired to this runtime.
    pub fn coordinator<E, S>(
        &self,
        name: impl Into<Arc<str>>,
        engine: E,
        view_model: Arc<dyn ViewModel>,
    ) -> ContainerCoordinator<E, S>
    where
        E: TileLayoutEngine,
        S: Screen + ?Sized,
    {
        ContainerCoordinator::new(name, engine, view_model, self.bus.clone(), &self.cfg)
    }

    /// Placeholder sized with the configured hold window.
    pub fn placeholder(&self) -> PlaceholderFocus {
        PlaceholderFocus::new(self.cfg.placeholder_hold)
    }

    /// Stops the listener and lets subscribers finish their queues.
    pub async fn shutdown(self) {
        self.token.cancel();
        let _ = self.listener.await;
        if let Ok(subs) = Arc::try_unwrap(self.subs) {
            subs.shutdown().await;
        }
    }
}

async fn listen(
    mut rx: tokio::sync::broadcast::Receiver<Event>,
    subs: Arc<SubscriberSet>,
    token: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            res = rx.recv() => match res {
                Ok(ev) => subs.emit(&ev),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => return,
            },
            _ = token.cancelled() => break,
        }
    }
    while let Ok(ev) = rx.try_recv() {
        subs.emit(&ev);
    }
}
