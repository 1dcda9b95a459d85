use std::sync::Arc;

use crate::{config::Config, subscribers::Subscribe};

use super::runtime::LifecycleRuntime;

/// Builder for [`LifecycleRuntime`].
pub struct RuntimeBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl RuntimeBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers.
    ///
    /// Each subscriber gets a dedicated worker with a bounded queue.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Adds one subscriber.
    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Builds the runtime: bus, subscriber workers and the bus listener.
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self) -> LifecycleRuntime {
        LifecycleRuntime::start(self.cfg, self.subscribers)
    }
}
