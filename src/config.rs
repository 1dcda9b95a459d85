//! # Global lifecycle configuration.
//!
//! Provides [`Config`], centralized settings shared by every controller and
//! coordinator created from one [`LifecycleRuntime`](crate::LifecycleRuntime).
//!
//! ## Sentinel values
//! - `bus_capacity = 0` → clamped to 1 by [`Config::bus_capacity_clamped`]
//! - `grace = 0s` → draining does not wait; unfinished tasks are reported stuck

use std::time::Duration;

use crate::focus::FallbackPolicy;

/// Global configuration for the lifecycle layer.
///
/// ## Field semantics
/// - `bus_capacity`: Event bus ring buffer size (min 1)
/// - `grace`: How long [`TaskScope::wait_drained`](crate::TaskScope::wait_drained)
///   waits for cancelled tasks to stop
/// - `fallback`: Default-focus policy when remembered focus cannot be restored
/// - `strict_contracts`: Panic on contract violations instead of returning errors
///   (on by default in debug builds)
/// - `placeholder_hold`: How long a placeholder keeps focus during a rebuild
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Receivers lagging more than `bus_capacity` events skip older items.
    pub bus_capacity: usize,

    /// Maximum time to wait for tasks of cancelled scopes to stop.
    pub grace: Duration,

    /// Policy applied when focus memory is missing or stale.
    pub fallback: FallbackPolicy,

    /// Turn contract violations into panics.
    ///
    /// Violations are always logged and published; this only decides whether
    /// the caller gets an `Err` back or the thread unwinds.
    pub strict_contracts: bool,

    /// Focusable window of the rebuild placeholder.
    pub placeholder_hold: Duration,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `bus_capacity = 1024`
    /// - `grace = 5s`
    /// - `fallback = FallbackPolicy::NearestThenFirst`
    /// - `strict_contracts = cfg!(debug_assertions)`
    /// - `placeholder_hold = 300ms`
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            grace: Duration::from_secs(5),
            fallback: FallbackPolicy::default(),
            strict_contracts: cfg!(debug_assertions),
            placeholder_hold: Duration::from_millis(300),
        }
    }
}
