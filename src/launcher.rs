//! # External application launcher.
//!
//! Screens occasionally hand the user over to another application component
//! (a player, a settings app). The platform call is injected as an
//! [`ExternalAppLauncher`]; the core only builds a typed [`LaunchRequest`].
//!
//! ## Example
//! ```
//! use tilefocus::{LaunchExtra, LaunchRequest};
//!
//! let req = LaunchRequest::new("tv.player")
//!     .component("tv.player.PlaybackActivity")
//!     .clear_top(true)
//!     .extra("channel_id", LaunchExtra::Int(42))
//!     .extra("autoplay", LaunchExtra::Bool(true));
//!
//! assert_eq!(req.extras().get("channel_id"), Some(&LaunchExtra::Int(42)));
//! ```

use std::collections::BTreeMap;

use crate::error::LaunchError;

/// Typed payload value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchExtra {
    Bool(bool),
    Text(String),
    Int(i64),
}

/// Description of an external component to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    package: String,
    component: Option<String>,
    clear_top: bool,
    extras: BTreeMap<String, LaunchExtra>,
}

impl LaunchRequest {
    /// Request for the default entry point of `package`.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            component: None,
            clear_top: false,
            extras: BTreeMap::new(),
        }
    }

    /// Targets a specific component inside the package.
    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Clears the target's back stack above the launched component.
    pub fn clear_top(mut self, clear_top: bool) -> Self {
        self.clear_top = clear_top;
        self
    }

    /// Adds (or replaces) a payload value.
    pub fn extra(mut self, key: impl Into<String>, value: LaunchExtra) -> Self {
        self.extras.insert(key.into(), value);
        self
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn component_name(&self) -> Option<&str> {
        self.component.as_deref()
    }

    pub fn is_clear_top(&self) -> bool {
        self.clear_top
    }

    pub fn extras(&self) -> &BTreeMap<String, LaunchExtra> {
        &self.extras
    }
}

/// Platform hook that starts external components.
pub trait ExternalAppLauncher: Send + Sync {
    fn launch(&self, request: &LaunchRequest) -> Result<(), LaunchError>;
}
