use std::any::Any;

use chrono::{DateTime, TimeDelta, Utc};
use roster_states::{State, state_assign_impl};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub message: String,
    pub severity: Severity,
}

impl Popup {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// The one status message currently on screen.
///
/// Showing a popup replaces whatever was there. Expiry is measured against
/// the `Time` state so tests can move the clock.
#[derive(Debug, Clone)]
pub struct Toasts {
    current: Option<(Popup, DateTime<Utc>)>,
    ttl: TimeDelta,
}

impl Toasts {
    pub fn new(ttl: TimeDelta) -> Self {
        Self { current: None, ttl }
    }

    pub fn show(&mut self, popup: Popup, now: DateTime<Utc>) {
        log::debug!("toast ({:?}): {}", popup.severity, popup.message);
        self.current = Some((popup, now + self.ttl));
    }

    /// The popup to render at `now`, if it has not expired.
    pub fn current(&self, now: DateTime<Utc>) -> Option<&Popup> {
        self.current
            .as_ref()
            .filter(|(_, expires_at)| now < *expires_at)
            .map(|(popup, _)| popup)
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Drops an expired popup. Returns `true` if one was removed.
    pub fn prune(&mut self, now: DateTime<Utc>) -> bool {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|(_, expires_at)| now >= *expires_at);
        if expired {
            self.current = None;
        }
        expired
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(TimeDelta::seconds(4))
    }
}

impl State for Toasts {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
