use std::any::Any;

use chrono::{DateTime, Utc};

use crate::{State, state_assign_impl};

/// Wall clock as seen by the UI.
///
/// Time-dependent logic reads this state instead of calling `Utc::now()`, so
/// tests can move time explicitly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Time {
    virt: DateTime<Utc>,
}

impl Time {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { virt: now }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.virt
    }

    pub fn set(&mut self, now: DateTime<Utc>) {
        self.virt = now;
    }
}

impl State for Time {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(*self))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
