use std::any::{Any, TypeId, type_name};
use std::fmt::{Debug, Formatter};

use flume::Sender;

use crate::State;

pub(crate) type Update = (TypeId, Box<dyn Any + Send>);

/// Send-safe handle commands use to publish values back to the `StateCtx`.
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
}

impl Debug for Updater {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updater")
            .field("pending", &self.send.len())
            .finish()
    }
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>) -> Self {
        Self { send }
    }

    /// Replaces the state `T` with `value`.
    pub fn set<T: State>(&self, value: T) {
        self.post::<T>(Box::new(value));
    }

    /// Posts `patch` to the state `T`; `T::assign_box` decides how to merge it.
    ///
    /// Use this when several commands write disjoint parts of the same state
    /// concurrently and a whole-value `set` would overwrite each other.
    pub fn apply<T: State, P: Any + Send>(&self, patch: P) {
        self.post::<T>(Box::new(patch));
    }

    fn post<T: State>(&self, value: Box<dyn Any + Send>) {
        if self.send.send((TypeId::of::<T>(), value)).is_err() {
            log::warn!(
                "StateCtx dropped before update for {} arrived",
                type_name::<T>()
            );
        }
    }
}
