use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;

use crate::{Error, State};

/// Clones of the snapshot-able states, taken when a command is dispatched.
#[derive(Default)]
pub struct CommandSnapshot {
    inner: BTreeMap<TypeId, Box<dyn Any + Send>>,
}

impl std::fmt::Debug for CommandSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSnapshot")
            .field("states", &self.inner.len())
            .finish()
    }
}

impl CommandSnapshot {
    pub fn new() -> Self {
        Self {
            inner: BTreeMap::new(),
        }
    }

    pub fn insert_cloned(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.inner.insert(id, value);
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.inner
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found(TypeId::of::<T>(), type_name::<T>()))
    }

    /// Panics when `T` was not registered or does not provide a snapshot.
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>()
            .unwrap_or_else(|_| panic!("State snapshot for {} is missing", type_name::<T>()))
    }
}
