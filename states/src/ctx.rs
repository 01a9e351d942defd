use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;

use flume::{Receiver, Sender};

use crate::updater::Update;
use crate::{Command, CommandFuture, CommandSnapshot, Compute, Error, State, Updater};

/// Owner of every registered state and compute.
///
/// Lives on the UI thread. Each frame the app calls [`StateCtx::sync_computes`]
/// before drawing to apply what commands posted.
pub struct StateCtx {
    storage: BTreeMap<TypeId, Box<dyn State>>,

    send: Sender<Update>,
    recv: Receiver<Update>,
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.storage.len())
            .field("pending_updates", &self.recv.len())
            .finish()
    }
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();

        Self {
            storage: BTreeMap::new(),
            send,
            recv,
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        self.storage.insert(TypeId::of::<T>(), Box::new(state));
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        self.storage.insert(TypeId::of::<T>(), Box::new(compute));
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.storage
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found(TypeId::of::<T>(), type_name::<T>()))
    }

    pub fn try_state_mut<T: State>(&mut self) -> Result<&mut T, Error> {
        self.storage
            .get_mut(&TypeId::of::<T>())
            .and_then(|boxed| boxed.as_any_mut().downcast_mut::<T>())
            .ok_or_else(|| Error::state_not_found(TypeId::of::<T>(), type_name::<T>()))
    }

    /// # Panics
    /// Panics if `T` was never registered.
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>()
            .unwrap_or_else(|_| panic!("State {} is not registered", type_name::<T>()))
    }

    /// # Panics
    /// Panics if `T` was never registered.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        self.try_state_mut::<T>()
            .unwrap_or_else(|_| panic!("State {} is not registered", type_name::<T>()))
    }

    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.try_state::<T>().ok()
    }

    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    /// Applies every value commands have posted so far.
    ///
    /// Returns `true` when at least one state changed.
    pub fn sync_computes(&mut self) -> bool {
        let mut changed = false;

        while let Ok((id, value)) = self.recv.try_recv() {
            match self.storage.get_mut(&id) {
                Some(state) => {
                    state.assign_box(value);
                    changed = true;
                }
                None => log::warn!("Dropped update for unregistered state {id:?}"),
            }
        }

        changed
    }

    /// Runs `C::default()` now, against a snapshot of the current states.
    pub fn dispatch<C: Command + Default>(&mut self) {
        self.dispatch_command(C::default());
    }

    pub fn dispatch_command(&mut self, command: impl Command) {
        let future = command.run(self.snapshot(), self.updater());
        spawn(future);
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::new();
        for (id, state) in &self.storage {
            if let Some(cloned) = state.snapshot() {
                snap.insert_cloned(*id, cloned);
            }
        }
        snap
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn(future: CommandFuture) {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(future);
        }
        Err(err) => log::error!("Command dropped, no tokio runtime: {err}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn spawn(future: CommandFuture) {
    wasm_bindgen_futures::spawn_local(future);
}
