use std::{future::Future, pin::Pin};

use crate::{CommandSnapshot, Updater};

/// Boxed future returned by [`Command::run`].
pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A manual-only unit of side-effecting work (network IO, timers).
///
/// Commands run off the UI loop. They read a snapshot of the states taken at
/// dispatch time and publish results with `updater`; the UI thread applies
/// those results on its next [`StateCtx::sync_computes`](crate::StateCtx::sync_computes).
pub trait Command: Send + 'static {
    fn run(&self, snap: CommandSnapshot, updater: Updater) -> CommandFuture;
}
