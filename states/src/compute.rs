use crate::State;

/// Marker for compute-shaped caches.
///
/// A compute is a `State` that UI code only reads (via
/// [`StateCtx::cached`](crate::StateCtx::cached)); its value is written by
/// commands posting through an `Updater`. Network IO never happens inside a
/// compute.
pub trait Compute: State {}
