use std::any::{Any, type_name};

/// A value stored in [`StateCtx`](crate::StateCtx), addressed by its concrete type.
///
/// UI code reads and mutates states on the UI thread. Commands never touch a
/// state directly: they receive a [`CommandSnapshot`](crate::CommandSnapshot)
/// and post new values back through an [`Updater`](crate::Updater).
pub trait State: Any + Send {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Clone handed to commands when they are dispatched.
    ///
    /// States returning `None` are not visible to commands.
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }

    /// Applies a value posted through an `Updater`.
    ///
    /// The default shape is "replace self"; see [`state_assign_impl`].
    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Replaces `this` with `new_self` when the posted value has the same type.
pub fn state_assign_impl<T: State>(this: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *this = *value,
        Err(_) => {
            log::warn!("Discarded update with mismatched type for {}", type_name::<T>());
        }
    }
}
