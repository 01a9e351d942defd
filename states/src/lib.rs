//! State container shared by the business and UI layers.
//!
//! - [`State`]: a value owned by [`StateCtx`], read and mutated on the UI thread.
//! - [`Compute`]: a state the UI only reads; commands write it.
//! - [`Command`]: async side effects, fed a [`CommandSnapshot`] and publishing
//!   through an [`Updater`].

mod basic_state;
mod command;
mod compute;
mod ctx;
mod error;
mod snapshot;
mod state;
mod updater;

pub use basic_state::Time;
pub use command::{Command, CommandFuture};
pub use compute::Compute;
pub use ctx::StateCtx;
pub use error::Error;
pub use snapshot::CommandSnapshot;
pub use state::{State, state_assign_impl};
pub use updater::Updater;
