//! Business layer of the roster admin console.
//!
//! Domain types, API calls, computes and commands. No egui here: the UI crate
//! reads computes through `StateCtx::cached` and starts work through the
//! functions re-exported below.

mod action_state;
mod config;
mod toast;

pub mod bulk_add;
pub mod http;
pub mod users;

use chrono::Utc;
use roster_states::{StateCtx, Time};

pub use action_state::AsyncActionState;
pub use bulk_add::{
    BulkAddCommand, BulkAddCompute, BulkAddForm, EmailValidationError, settle_bulk_add,
    submit_bulk_add, validate_emails,
};
pub use config::BusinessConfig;
pub use http::{HttpError, HttpResult};
pub use toast::{Popup, Severity, Toasts};
pub use users::{
    ApiError, ApiResult, ControlKey, ControlSlot, PageDescriptor, RefreshUsersCommand,
    User, UserActionCommand, UserActionKind, UserActionsCompute, UserRole, UserRow, UserStatus,
    UsersListCompute, UsersListInput, change_page, ensure_users_loaded, refresh_users,
    settle_user_actions, trigger_user_action, user_rows,
};

/// Registers every state and compute this crate reads or writes.
pub fn register_states(ctx: &mut StateCtx, config: BusinessConfig) {
    ctx.add_state(Toasts::new(config.toast_ttl()));
    ctx.add_state(config);
    ctx.add_state(UsersListInput::default());
    ctx.add_state(BulkAddForm::default());

    ctx.record_compute(UsersListCompute::default());
    ctx.record_compute(UserActionsCompute::default());
    ctx.record_compute(BulkAddCompute::default());

    if ctx.try_state::<Time>().is_err() {
        ctx.add_state(Time::new(Utc::now()));
    }
}

/// Consumes settled requests: toasts, form resets, list refreshes and expired
/// toasts. Call once per frame after `StateCtx::sync_computes`.
pub fn settle(ctx: &mut StateCtx) {
    settle_user_actions(ctx);
    settle_bulk_add(ctx);

    let now = ctx.state::<Time>().now();
    ctx.state_mut::<Toasts>().prune(now);
}
