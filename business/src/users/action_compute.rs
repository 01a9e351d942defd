//! Per-control user actions: promote/demote, activate/deactivate, uninvite.
//!
//! Every control on every row owns an independent [`AsyncActionState`], keyed
//! by `(email, slot)`:
//!
//! - UI calls [`trigger_user_action`]; the control turns `Pending` in the same
//!   frame and a [`UserActionCommand`] is dispatched.
//! - The command posts a [`UserActionSettled`] patch to [`UserActionsCompute`].
//! - Each frame [`settle_user_actions`] consumes settled controls once: toast,
//!   list refresh on success, control back to `Idle`.

use std::any::Any;
use std::collections::BTreeMap;

use chrono::Utc;
use roster_states::{
    Command, CommandFuture, CommandSnapshot, Compute, State, StateCtx, Time, Updater,
    state_assign_impl,
};
use ustr::Ustr;

use crate::action_state::AsyncActionState;
use crate::config::BusinessConfig;
use crate::toast::{Popup, Toasts};
use crate::users::api::{self as users_api, ApiResult};
use crate::users::list_users_compute::refresh_users;
use crate::users::model::{UserRole, UserStatus};

/// Which of a row's controls an action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ControlSlot {
    Role,
    Access,
    Invite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlKey {
    pub email: Ustr,
    pub slot: ControlSlot,
}

impl ControlKey {
    pub fn new(email: impl AsRef<str>, slot: ControlSlot) -> Self {
        Self {
            email: Ustr::from(email.as_ref()),
            slot,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserActionKind {
    Promote,
    Demote,
    Deactivate,
    Activate,
    Uninvite,
}

impl UserActionKind {
    /// Admins can only be demoted, everyone else only promoted.
    pub fn for_role(role: UserRole) -> Self {
        if role.is_admin() {
            Self::Demote
        } else {
            Self::Promote
        }
    }

    pub fn for_status(status: UserStatus) -> Self {
        if status.is_active() {
            Self::Deactivate
        } else {
            Self::Activate
        }
    }

    pub fn slot(self) -> ControlSlot {
        match self {
            Self::Promote | Self::Demote => ControlSlot::Role,
            Self::Deactivate | Self::Activate => ControlSlot::Access,
            Self::Uninvite => ControlSlot::Invite,
        }
    }

    /// Button text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Promote => "Promote to Admin User",
            Self::Demote => "Demote to Basic User",
            Self::Deactivate => "Deactivate Access",
            Self::Activate => "Activate Access",
            Self::Uninvite => "Uninvite",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            Self::Promote => "User promoted to admin user!",
            Self::Demote => "Admin demoted to basic user!",
            Self::Deactivate => "User deactivated!",
            Self::Activate => "User activated!",
            Self::Uninvite => "User uninvited!",
        }
    }

    pub fn failure_message(self, server_message: &str) -> String {
        let action = match self {
            Self::Promote => "promote user",
            Self::Demote => "demote admin user",
            Self::Deactivate => "deactivate user",
            Self::Activate => "activate user",
            Self::Uninvite => "uninvite user",
        };
        format!("Unable to {action} - {server_message}")
    }

    async fn call(self, api_base_url: &str, email: &str) -> ApiResult<()> {
        match self {
            Self::Promote => users_api::promote_user(api_base_url, email).await,
            Self::Demote => users_api::demote_user(api_base_url, email).await,
            Self::Deactivate => users_api::deactivate_user(api_base_url, email).await,
            Self::Activate => users_api::activate_user(api_base_url, email).await,
            Self::Uninvite => users_api::remove_invited_user(api_base_url, email).await,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub kind: UserActionKind,
    pub state: AsyncActionState<()>,
}

/// A control's request finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserActionSettled {
    pub key: ControlKey,
    pub kind: UserActionKind,
    pub result: Result<(), String>,
}

/// Async state of every row control that is not idle.
#[derive(Debug, Clone, Default)]
pub struct UserActionsCompute {
    controls: BTreeMap<ControlKey, ControlState>,
}

impl UserActionsCompute {
    pub fn control(&self, key: &ControlKey) -> Option<&ControlState> {
        self.controls.get(key)
    }

    pub fn is_in_flight(&self, key: &ControlKey) -> bool {
        self.controls
            .get(key)
            .is_some_and(|control| control.state.is_pending())
    }

    pub fn in_flight_count(&self) -> usize {
        self.controls
            .values()
            .filter(|control| control.state.is_pending())
            .count()
    }

    /// Marks the control pending. `false` if it already is.
    pub fn begin(&mut self, kind: UserActionKind, email: &str) -> bool {
        let key = ControlKey::new(email, kind.slot());
        let control = self.controls.entry(key).or_insert(ControlState {
            kind,
            state: AsyncActionState::Idle,
        });

        if !control.state.begin() {
            return false;
        }
        control.kind = kind;
        true
    }

    pub fn settle(&mut self, settled: UserActionSettled) {
        let control = self.controls.entry(settled.key).or_insert(ControlState {
            kind: settled.kind,
            state: AsyncActionState::Pending,
        });
        control.kind = settled.kind;
        control.state.settle(settled.result);
    }

    /// Removes and returns every settled control, leaving them idle.
    pub fn take_settled(&mut self) -> Vec<UserActionSettled> {
        let mut settled = Vec::new();
        self.controls.retain(|key, control| {
            match control.state.take_settled() {
                Some(result) => {
                    settled.push(UserActionSettled {
                        key: *key,
                        kind: control.kind,
                        result,
                    });
                    false
                }
                None => !control.state.is_idle(),
            }
        });
        settled
    }
}

impl State for UserActionsCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    /// Accepts a [`UserActionSettled`] patch or a whole replacement.
    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        match new_self.downcast::<UserActionSettled>() {
            Ok(settled) => self.settle(*settled),
            Err(other) => state_assign_impl(self, other),
        }
    }
}

impl Compute for UserActionsCompute {}

/// Runs one row action against the API.
#[derive(Debug, Clone)]
pub struct UserActionCommand {
    pub kind: UserActionKind,
    pub email: Ustr,
}

impl Command for UserActionCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater) -> CommandFuture {
        let kind = self.kind;
        let email = self.email;
        let key = ControlKey {
            email,
            slot: kind.slot(),
        };
        let api_base_url = snap
            .try_state::<BusinessConfig>()
            .map(|config| config.api_url().as_str().to_owned());

        Box::pin(async move {
            let result = match api_base_url {
                Ok(api_base_url) => {
                    log::info!("{kind:?} {email}");
                    kind.call(&api_base_url, email.as_str())
                        .await
                        .map_err(|err| err.to_string())
                }
                Err(err) => Err(err.to_string()),
            };

            if let Err(message) = &result {
                log::warn!("{kind:?} {email} failed: {message}");
            }

            updater.apply::<UserActionsCompute, _>(UserActionSettled { key, kind, result });
        })
    }
}

/// Starts `kind` for `email` unless that control is already in flight.
///
/// Returns `false` when the click was suppressed.
pub fn trigger_user_action(ctx: &mut StateCtx, kind: UserActionKind, email: &str) -> bool {
    if !ctx.state_mut::<UserActionsCompute>().begin(kind, email) {
        log::debug!("{kind:?} {email} ignored, already in flight");
        return false;
    }

    ctx.dispatch_command(UserActionCommand {
        kind,
        email: Ustr::from(email),
    });
    true
}

/// Turns settled controls into toasts, refreshing the list after any success.
///
/// Returns how many controls were settled.
pub fn settle_user_actions(ctx: &mut StateCtx) -> usize {
    let settled = ctx.state_mut::<UserActionsCompute>().take_settled();
    if settled.is_empty() {
        return 0;
    }

    let now = ctx
        .try_state::<Time>()
        .map(Time::now)
        .unwrap_or_else(|_| Utc::now());
    let mut refresh = false;

    for UserActionSettled { kind, result, .. } in &settled {
        let popup = match result {
            Ok(()) => {
                refresh = true;
                Popup::success(kind.success_message())
            }
            Err(message) => Popup::error(kind.failure_message(message)),
        };
        ctx.state_mut::<Toasts>().show(popup, now);
    }

    if refresh {
        refresh_users(ctx);
    }

    settled.len()
}
