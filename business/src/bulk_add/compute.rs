//! Bulk-add submission: one PUT with every token from the form.

use std::any::Any;

use chrono::Utc;
use roster_states::{
    Command, CommandFuture, CommandSnapshot, Compute, State, StateCtx, Time, Updater,
    state_assign_impl,
};

use crate::action_state::AsyncActionState;
use crate::bulk_add::form::BulkAddForm;
use crate::config::BusinessConfig;
use crate::toast::{Popup, Toasts};
use crate::users::api as users_api;
use crate::users::list_users_compute::refresh_users;

/// Outcome of the last bulk add; `Succeeded` carries how many emails were sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkAddCompute {
    pub state: AsyncActionState<usize>,
}

impl State for BulkAddCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

impl Compute for BulkAddCompute {}

#[derive(Debug, Clone)]
pub struct BulkAddCommand {
    pub emails: Vec<String>,
}

impl Command for BulkAddCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater) -> CommandFuture {
        let emails = self.emails.clone();
        let api_base_url = snap
            .try_state::<BusinessConfig>()
            .map(|config| config.api_url().as_str().to_owned());

        Box::pin(async move {
            let result = match api_base_url {
                Ok(api_base_url) => {
                    log::info!("Adding {} users", emails.len());
                    users_api::bulk_add_users(&api_base_url, &emails)
                        .await
                        .map(|()| emails.len())
                        .map_err(|err| err.to_string())
                }
                Err(err) => Err(err.to_string()),
            };

            if let Err(message) = &result {
                log::warn!("Bulk add failed: {message}");
            }

            let mut state = AsyncActionState::Pending;
            state.settle(result);
            updater.set(BulkAddCompute { state });
        })
    }
}

/// Validates the form and sends it. `false` if blocked by validation or an
/// outstanding submit.
pub fn submit_bulk_add(ctx: &mut StateCtx) -> bool {
    let Some(emails) = ctx.state_mut::<BulkAddForm>().begin_submit() else {
        return false;
    };

    ctx.state_mut::<BulkAddCompute>().state = AsyncActionState::Pending;
    ctx.dispatch_command(BulkAddCommand { emails });
    true
}

/// Applies a settled bulk add to the form, toasts and list.
///
/// Returns the outcome when one was consumed this call.
pub fn settle_bulk_add(ctx: &mut StateCtx) -> Option<Result<usize, String>> {
    let result = ctx.state_mut::<BulkAddCompute>().state.take_settled()?;

    let now = ctx
        .try_state::<Time>()
        .map(Time::now)
        .unwrap_or_else(|_| Utc::now());

    let popup = match &result {
        Ok(count) => {
            let noun = if *count == 1 { "user" } else { "users" };
            Popup::success(format!("{count} {noun} invited!"))
        }
        Err(message) => Popup::error(format!("Unable to add users - {message}")),
    };

    ctx.state_mut::<BulkAddForm>().finish_submit(result.is_ok());
    ctx.state_mut::<Toasts>().show(popup, now);

    if result.is_ok() {
        refresh_users(ctx);
    }

    Some(result)
}
