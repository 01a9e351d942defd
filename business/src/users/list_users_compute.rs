//! "List users" compute + refresh command.
//!
//! - [`UsersListInput`] holds the requested page and a refresh generation.
//! - [`RefreshUsersCommand`] fetches that page and posts a [`UsersListEvent`].
//! - [`UsersListCompute`] keeps the last loaded page visible while a refresh is
//!   in flight and after a failed one.
//!
//! UI reads `ctx.cached::<UsersListCompute>()` and calls [`refresh_users`] /
//! [`change_page`] rather than dispatching the command directly.

use std::any::Any;

use roster_states::{
    Command, CommandFuture, CommandSnapshot, Compute, State, StateCtx, Updater,
    state_assign_impl,
};

use crate::config::BusinessConfig;
use crate::users::api as users_api;
use crate::users::model::{InvitedUser, User};

/// One loaded page of the user list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsersPage {
    pub users: Vec<User>,
    pub invited: Vec<InvitedUser>,
    /// Zero-based.
    pub page: u32,
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsersListEvent {
    Loaded { generation: u64, page: UsersPage },
    Failed { generation: u64, message: String },
}

impl UsersListEvent {
    fn generation(&self) -> u64 {
        match self {
            Self::Loaded { generation, .. } | Self::Failed { generation, .. } => *generation,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UsersListCompute {
    page: Option<UsersPage>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl UsersListCompute {
    pub fn page(&self) -> Option<&UsersPage> {
        self.page.as_ref()
    }

    pub fn users(&self) -> &[User] {
        self.page
            .as_ref()
            .map(|page| page.users.as_slice())
            .unwrap_or_default()
    }

    pub fn invited(&self) -> &[InvitedUser] {
        self.page
            .as_ref()
            .map(|page| page.invited.as_slice())
            .unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Nothing requested yet.
    pub fn is_untouched(&self) -> bool {
        self.generation == 0
    }

    fn start(&mut self, generation: u64) {
        self.generation = generation;
        self.loading = true;
    }

    fn apply_event(&mut self, event: UsersListEvent) {
        if event.generation() != self.generation {
            log::debug!(
                "Dropping stale users list result (generation {} != {})",
                event.generation(),
                self.generation
            );
            return;
        }

        self.loading = false;
        match event {
            UsersListEvent::Loaded { page, .. } => {
                self.page = Some(page);
                self.error = None;
            }
            UsersListEvent::Failed { message, .. } => {
                self.error = Some(message);
            }
        }
    }
}

impl State for UsersListCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        match new_self.downcast::<UsersListEvent>() {
            Ok(event) => self.apply_event(*event),
            Err(other) => state_assign_impl(self, other),
        }
    }
}

impl Compute for UsersListCompute {}

/// Which page to fetch next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsersListInput {
    /// Zero-based.
    pub page: u32,
    pub generation: u64,
}

impl State for UsersListInput {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(*self))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

/// Fetches the page named by [`UsersListInput`].
#[derive(Default, Debug)]
pub struct RefreshUsersCommand;

impl Command for RefreshUsersCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater) -> CommandFuture {
        let input = snap.try_state::<UsersListInput>().copied();
        let api_base_url = snap
            .try_state::<BusinessConfig>()
            .map(|config| config.api_url().as_str().to_owned());

        Box::pin(async move {
            let (input, api_base_url) = match (input, api_base_url) {
                (Ok(input), Ok(url)) => (input, url),
                (Err(err), _) | (_, Err(err)) => {
                    log::error!("RefreshUsersCommand: {err}");
                    return;
                }
            };
            let generation = input.generation;

            log::info!("Fetching users page {}", input.page);
            let event = match users_api::list_users(&api_base_url, input.page).await {
                Ok(response) => UsersListEvent::Loaded {
                    generation,
                    page: UsersPage {
                        users: response.accepted,
                        invited: response.invited,
                        page: input.page,
                        total_pages: response.accepted_pages.max(1),
                    },
                },
                Err(err) => {
                    log::warn!("Failed to fetch users page {}: {err}", input.page);
                    UsersListEvent::Failed {
                        generation,
                        message: err.to_string(),
                    }
                }
            };

            updater.apply::<UsersListCompute, _>(event);
        })
    }
}

/// Re-fetches the current page, keeping the visible one until it lands.
pub fn refresh_users(ctx: &mut StateCtx) {
    let generation = {
        let input = ctx.state_mut::<UsersListInput>();
        input.generation += 1;
        input.generation
    };
    ctx.state_mut::<UsersListCompute>().start(generation);
    ctx.dispatch::<RefreshUsersCommand>();
}

/// Switches to `page` (zero-based) and fetches it.
pub fn change_page(ctx: &mut StateCtx, page: u32) {
    ctx.state_mut::<UsersListInput>().page = page;
    refresh_users(ctx);
}

/// Fetches the first page once, on the first frame that asks.
pub fn ensure_users_loaded(ctx: &mut StateCtx) -> bool {
    if !ctx.state::<UsersListCompute>().is_untouched() {
        return false;
    }
    refresh_users(ctx);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(emails: &[&str]) -> UsersPage {
        UsersPage {
            users: emails
                .iter()
                .map(|email| User::new(*email, Default::default(), Default::default()))
                .collect(),
            invited: Vec::new(),
            page: 0,
            total_pages: 1,
        }
    }

    #[test]
    fn keeps_old_page_while_loading_and_on_error() {
        let mut compute = UsersListCompute::default();
        compute.start(1);
        compute.apply_event(UsersListEvent::Loaded {
            generation: 1,
            page: page(&["a@x.io"]),
        });
        assert_eq!(compute.users().len(), 1);

        compute.start(2);
        assert!(compute.is_loading());
        assert_eq!(compute.users().len(), 1);

        compute.apply_event(UsersListEvent::Failed {
            generation: 2,
            message: "down".to_owned(),
        });
        assert!(!compute.is_loading());
        assert_eq!(compute.error_message(), Some("down"));
        assert_eq!(compute.users()[0].email, "a@x.io");
    }

    #[test]
    fn stale_results_are_ignored() {
        let mut compute = UsersListCompute::default();
        compute.start(1);
        compute.start(2);

        compute.apply_event(UsersListEvent::Loaded {
            generation: 1,
            page: page(&["old@x.io"]),
        });
        assert!(compute.is_loading());
        assert!(compute.page().is_none());

        compute.apply_event(UsersListEvent::Loaded {
            generation: 2,
            page: page(&["new@x.io"]),
        });
        assert_eq!(compute.users()[0].email, "new@x.io");
    }

    #[test]
    fn success_clears_previous_error() {
        let mut compute = UsersListCompute::default();
        compute.start(1);
        compute.apply_event(UsersListEvent::Failed {
            generation: 1,
            message: "down".to_owned(),
        });
        compute.start(2);
        compute.apply_event(UsersListEvent::Loaded {
            generation: 2,
            page: page(&[]),
        });

        assert!(compute.error_message().is_none());
        assert!(compute.users().is_empty());
    }
}
