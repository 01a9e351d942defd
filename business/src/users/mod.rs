//! User table domain: wire model, API calls, per-row actions and the list.

pub mod action_compute;
pub mod api;
pub mod list_users_compute;
pub mod model;
pub mod table;

pub use action_compute::{
    ControlKey, ControlSlot, ControlState, UserActionCommand, UserActionKind, UserActionSettled,
    UserActionsCompute, settle_user_actions, trigger_user_action,
};
pub use api::{ApiError, ApiResult};
pub use list_users_compute::{
    RefreshUsersCommand, UsersListCompute, UsersListEvent, UsersListInput, UsersPage,
    change_page, ensure_users_loaded, refresh_users,
};
pub use model::{BulkAddRequest, InvitedUser, User, UserByEmail, UserRole, UserStatus, UsersResponse};
pub use table::{COLUMNS, PageDescriptor, UserRow, user_rows};
