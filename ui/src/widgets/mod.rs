mod toast;
mod users;

pub use toast::toast_overlay;
pub use users::{BULK_ADD_HINT, bulk_add_form, users_panel};
