//! User management widgets.

pub mod bulk_add;
pub mod panel;
pub mod table;

pub use bulk_add::{BULK_ADD_HINT, bulk_add_form};
pub use panel::users_panel;
