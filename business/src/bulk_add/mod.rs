//! Bulk add users by email.

pub mod compute;
pub mod form;
pub mod validation;

pub use compute::{BulkAddCommand, BulkAddCompute, settle_bulk_add, submit_bulk_add};
pub use form::BulkAddForm;
pub use validation::{EmailValidationError, is_valid_email, split_emails, validate_emails};
