use std::any::Any;

use roster_states::{State, state_assign_impl};

use crate::bulk_add::validation::validate_emails;

/// The bulk-add text field and its submit lifecycle.
///
/// Errors are shown only once the field has been touched, either by typing or
/// by a submit attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkAddForm {
    pub value: String,
    pub touched: bool,
    pub error: Option<String>,
    pub submitting: bool,
    pub open: bool,
}

impl BulkAddForm {
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.touched = true;
        self.validate();
    }

    /// Re-runs validation and stores the message. Returns the tokens if valid.
    pub fn validate(&mut self) -> Option<Vec<String>> {
        match validate_emails(&self.value) {
            Ok(emails) => {
                self.error = None;
                Some(emails)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }

    /// Error to render, `None` until touched.
    pub fn visible_error(&self) -> Option<&str> {
        if self.touched {
            self.error.as_deref()
        } else {
            None
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting
    }

    /// Validates and locks the form. `None` when already submitting or invalid.
    pub fn begin_submit(&mut self) -> Option<Vec<String>> {
        if self.submitting {
            return None;
        }

        self.touched = true;
        let emails = self.validate()?;
        self.submitting = true;
        Some(emails)
    }

    /// Unlocks the form. A successful submit clears and closes it; a failed one
    /// keeps the typed value for another try.
    pub fn finish_submit(&mut self, succeeded: bool) {
        self.submitting = false;
        if succeeded {
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }
}

impl State for BulkAddForm {
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
