//! Multi-line "add users by email" form.

use egui::{RichText, Ui};
use roster_business::{BulkAddForm, submit_bulk_add};
use roster_states::StateCtx;

use crate::utils::colors::COLOR_RED;

pub const BULK_ADD_HINT: &str = "Add one or more emails, separated by spaces or new lines";

/// Renders the form while it is open.
pub fn bulk_add_form(state_ctx: &mut StateCtx, ui: &mut Ui) {
    if !state_ctx.state::<BulkAddForm>().open {
        return;
    }

    let mut submit = false;
    ui.group(|ui| {
        let form = state_ctx.state_mut::<BulkAddForm>();

        ui.label(RichText::new("Add users by email").strong());

        let mut value = form.value.clone();
        let response = ui.add_enabled(
            form.can_submit(),
            egui::TextEdit::multiline(&mut value)
                .hint_text(BULK_ADD_HINT)
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            form.set_value(value);
        }

        if let Some(error) = form.visible_error() {
            ui.colored_label(COLOR_RED, error);
        }

        ui.horizontal(|ui| {
            submit = ui
                .add_enabled(form.can_submit(), egui::Button::new("Add Users"))
                .clicked();
            if form.submitting {
                ui.spinner();
            }
        });
    });

    if submit {
        submit_bulk_add(state_ctx);
    }
}
