//! One row of the user table.

use egui::Ui;
use roster_business::{ControlKey, UserActionKind, UserActionsCompute, UserRow};
use ustr::Ustr;

use super::data_cell;

/// A button click the panel still has to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowAction {
    pub kind: UserActionKind,
    pub email: Ustr,
}

/// Renders email, role, status and the two action buttons, then ends the row.
///
/// A button whose request is in flight is disabled and shows a spinner.
pub fn render_user_row(
    ui: &mut Ui,
    row: &UserRow,
    actions: &UserActionsCompute,
) -> Option<RowAction> {
    data_cell(ui, |ui| {
        ui.label(row.email.as_str());
    });
    data_cell(ui, |ui| {
        ui.label(row.role);
    });
    data_cell(ui, |ui| {
        ui.label(row.status);
    });

    let clicked = data_cell(ui, |ui| {
        ui.horizontal(|ui| {
            let mut clicked = None;
            for kind in [row.role_action, row.access_action] {
                if action_button(ui, kind, row.email, actions) {
                    clicked = Some(RowAction {
                        kind,
                        email: row.email,
                    });
                }
            }
            clicked
        })
        .inner
    })
    .inner;

    ui.end_row();
    clicked
}

/// Returns `true` when the (enabled) button was clicked.
pub fn action_button(
    ui: &mut Ui,
    kind: UserActionKind,
    email: Ustr,
    actions: &UserActionsCompute,
) -> bool {
    let in_flight = actions.is_in_flight(&ControlKey {
        email,
        slot: kind.slot(),
    });

    let clicked = ui
        .add_enabled(!in_flight, egui::Button::new(kind.label()))
        .clicked();
    if in_flight {
        ui.spinner();
    }
    clicked && !in_flight
}
