//! Invited users, each with an "Uninvite" button.

use egui::{Frame, Margin, Stroke, Ui};
use roster_business::{UserActionKind, UserActionsCompute, users::InvitedUser};
use ustr::Ustr;

use super::data_cell;
use super::header::render_table_header;
use super::row::{RowAction, action_button};
use crate::utils::colors::TABLE_BORDER_COLOR;

/// Renders nothing for an empty list.
pub fn render_invited_table(
    ui: &mut Ui,
    invited: &[InvitedUser],
    actions: &UserActionsCompute,
) -> Option<RowAction> {
    if invited.is_empty() {
        return None;
    }

    ui.strong("Invited Users");

    Frame::NONE
        .stroke(Stroke::new(1.0, TABLE_BORDER_COLOR))
        .inner_margin(Margin::ZERO)
        .show(ui, |ui| {
            egui::Grid::new("invited_users_table")
                .num_columns(2)
                .striped(true)
                .spacing([16.0, 0.0])
                .min_col_width(60.0)
                .show(ui, |ui| {
                    render_table_header(ui, &["Email", "Actions"]);

                    let mut clicked = None;
                    for user in invited {
                        let email = Ustr::from(&user.email);
                        data_cell(ui, |ui| {
                            ui.label(email.as_str());
                        });
                        data_cell(ui, |ui| {
                            ui.horizontal(|ui| {
                                if action_button(ui, UserActionKind::Uninvite, email, actions) {
                                    clicked = Some(RowAction {
                                        kind: UserActionKind::Uninvite,
                                        email,
                                    });
                                }
                            });
                        });
                        ui.end_row();
                    }
                    clicked
                })
                .inner
        })
        .inner
}
