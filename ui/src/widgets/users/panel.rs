//! Main panel for user management.
//!
//! Toolbar, bulk-add form, page selector, user table and invited users. Uses a
//! Typora-like table style with clean borders and minimal styling.

use egui::{Frame, Margin, Response, ScrollArea, Stroke, Ui};
use roster_business::{
    BulkAddForm, PageDescriptor, UserActionsCompute, UsersListCompute, change_page,
    ensure_users_loaded, refresh_users, trigger_user_action, user_rows, users::COLUMNS,
};
use roster_states::StateCtx;

use super::bulk_add::bulk_add_form;
use super::table::header::render_table_header;
use super::table::invited::render_invited_table;
use super::table::pagination::page_selector;
use super::table::row::{RowAction, render_user_row};
use crate::utils::colors::{COLOR_RED, TABLE_BORDER_COLOR};

/// Displays the users panel. Loads the first page on the first frame.
pub fn users_panel(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    ensure_users_loaded(state_ctx);

    ui.vertical(|ui| {
        toolbar(state_ctx, ui);
        bulk_add_form(state_ctx, ui);

        if let Some(error) = state_ctx.state::<UsersListCompute>().error_message() {
            ui.colored_label(COLOR_RED, format!("Error: {error}"));
        }

        ui.add_space(8.0);

        let list = state_ctx.state::<UsersListCompute>();
        let actions = state_ctx.state::<UserActionsCompute>();

        let mut new_page = None;
        let mut clicked = None;

        // An empty page renders no table section, selector included.
        if let Some(page) = list.page().filter(|page| !page.users.is_empty()) {
            new_page = page_selector(ui, PageDescriptor::new(page.page, page.total_pages));
        }

        ScrollArea::vertical().show(ui, |ui| {
            clicked = users_table(ui, list, actions);
            ui.add_space(12.0);
            if let Some(action) = render_invited_table(ui, list.invited(), actions) {
                clicked = Some(action);
            }
        });

        if let Some(page) = new_page {
            change_page(state_ctx, page);
        }

        if let Some(RowAction { kind, email }) = clicked {
            trigger_user_action(state_ctx, kind, email.as_str());
        }
    })
    .response
}

fn toolbar(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let loading = state_ctx.state::<UsersListCompute>().is_loading();

    ui.horizontal(|ui| {
        if ui
            .add_enabled(!loading, egui::Button::new("Refresh"))
            .clicked()
        {
            refresh_users(state_ctx);
        }

        let form_open = state_ctx.state::<BulkAddForm>().open;
        let toggle_label = if form_open { "Cancel" } else { "Invite Users" };
        if ui.button(toggle_label).clicked() {
            let form = state_ctx.state_mut::<BulkAddForm>();
            if form.can_submit() {
                if form.open {
                    form.reset();
                } else {
                    form.toggle_open();
                }
            }
        }

        if loading {
            ui.spinner();
            ui.label("Loading users...");
        }
    });
}

/// Renders nothing, not even the header, when there are no users.
fn users_table(
    ui: &mut Ui,
    list: &UsersListCompute,
    actions: &UserActionsCompute,
) -> Option<RowAction> {
    let rows = user_rows(list.users());
    if rows.is_empty() {
        return None;
    }

    Frame::NONE
        .stroke(Stroke::new(1.0, TABLE_BORDER_COLOR))
        .inner_margin(Margin::ZERO)
        .show(ui, |ui| {
            egui::Grid::new("users_table")
                .num_columns(COLUMNS.len())
                .striped(true)
                .spacing([16.0, 0.0])
                .min_col_width(60.0)
                .show(ui, |ui| {
                    render_table_header(ui, &COLUMNS);

                    let mut clicked = None;
                    for row in &rows {
                        if let Some(action) = render_user_row(ui, row, actions) {
                            clicked = Some(action);
                        }
                    }
                    clicked
                })
                .inner
        })
        .inner
}
