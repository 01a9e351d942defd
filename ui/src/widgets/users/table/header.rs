//! Header row for the user tables.

use egui::Ui;

use super::header_cell;

/// Renders one bold header cell per label and ends the grid row.
pub fn render_table_header(ui: &mut Ui, labels: &[&str]) {
    for label in labels {
        header_cell(ui, |ui| {
            ui.strong(*label);
        });
    }
    ui.end_row();
}
