//! Page selector shown above the user table.

use egui::Ui;
use roster_business::PageDescriptor;

/// Renders nothing for a single page. Returns the newly selected zero-based page.
pub fn page_selector(ui: &mut Ui, pager: PageDescriptor) -> Option<u32> {
    if !pager.show_selector() {
        return None;
    }

    let mut selected = None;
    ui.horizontal(|ui| {
        if ui
            .add_enabled(pager.has_previous(), egui::Button::new("Previous"))
            .clicked()
        {
            selected = Some(pager.current - 1);
        }

        let mut last_shown = None;
        for page in pager.visible_pages() {
            if last_shown.is_some_and(|last: u32| page > last + 1) {
                ui.label("…");
            }
            last_shown = Some(page);

            let label = PageDescriptor::label(page);
            if ui
                .selectable_label(page == pager.current, label)
                .clicked()
                && page != pager.current
            {
                selected = Some(page);
            }
        }

        if ui
            .add_enabled(pager.has_next(), egui::Button::new("Next"))
            .clicked()
        {
            selected = Some(pager.current + 1);
        }
    });

    selected
}
