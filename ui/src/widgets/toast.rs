//! Single transient status message in the bottom-right corner.

use egui::{Align2, Color32, Context, Frame, Margin, RichText};
use roster_business::{Severity, Toasts};
use roster_states::{StateCtx, Time};

use crate::utils::colors::{COLOR_GREEN, COLOR_RED};

/// Shows the current toast, if any, with a dismiss button.
pub fn toast_overlay(state_ctx: &mut StateCtx, ctx: &Context) {
    let now = state_ctx.state::<Time>().now();
    let Some(popup) = state_ctx.state::<Toasts>().current(now).cloned() else {
        return;
    };

    let fill = match popup.severity {
        Severity::Success => COLOR_GREEN,
        Severity::Error => COLOR_RED,
    };

    let dismissed = egui::Area::new(egui::Id::new("roster_toast"))
        .anchor(Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            Frame::NONE
                .fill(fill)
                .corner_radius(6.0)
                .inner_margin(Margin::symmetric(12, 8))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&popup.message).color(Color32::WHITE));
                        ui.button("Dismiss").clicked()
                    })
                    .inner
                })
                .inner
        })
        .inner;

    if dismissed {
        state_ctx.state_mut::<Toasts>().dismiss();
    }
}
