use std::time::Duration;

use chrono::Utc;
use roster_business::{BulkAddForm, Toasts, UserActionsCompute, UsersListCompute};
use roster_states::Time;

use crate::{state::State, widgets};

/// How often to poll for command results while something is outstanding.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct RosterApp {
    state: State,
}

impl RosterApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// One frame of the console: apply command results, draw, schedule repaint.
    ///
    /// Does not touch the `Time` state so tests can drive it.
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let ctx = &mut self.state.ctx;

        // Sync Compute for render
        ctx.sync_computes();
        roster_business::settle(ctx);

        ui.heading("Users");
        ui.separator();
        widgets::users_panel(ctx, ui);
        widgets::toast_overlay(ctx, ui.ctx());

        if self.is_busy() {
            ui.ctx().request_repaint_after(POLL_INTERVAL);
        }
    }

    fn is_busy(&self) -> bool {
        let ctx = &self.state.ctx;
        let now = ctx.state::<Time>().now();

        ctx.state::<UsersListCompute>().is_loading()
            || ctx.state::<UserActionsCompute>().in_flight_count() > 0
            || ctx.state::<BulkAddForm>().submitting
            || ctx.state::<Toasts>().current(now).is_some()
    }
}

impl eframe::App for RosterApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state
            .ctx
            .update::<Time>(|time| time.set(Utc::now()));

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
