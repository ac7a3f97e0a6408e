use eframe::egui::{self, RichText};

use crate::router::Route;

use super::super::state::PageAction;

pub fn render_home(ui: &mut egui::Ui) -> Vec<PageAction> {
    let mut actions = Vec::new();
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(RichText::new("Carbon Tracker").heading().strong());
        ui.label("Track your footprint and share progress with the community.");
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui.button("Start tracking").clicked() {
                actions.push(PageAction::Navigate(Route::CarbonTracker));
            }
            if ui.button("Join the community").clicked() {
                actions.push(PageAction::Navigate(Route::Community));
            }
        });
    });
    actions
}

pub fn render_carbon_tracker(ui: &mut egui::Ui) -> Vec<PageAction> {
    ui.heading("Carbon Tracker");
    ui.label("Footprint tracking lives in the web dashboard.");
    Vec::new()
}

pub fn render_location(ui: &mut egui::Ui) -> Vec<PageAction> {
    ui.heading("Location");
    ui.label("Nearby recycling and transit points are shown in the web dashboard.");
    Vec::new()
}
