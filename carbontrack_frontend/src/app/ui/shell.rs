use eframe::egui::{self, Context};

use crate::router::Route;

use super::super::state::PageAction;
use super::super::CarbonTrackApp;

const NAV: [(&str, Route); 4] = [
    ("Home", Route::Home),
    ("Carbon Tracker", Route::CarbonTracker),
    ("Community", Route::Community),
    ("Location", Route::Location),
];

pub fn render_top_bar(app: &mut CarbonTrackApp, ctx: &Context) -> Vec<PageAction> {
    let mut actions = Vec::new();
    let mut apply_url = false;

    egui::TopBottomPanel::top("top_controls").show(ctx, |ui| {
        ui.horizontal(|ui| {
            for (label, route) in NAV.iter() {
                if ui.selectable_label(&app.route == route, *label).clicked() {
                    actions.push(PageAction::Navigate(route.clone()));
                }
            }
            ui.separator();
            if app.session.is_none()
                && ui
                    .selectable_label(app.route == Route::Auth, "Log in")
                    .clicked()
            {
                actions.push(PageAction::Navigate(Route::Auth));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Apply").clicked() {
                    apply_url = true;
                }
                ui.text_edit_singleline(&mut app.base_url_input);
                ui.label("API Base URL");
            });
        });

        if let Some(message) = app.info_banner.clone() {
            let mut dismiss = false;
            egui::Frame::group(ui.style())
                .fill(ui.visuals().extreme_bg_color)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(message.as_str());
                        if ui.button("Dismiss").clicked() {
                            dismiss = true;
                        }
                    });
                });
            if dismiss {
                app.info_banner = None;
            }
        }
    });

    if apply_url {
        app.apply_base_url();
    }
    actions
}
