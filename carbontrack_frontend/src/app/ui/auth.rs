use eframe::egui::{self, Color32, RichText};

use super::super::state::{AuthMode, AuthState, PageAction};

pub fn render_auth(ui: &mut egui::Ui, state: &mut AuthState) -> Vec<PageAction> {
    let mut actions = Vec::new();
    let (title, submit, toggle) = match state.mode {
        AuthMode::Login => ("Log in", "Log in", "Need an account? Sign up"),
        AuthMode::Signup => ("Sign up", "Create account", "Have an account? Log in"),
    };

    ui.vertical_centered(|ui| {
        ui.set_max_width(360.0);
        ui.add_space(24.0);
        ui.label(RichText::new(title).heading());
        ui.add_space(8.0);

        if let Some(err) = &state.error {
            ui.colored_label(Color32::LIGHT_RED, err);
        }
        if let Some(info) = &state.info {
            ui.colored_label(Color32::LIGHT_GREEN, info);
        }

        if state.mode == AuthMode::Signup {
            ui.add(egui::TextEdit::singleline(&mut state.name).hint_text("Name"));
        }
        ui.add(egui::TextEdit::singleline(&mut state.email).hint_text("Email"));
        let password = ui.add(
            egui::TextEdit::singleline(&mut state.password)
                .password(true)
                .hint_text("Password"),
        );
        let pressed_enter =
            password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.add_space(8.0);
        if state.submitting {
            ui.add(egui::Spinner::new());
        } else if ui.button(submit).clicked() || pressed_enter {
            actions.push(PageAction::SubmitAuth);
        }
        if ui.link(toggle).clicked() {
            actions.push(PageAction::ToggleAuthMode);
        }
    });
    actions
}
