use eframe::egui::{self, Color32, RichText};

use crate::api::resolve_image_url;
use crate::router::Route;

use super::super::images::ImageCache;
use super::super::state::{CommentsState, PageAction};

pub fn render_comments(
    ui: &mut egui::Ui,
    state: &mut CommentsState,
    images: &mut ImageCache,
    base_url: &str,
) -> Vec<PageAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        if ui.button("← Back to community").clicked() {
            actions.push(PageAction::Navigate(Route::Community));
        }
        ui.separator();
        ui.label(RichText::new("Comments").heading());
    });
    ui.separator();

    if let Some(err) = &state.error {
        ui.horizontal(|ui| {
            ui.colored_label(Color32::LIGHT_RED, err);
            if ui.small_button("Dismiss").clicked() {
                actions.push(PageAction::DismissError);
            }
        });
    }

    let Some(post) = &state.post else {
        ui.label("Loading...");
        return actions;
    };

    egui::ScrollArea::vertical()
        .id_salt("post-comments")
        .show(ui, |ui| {
            ui.label(RichText::new(&post.title).heading());
            ui.label(&post.caption);
            if let Some(image_url) = &post.image_url {
                let url = resolve_image_url(base_url, image_url);
                images.show(ui, &url, &post.title, 480.0);
            }

            ui.add_space(8.0);
            ui.add(
                egui::TextEdit::multiline(&mut state.comment_text)
                    .desired_rows(3)
                    .desired_width(f32::INFINITY)
                    .hint_text("Write your comment here..."),
            );
            if state.sending {
                ui.add(egui::Spinner::new());
            } else if ui.button("Add Comment").clicked() {
                actions.push(PageAction::SubmitDetailComment);
            }

            ui.add_space(8.0);
            ui.label(RichText::new("Comments").strong());
            if post.comments.is_empty() {
                ui.label("No comments yet.");
            }
            for comment in &post.comments {
                ui.separator();
                ui.label(comment);
            }
        });

    actions
}
