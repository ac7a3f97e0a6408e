use eframe::egui::{self, Align2, Color32, Context, RichText};

use crate::api::resolve_image_url;
use crate::models::Post;

use super::super::format_timestamp;
use super::super::images::ImageCache;
use super::super::state::{CommunityState, PageAction};

pub fn render_community(
    ui: &mut egui::Ui,
    state: &mut CommunityState,
    images: &mut ImageCache,
    base_url: &str,
) -> Vec<PageAction> {
    let mut actions = Vec::new();

    ui.add_enabled_ui(state.notice.is_none(), |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Community").heading());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Logout").clicked() {
                    actions.push(PageAction::Logout);
                }
                if ui.button("Refresh").clicked() {
                    actions.push(PageAction::Refresh);
                }
                ui.label(format!("Welcome, {}", state.profile.name));
            });
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

        render_composer(ui, state, &mut actions);

        ui.add_space(12.0);
        ui.label(RichText::new("Posts").heading());
        if state.posts_loading && state.posts.is_empty() {
            ui.add(egui::Spinner::new());
        }

        egui::ScrollArea::vertical()
            .id_salt("community-posts")
            .show(ui, |ui| {
                if state.posts.is_empty() && !state.posts_loading {
                    ui.label("No posts available.");
                }
                for post in &state.posts {
                    let saved = state.comment_drafts.get(&post.id);
                    let mut draft = saved.cloned().unwrap_or_default();
                    let liked = state.liked_posts.contains(&post.id);
                    let like_pending = state.likes_pending.contains(&post.id);
                    render_post_card(
                        ui,
                        post,
                        &mut draft,
                        liked,
                        like_pending,
                        images,
                        base_url,
                        &mut actions,
                    );
                    // Only posts the user has typed into keep a draft entry.
                    if saved.map(String::as_str).unwrap_or_default() != draft {
                        if draft.is_empty() {
                            state.comment_drafts.remove(&post.id);
                        } else {
                            state.comment_drafts.insert(post.id.clone(), draft);
                        }
                    }
                }
            });
    });

    actions
}

fn render_composer(ui: &mut egui::Ui, state: &mut CommunityState, actions: &mut Vec<PageAction>) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .inner_margin(egui::vec2(12.0, 8.0))
        .show(ui, |ui| {
            ui.label(RichText::new("Create a New Post").strong());
            let draft = &mut state.new_post;
            ui.add(
                egui::TextEdit::singleline(&mut draft.title)
                    .desired_width(f32::INFINITY)
                    .hint_text("Post Title"),
            );
            ui.add(
                egui::TextEdit::multiline(&mut draft.caption)
                    .desired_rows(4)
                    .desired_width(f32::INFINITY)
                    .hint_text("Write your post here..."),
            );
            ui.horizontal(|ui| {
                if ui.button("Choose image…").clicked() {
                    actions.push(PageAction::PickImage);
                }
                match &draft.image {
                    Some(path) => {
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().to_string())
                            .unwrap_or_else(|| path.display().to_string());
                        ui.label(name);
                        if ui.small_button("Remove").clicked() {
                            actions.push(PageAction::ClearImage);
                        }
                    }
                    None => {
                        ui.weak("No image selected");
                    }
                }
            });
            ui.add_space(6.0);
            if draft.submitting {
                ui.add(egui::Spinner::new());
            } else if ui.button("Post").clicked() {
                actions.push(PageAction::SubmitPost);
            }
        });
}

#[allow(clippy::too_many_arguments)]
fn render_post_card(
    ui: &mut egui::Ui,
    post: &Post,
    draft: &mut String,
    liked: bool,
    like_pending: bool,
    images: &mut ImageCache,
    base_url: &str,
    actions: &mut Vec<PageAction>,
) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .inner_margin(egui::vec2(12.0, 8.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let title = if post.title.is_empty() {
                    "(untitled post)"
                } else {
                    post.title.as_str()
                };
                ui.label(RichText::new(title).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(ts) = &post.created_at {
                        ui.label(format_timestamp(ts));
                    }
                });
            });
            if let Some(author) = post.user_name.as_deref().filter(|n| !n.is_empty()) {
                ui.weak(format!("by {author}"));
            }
            ui.label(&post.caption);
            if let Some(image_url) = &post.image_url {
                let url = resolve_image_url(base_url, image_url);
                images.show(ui, &url, &post.title, 360.0);
            }

            ui.horizontal(|ui| {
                let like_label = if liked {
                    format!("Liked ({})", post.likes)
                } else {
                    format!("Like ({})", post.likes)
                };
                if like_pending {
                    ui.add(egui::Spinner::new());
                } else if ui.button(like_label).clicked() {
                    actions.push(PageAction::Like(post.id.clone()));
                }
                if ui.button("Delete").clicked() {
                    actions.push(PageAction::Delete(post.id.clone()));
                }
                if ui
                    .button(format!("View Comments ({})", post.comments.len()))
                    .clicked()
                {
                    actions.push(PageAction::ViewComments(post.id.clone()));
                }
            });

            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(draft)
                        .desired_width(280.0)
                        .hint_text("Write a comment..."),
                );
                let pressed_enter =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Comment").clicked() || pressed_enter {
                    actions.push(PageAction::SubmitComment(post.id.clone()));
                }
            });
        });
    ui.add_space(8.0);
}

/// Modal notice; returns true once the user acknowledges it.
pub fn render_notice(ctx: &Context, notice: &str) -> bool {
    let mut dismissed = false;
    egui::Window::new("Notice")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.label(notice);
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    dismissed
}
