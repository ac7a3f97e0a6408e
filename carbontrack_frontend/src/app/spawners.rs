use log::info;

use crate::models::{CreatePostInput, Credentials, SignupInput};
use crate::router::Route;

use super::feedback::{require_text, DraftError, ALREADY_LIKED};
use super::state::{AuthMode, ViewState};
use super::tasks;
use super::CarbonTrackApp;

impl CarbonTrackApp {
    pub(super) fn spawn_load_posts(&mut self) {
        let Some(session) = self.session.clone() else {
            return;
        };
        if let ViewState::Community(state) = &mut self.view {
            state.posts_loading = true;
            tasks::load_posts(self.api.clone(), self.tx.clone(), state.instance, session);
        }
    }

    pub(super) fn spawn_load_profile(&mut self) {
        let Some(session) = self.session.clone() else {
            return;
        };
        if let ViewState::Community(state) = &self.view {
            tasks::load_profile(self.api.clone(), self.tx.clone(), state.instance, session);
        }
    }

    pub(super) fn spawn_load_post(&mut self) {
        let Some(session) = self.session.clone() else {
            return;
        };
        if let ViewState::Comments(state) = &self.view {
            tasks::load_post(
                self.api.clone(),
                self.tx.clone(),
                state.instance,
                session,
                state.post_id.clone(),
            );
        }
    }

    /// Re-fetches the feed, e.g. after a create left only the new post visible.
    pub fn refresh_posts(&mut self) {
        self.spawn_load_posts();
    }

    pub fn submit_post(&mut self) {
        let Some(session) = self.session.clone() else {
            return;
        };
        let ViewState::Community(state) = &mut self.view else {
            return;
        };
        let draft = &mut state.new_post;
        if draft.submitting {
            return;
        }
        if !require_text(&draft.title) || !require_text(&draft.caption) {
            state.error = Some(DraftError::EmptyPost.to_string());
            return;
        }
        let payload = CreatePostInput {
            user_id: session.user_id.clone(),
            user_name: state.profile.name.clone(),
            title: draft.title.clone(),
            caption: draft.caption.clone(),
            image: draft.image.clone(),
        };
        draft.submitting = true;
        tasks::create_post(
            self.api.clone(),
            self.tx.clone(),
            state.instance,
            session,
            payload,
        );
    }

    pub fn pick_image(&mut self) {
        if let ViewState::Community(state) = &self.view {
            tasks::pick_image(self.tx.clone(), state.instance);
        }
    }

    pub fn like_post(&mut self, post_id: &str) {
        let Some(session) = self.session.clone() else {
            return;
        };
        let ViewState::Community(state) = &mut self.view else {
            return;
        };
        if state.liked_posts.contains(post_id) {
            state.notice = Some(ALREADY_LIKED.to_string());
            return;
        }
        if !state.likes_pending.insert(post_id.to_string()) {
            return;
        }
        tasks::like_post(
            self.api.clone(),
            self.tx.clone(),
            state.instance,
            session,
            post_id.to_string(),
        );
    }

    pub fn delete_post(&mut self, post_id: &str) {
        let Some(session) = self.session.clone() else {
            return;
        };
        if let ViewState::Community(state) = &self.view {
            tasks::delete_post(
                self.api.clone(),
                self.tx.clone(),
                state.instance,
                session,
                post_id.to_string(),
            );
        }
    }

    pub fn submit_comment(&mut self, post_id: &str) {
        let Some(session) = self.session.clone() else {
            return;
        };
        let ViewState::Community(state) = &mut self.view else {
            return;
        };
        let comment = state
            .comment_drafts
            .get(post_id)
            .cloned()
            .unwrap_or_default();
        if !require_text(&comment) {
            state.error = Some(DraftError::EmptyComment.to_string());
            return;
        }
        tasks::comment_on_post(
            self.api.clone(),
            self.tx.clone(),
            state.instance,
            session,
            post_id.to_string(),
            comment,
        );
    }

    pub fn view_comments(&mut self, post_id: &str) {
        self.navigate(Route::Comments {
            post_id: post_id.to_string(),
        });
    }

    pub fn submit_detail_comment(&mut self) {
        let Some(session) = self.session.clone() else {
            return;
        };
        let ViewState::Comments(state) = &mut self.view else {
            return;
        };
        if state.sending {
            return;
        }
        if !require_text(&state.comment_text) {
            state.error = Some(DraftError::EmptyComment.to_string());
            return;
        }
        state.sending = true;
        tasks::add_detail_comment(
            self.api.clone(),
            self.tx.clone(),
            state.instance,
            session,
            state.post_id.clone(),
            state.comment_text.clone(),
        );
    }

    pub fn submit_auth(&mut self) {
        let ViewState::Auth(state) = &mut self.view else {
            return;
        };
        if state.submitting {
            return;
        }
        state.info = None;
        match state.mode {
            AuthMode::Login => {
                if !require_text(&state.email) || state.password.is_empty() {
                    state.error = Some(DraftError::MissingCredentials.to_string());
                    return;
                }
                let credentials = Credentials {
                    email: state.email.trim().to_string(),
                    password: state.password.clone(),
                };
                state.submitting = true;
                info!("logging in as {}", credentials.email);
                tasks::login(self.api.clone(), self.tx.clone(), state.instance, credentials);
            }
            AuthMode::Signup => {
                if !require_text(&state.name)
                    || !require_text(&state.email)
                    || state.password.is_empty()
                {
                    state.error = Some(DraftError::MissingSignupFields.to_string());
                    return;
                }
                let input = SignupInput {
                    name: state.name.trim().to_string(),
                    email: state.email.trim().to_string(),
                    password: state.password.clone(),
                };
                state.submitting = true;
                tasks::register(self.api.clone(), self.tx.clone(), state.instance, input);
            }
        }
    }

    pub fn toggle_auth_mode(&mut self) {
        if let ViewState::Auth(state) = &mut self.view {
            state.mode = match state.mode {
                AuthMode::Login => AuthMode::Signup,
                AuthMode::Signup => AuthMode::Login,
            };
            state.error = None;
            state.info = None;
        }
    }
}
