use log::{debug, error};

use crate::models::Post;

use super::feedback::RemoteFailure;
use super::state::ViewState;
use super::CarbonTrackApp;

impl CarbonTrackApp {
    pub(super) fn handle_post_loaded(
        &mut self,
        instance: u64,
        post_id: String,
        result: Result<Post, anyhow::Error>,
    ) {
        let ViewState::Comments(state) = &mut self.view else {
            debug!("dropping PostLoaded for {post_id}: comments page not mounted");
            return;
        };
        if state.instance != instance || state.post_id != post_id {
            debug!("dropping stale PostLoaded for {post_id}");
            return;
        }
        match result {
            Ok(post) => state.post = Some(post),
            Err(err) => {
                error!("Error fetching post {post_id}: {err:#}");
                state.error = Some(RemoteFailure::FetchPost.to_string());
            }
        }
    }

    /// Appends the text as submitted; the response body is not consulted.
    pub(super) fn handle_detail_comment_added(
        &mut self,
        instance: u64,
        post_id: String,
        comment: String,
        result: Result<(), anyhow::Error>,
    ) {
        let ViewState::Comments(state) = &mut self.view else {
            debug!("dropping DetailCommentAdded for {post_id}: comments page not mounted");
            return;
        };
        if state.instance != instance || state.post_id != post_id {
            debug!("dropping stale DetailCommentAdded for {post_id}");
            return;
        }
        state.sending = false;
        match result {
            Ok(()) => {
                if let Some(post) = &mut state.post {
                    post.comments.push(comment);
                }
                state.comment_text.clear();
            }
            Err(err) => {
                error!("Error adding comment to {post_id}: {err:#}");
                state.error = Some(RemoteFailure::AddComment.to_string());
            }
        }
    }
}
