use std::path::PathBuf;

use log::{debug, error};

use crate::models::{LikeResponse, Post, Profile};

use super::feedback::RemoteFailure;
use super::state::{CommunityState, NewPostDraft, ViewState};
use super::CarbonTrackApp;

impl CarbonTrackApp {
    fn community_instance(&mut self, instance: u64, label: &str) -> Option<&mut CommunityState> {
        match &mut self.view {
            ViewState::Community(state) if state.instance == instance => Some(state),
            _ => {
                debug!("dropping stale {label} result for page instance {instance}");
                None
            }
        }
    }

    pub(super) fn handle_posts_loaded(
        &mut self,
        instance: u64,
        result: Result<Vec<Post>, anyhow::Error>,
    ) {
        let Some(state) = self.community_instance(instance, "PostsLoaded") else {
            return;
        };
        state.posts_loading = false;
        match result {
            Ok(posts) => {
                state
                    .comment_drafts
                    .retain(|id, _| posts.iter().any(|p| &p.id == id));
                state.posts = posts;
            }
            Err(err) => {
                error!("Error fetching posts: {err:#}");
                state.error = Some(RemoteFailure::FetchPosts.to_string());
            }
        }
    }

    pub(super) fn handle_profile_loaded(
        &mut self,
        instance: u64,
        result: Result<Profile, anyhow::Error>,
    ) {
        let Some(state) = self.community_instance(instance, "ProfileLoaded") else {
            return;
        };
        match result {
            Ok(profile) => state.profile = profile,
            // The feed still renders; new posts go out with an empty user_name.
            Err(err) => error!("Error fetching user data: {err:#}"),
        }
    }

    pub(super) fn handle_post_created(&mut self, instance: u64, result: Result<Post, anyhow::Error>) {
        let Some(state) = self.community_instance(instance, "PostCreated") else {
            return;
        };
        state.new_post.submitting = false;
        match result {
            Ok(post) => {
                // The feed shows only the new post until the next full fetch.
                state.posts = vec![post];
                state.new_post = NewPostDraft::default();
            }
            Err(err) => {
                error!("Error creating post: {err:#}");
                state.error = Some(RemoteFailure::CreatePost.to_string());
            }
        }
    }

    pub(super) fn handle_post_liked(
        &mut self,
        instance: u64,
        post_id: String,
        result: Result<LikeResponse, anyhow::Error>,
    ) {
        let Some(state) = self.community_instance(instance, "PostLiked") else {
            return;
        };
        state.likes_pending.remove(&post_id);
        match result {
            Ok(response) => {
                if let Some(post) = state.posts.iter_mut().find(|p| p.id == post_id) {
                    post.likes = response.likes;
                }
                state.liked_posts.insert(post_id);
            }
            Err(err) => {
                error!("Error liking post {post_id}: {err:#}");
                state.error = Some(RemoteFailure::LikePost.to_string());
            }
        }
    }

    pub(super) fn handle_post_deleted(
        &mut self,
        instance: u64,
        post_id: String,
        result: Result<(), anyhow::Error>,
    ) {
        let Some(state) = self.community_instance(instance, "PostDeleted") else {
            return;
        };
        match result {
            Ok(()) => {
                state.posts.retain(|p| p.id != post_id);
                state.comment_drafts.remove(&post_id);
            }
            Err(err) => {
                error!("Error deleting post {post_id}: {err:#}");
                state.error = Some(RemoteFailure::DeletePost.to_string());
            }
        }
    }

    pub(super) fn handle_comment_added(
        &mut self,
        instance: u64,
        post_id: String,
        result: Result<Post, anyhow::Error>,
    ) {
        let Some(state) = self.community_instance(instance, "CommentAdded") else {
            return;
        };
        match result {
            Ok(updated) => {
                if let Some(slot) = state.posts.iter_mut().find(|p| p.id == post_id) {
                    *slot = updated;
                }
                state.comment_drafts.remove(&post_id);
            }
            Err(err) => {
                error!("Error adding comment to {post_id}: {err:#}");
                state.error = Some(RemoteFailure::AddComment.to_string());
            }
        }
    }

    pub(super) fn handle_image_picked(&mut self, instance: u64, path: PathBuf) {
        if let Some(state) = self.community_instance(instance, "ImagePicked") {
            state.new_post.image = Some(path);
        }
    }
}
