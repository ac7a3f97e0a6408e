use std::path::PathBuf;

use crate::models::{AuthResponse, LikeResponse, Post, Profile};

use super::state::LoadedImage;
use super::CarbonTrackApp;

/// Results delivered from worker threads. Page-scoped variants carry the
/// instance number of the page that spawned them.
pub enum AppMessage {
    LoggedIn {
        instance: u64,
        result: Result<AuthResponse, anyhow::Error>,
    },
    SignedUp {
        instance: u64,
        result: Result<(), anyhow::Error>,
    },
    PostsLoaded {
        instance: u64,
        result: Result<Vec<Post>, anyhow::Error>,
    },
    ProfileLoaded {
        instance: u64,
        result: Result<Profile, anyhow::Error>,
    },
    PostCreated {
        instance: u64,
        result: Result<Post, anyhow::Error>,
    },
    PostLiked {
        instance: u64,
        post_id: String,
        result: Result<LikeResponse, anyhow::Error>,
    },
    PostDeleted {
        instance: u64,
        post_id: String,
        result: Result<(), anyhow::Error>,
    },
    CommentAdded {
        instance: u64,
        post_id: String,
        result: Result<Post, anyhow::Error>,
    },
    PostLoaded {
        instance: u64,
        post_id: String,
        result: Result<Post, anyhow::Error>,
    },
    DetailCommentAdded {
        instance: u64,
        post_id: String,
        comment: String,
        result: Result<(), anyhow::Error>,
    },
    ImagePicked {
        instance: u64,
        path: PathBuf,
    },
    ImageLoaded {
        url: String,
        result: Result<LoadedImage, String>,
    },
}

impl AppMessage {
    pub fn label(&self) -> &'static str {
        match self {
            AppMessage::LoggedIn { .. } => "LoggedIn",
            AppMessage::SignedUp { .. } => "SignedUp",
            AppMessage::PostsLoaded { .. } => "PostsLoaded",
            AppMessage::ProfileLoaded { .. } => "ProfileLoaded",
            AppMessage::PostCreated { .. } => "PostCreated",
            AppMessage::PostLiked { .. } => "PostLiked",
            AppMessage::PostDeleted { .. } => "PostDeleted",
            AppMessage::CommentAdded { .. } => "CommentAdded",
            AppMessage::PostLoaded { .. } => "PostLoaded",
            AppMessage::DetailCommentAdded { .. } => "DetailCommentAdded",
            AppMessage::ImagePicked { .. } => "ImagePicked",
            AppMessage::ImageLoaded { .. } => "ImageLoaded",
        }
    }
}

pub(super) fn process_messages(app: &mut CarbonTrackApp) {
    while let Ok(message) = app.rx.try_recv() {
        handle_message(app, message);
    }
}

pub(super) fn handle_message(app: &mut CarbonTrackApp, message: AppMessage) {
    match message {
        AppMessage::LoggedIn { instance, result } => app.handle_logged_in(instance, result),
        AppMessage::SignedUp { instance, result } => app.handle_signed_up(instance, result),
        AppMessage::PostsLoaded { instance, result } => app.handle_posts_loaded(instance, result),
        AppMessage::ProfileLoaded { instance, result } => {
            app.handle_profile_loaded(instance, result)
        }
        AppMessage::PostCreated { instance, result } => app.handle_post_created(instance, result),
        AppMessage::PostLiked {
            instance,
            post_id,
            result,
        } => app.handle_post_liked(instance, post_id, result),
        AppMessage::PostDeleted {
            instance,
            post_id,
            result,
        } => app.handle_post_deleted(instance, post_id, result),
        AppMessage::CommentAdded {
            instance,
            post_id,
            result,
        } => app.handle_comment_added(instance, post_id, result),
        AppMessage::PostLoaded {
            instance,
            post_id,
            result,
        } => app.handle_post_loaded(instance, post_id, result),
        AppMessage::DetailCommentAdded {
            instance,
            post_id,
            comment,
            result,
        } => app.handle_detail_comment_added(instance, post_id, comment, result),
        AppMessage::ImagePicked { instance, path } => app.handle_image_picked(instance, path),
        AppMessage::ImageLoaded { url, result } => app.images.finish(url, result),
    }
}
