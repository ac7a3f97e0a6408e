use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use crate::models::{Post, Profile};
use crate::router::Route;

pub enum ViewState {
    Home,
    CarbonTracker,
    Location,
    Auth(AuthState),
    Community(CommunityState),
    Comments(CommentsState),
}

#[derive(Debug, Default)]
pub struct NewPostDraft {
    pub title: String,
    pub caption: String,
    pub image: Option<PathBuf>,
    pub submitting: bool,
}

#[derive(Debug, Default)]
pub struct CommunityState {
    pub instance: u64,
    pub posts: Vec<Post>,
    pub posts_loading: bool,
    pub profile: Profile,
    pub new_post: NewPostDraft,
    /// Inline comment drafts keyed by post id.
    pub comment_drafts: HashMap<String, String>,
    /// Post ids liked from this page instance. Not persisted and not
    /// reconciled with the server.
    pub liked_posts: HashSet<String>,
    pub likes_pending: HashSet<String>,
    pub error: Option<String>,
    /// Blocking notice; the feed is not interactive until it is dismissed.
    pub notice: Option<String>,
}

impl CommunityState {
    pub fn new(instance: u64) -> Self {
        Self {
            instance,
            posts_loading: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct CommentsState {
    pub instance: u64,
    pub post_id: String,
    pub post: Option<Post>,
    pub comment_text: String,
    pub sending: bool,
    pub error: Option<String>,
}

impl CommentsState {
    pub fn new(instance: u64, post_id: String) -> Self {
        Self {
            instance,
            post_id,
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

#[derive(Debug, Default)]
pub struct AuthState {
    pub instance: u64,
    pub mode: AuthMode,
    pub name: String,
    pub email: String,
    pub password: String,
    pub submitting: bool,
    pub error: Option<String>,
    pub info: Option<String>,
}

impl AuthState {
    pub fn new(instance: u64) -> Self {
        Self {
            instance,
            ..Default::default()
        }
    }
}

#[derive(Clone)]
pub struct LoadedImage {
    pub size: [usize; 2],
    pub pixels: Vec<u8>,
}

/// What a rendered page asks the shell to do once the frame's borrows end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    Navigate(Route),
    Logout,
    Refresh,
    SubmitPost,
    PickImage,
    ClearImage,
    Like(String),
    Delete(String),
    SubmitComment(String),
    ViewComments(String),
    SubmitDetailComment,
    SubmitAuth,
    ToggleAuthMode,
    DismissError,
    DismissNotice,
}
