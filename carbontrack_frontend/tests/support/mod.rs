#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use carbontrack_frontend::api::CommunityApi;
use carbontrack_frontend::config::FrontendConfig;
use carbontrack_frontend::models::{
    AuthResponse, CreatePostInput, Credentials, LikeResponse, Post, Profile, SignupInput,
};
use carbontrack_frontend::router::Route;
use carbontrack_frontend::session::{MemorySessionStore, Session, StoredSession};
use carbontrack_frontend::CarbonTrackApp;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(String),
    Register(String),
    ListPosts,
    GetPost(String),
    CreatePost(CreatePostInput),
    LikePost(String),
    Comment(String, String),
    DeletePost(String),
    Profile(String),
}

/// In-memory stand-in for the remote API that records every call.
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    failing: Mutex<HashSet<&'static str>>,
    pub posts: Mutex<Vec<Post>>,
    pub like_count: Mutex<u64>,
    pub comment_response: Mutex<Option<Post>>,
}

impl FakeApi {
    pub fn new(posts: Vec<Post>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            posts: Mutex::new(posts),
            like_count: Mutex::new(1),
            comment_response: Mutex::new(None),
        })
    }

    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| matches(call)).count()
    }

    fn record(&self, call: Call, operation: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(operation) {
            return Err(anyhow!("{operation} rejected by fake server"));
        }
        Ok(())
    }

    fn find(&self, post_id: &str) -> Result<Post> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == post_id)
            .cloned()
            .ok_or_else(|| anyhow!("404 for {post_id}"))
    }
}

impl CommunityApi for FakeApi {
    fn base_url(&self) -> String {
        "http://fake.test".into()
    }

    fn set_base_url(&self, _base_url: &str) -> Result<()> {
        Ok(())
    }

    fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        self.record(Call::Login(credentials.email.clone()), "login")?;
        Ok(AuthResponse {
            user_id: "u1".into(),
            token: "jwt-u1".into(),
        })
    }

    fn register(&self, input: &SignupInput) -> Result<()> {
        self.record(Call::Register(input.email.clone()), "register")
    }

    fn list_posts(&self, _session: &Session) -> Result<Vec<Post>> {
        self.record(Call::ListPosts, "list_posts")?;
        Ok(self.posts.lock().unwrap().clone())
    }

    fn get_post(&self, _session: &Session, post_id: &str) -> Result<Post> {
        self.record(Call::GetPost(post_id.into()), "get_post")?;
        self.find(post_id)
    }

    fn create_post(&self, _session: &Session, input: &CreatePostInput) -> Result<Post> {
        self.record(Call::CreatePost(input.clone()), "create_post")?;
        Ok(Post {
            id: "created".into(),
            title: input.title.clone(),
            caption: input.caption.clone(),
            user_id: Some(input.user_id.clone()),
            user_name: Some(input.user_name.clone()),
            ..post("unused", "", 0)
        })
    }

    fn like_post(&self, _session: &Session, post_id: &str) -> Result<LikeResponse> {
        self.record(Call::LikePost(post_id.into()), "like_post")?;
        Ok(LikeResponse {
            likes: *self.like_count.lock().unwrap(),
        })
    }

    fn comment_on_post(&self, _session: &Session, post_id: &str, comment: &str) -> Result<Post> {
        self.record(Call::Comment(post_id.into(), comment.into()), "comment")?;
        if let Some(response) = self.comment_response.lock().unwrap().clone() {
            return Ok(response);
        }
        let mut post = self.find(post_id)?;
        post.comments.push(comment.to_string());
        Ok(post)
    }

    fn delete_post(&self, _session: &Session, post_id: &str) -> Result<()> {
        self.record(Call::DeletePost(post_id.into()), "delete_post")
    }

    fn get_profile(&self, session: &Session) -> Result<Profile> {
        self.record(Call::Profile(session.user_id.clone()), "profile")?;
        Ok(Profile {
            name: "Ada".into(),
            email: "ada@example.org".into(),
        })
    }

    fn download_image(&self, _url: &str) -> Result<Vec<u8>> {
        Err(anyhow!("no images in tests"))
    }
}

pub fn post(id: &str, title: &str, likes: u64) -> Post {
    Post {
        id: id.into(),
        title: title.into(),
        caption: format!("{title} caption"),
        image_url: None,
        likes,
        comments: Vec::new(),
        user_id: None,
        user_name: None,
        created_at: None,
    }
}

pub fn feed() -> Vec<Post> {
    vec![post("p1", "Bike week", 1), post("p2", "Solar panels", 2), post("p3", "Compost", 0)]
}

pub fn signed_in_store() -> MemorySessionStore {
    MemorySessionStore::with_record(StoredSession {
        user_id: Some("u1".into()),
        token: Some("jwt-u1".into()),
    })
}

pub fn start(api: &Arc<FakeApi>, store: &MemorySessionStore, route: Route) -> CarbonTrackApp {
    let config = FrontendConfig {
        start_route: route,
        ..FrontendConfig::default()
    };
    CarbonTrackApp::with_parts(&config, api.clone(), Box::new(store.clone()))
}

/// Applies exactly `n` task results, failing if any is missing.
pub fn settle(app: &mut CarbonTrackApp, n: usize) {
    for i in 0..n {
        assert!(
            app.pump_blocking(Duration::from_secs(5)),
            "expected task result {} of {n}",
            i + 1
        );
    }
}

/// True when no further task result shows up shortly.
pub fn quiet(app: &mut CarbonTrackApp) -> bool {
    !app.pump_blocking(Duration::from_millis(150))
}
