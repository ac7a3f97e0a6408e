use std::sync::{Arc, RwLock};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::{multipart, Client, RequestBuilder};
use reqwest::header::AUTHORIZATION;
use reqwest::Url;

use crate::models::{AuthResponse, CreatePostInput, Credentials, LikeResponse, Post, Profile, SignupInput};
use crate::session::Session;

/// Remote operations the pages depend on. Every protected call takes the
/// session explicitly.
pub trait CommunityApi: Send + Sync {
    fn base_url(&self) -> String;
    fn set_base_url(&self, base_url: &str) -> Result<()>;

    fn login(&self, credentials: &Credentials) -> Result<AuthResponse>;
    fn register(&self, input: &SignupInput) -> Result<()>;

    fn list_posts(&self, session: &Session) -> Result<Vec<Post>>;
    fn get_post(&self, session: &Session, post_id: &str) -> Result<Post>;
    fn create_post(&self, session: &Session, input: &CreatePostInput) -> Result<Post>;
    fn like_post(&self, session: &Session, post_id: &str) -> Result<LikeResponse>;
    fn comment_on_post(&self, session: &Session, post_id: &str, comment: &str) -> Result<Post>;
    fn delete_post(&self, session: &Session, post_id: &str) -> Result<()>;
    fn get_profile(&self, session: &Session) -> Result<Profile>;

    fn download_image(&self, url: &str) -> Result<Vec<u8>>;
}

pub type SharedApi = Arc<dyn CommunityApi>;

#[derive(Clone)]
pub struct ApiClient {
    base_url: Arc<RwLock<String>>,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base = sanitize_base_url(base_url.into())?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            base_url: Arc::new(RwLock::new(base)),
            client,
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url()).context("invalid base URL")?;
        url.set_path(path.trim_start_matches('/'));
        Ok(url)
    }

    fn authorized(&self, builder: RequestBuilder, session: &Session) -> RequestBuilder {
        builder.header(AUTHORIZATION, session.bearer())
    }
}

impl CommunityApi for ApiClient {
    fn base_url(&self) -> String {
        self.base_url
            .read()
            .map(|base| base.clone())
            .unwrap_or_default()
    }

    fn set_base_url(&self, base_url: &str) -> Result<()> {
        let sanitized = sanitize_base_url(base_url.to_string())?;
        let mut guard = self
            .base_url
            .write()
            .map_err(|_| anyhow!("base URL lock poisoned"))?;
        *guard = sanitized;
        Ok(())
    }

    fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        let url = self.url("/carbonTrack/login")?;
        let response = self
            .client
            .post(url)
            .json(credentials)
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    fn register(&self, input: &SignupInput) -> Result<()> {
        let url = self.url("/carbonTrack/register")?;
        self.client
            .post(url)
            .json(input)
            .send()?
            .error_for_status()?;
        Ok(())
    }

    fn list_posts(&self, session: &Session) -> Result<Vec<Post>> {
        let url = self.url("/community")?;
        let response = self
            .authorized(self.client.get(url), session)
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    fn get_post(&self, session: &Session, post_id: &str) -> Result<Post> {
        let url = self.url(&format!("/community/{post_id}"))?;
        let response = self
            .authorized(self.client.get(url), session)
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    fn create_post(&self, session: &Session, input: &CreatePostInput) -> Result<Post> {
        let url = self.url("/community/upload")?;
        let mut form = multipart::Form::new()
            .text("userId", input.user_id.clone())
            .text("user_name", input.user_name.clone())
            .text("postTitle", input.title.clone())
            .text("postCaption", input.caption.clone());
        if let Some(path) = &input.image {
            form = form
                .file("image", path)
                .with_context(|| format!("failed to attach {}", path.display()))?;
        }
        let response = self
            .authorized(self.client.post(url), session)
            .multipart(form)
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    fn like_post(&self, session: &Session, post_id: &str) -> Result<LikeResponse> {
        let url = self.url(&format!("/community/{post_id}/like"))?;
        let response = self
            .authorized(self.client.post(url), session)
            .json(&serde_json::json!({}))
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    fn comment_on_post(&self, session: &Session, post_id: &str, comment: &str) -> Result<Post> {
        let url = self.url(&format!("/community/{post_id}/comment"))?;
        let response = self
            .authorized(self.client.post(url), session)
            .query(&[("comment", comment)])
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    fn delete_post(&self, session: &Session, post_id: &str) -> Result<()> {
        let url = self.url(&format!("/community/{post_id}"))?;
        self.authorized(self.client.delete(url), session)
            .send()?
            .error_for_status()?;
        Ok(())
    }

    fn get_profile(&self, session: &Session) -> Result<Profile> {
        let url = self.url(&format!("/carbonTrack/profile/{}", session.user_id))?;
        let response = self
            .authorized(self.client.get(url), session)
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    fn download_image(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

/// Images come back as paths on the API host; absolute URLs pass through.
pub fn resolve_image_url(base_url: &str, image_url: &str) -> String {
    if image_url.starts_with("http://") || image_url.starts_with("https://") {
        image_url.to_string()
    } else if image_url.starts_with('/') {
        format!("{base_url}{image_url}")
    } else {
        format!("{base_url}/{image_url}")
    }
}

pub fn sanitize_base_url(mut base: String) -> Result<String> {
    base = base.trim().to_string();
    if !base.starts_with("http://") && !base.starts_with("https://") {
        base = format!("http://{base}");
    }
    while base.ends_with('/') {
        base.pop();
    }
    let _ = Url::parse(&base).context("invalid base URL")?;
    Ok(base)
}
