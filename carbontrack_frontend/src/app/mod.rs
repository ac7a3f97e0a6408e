use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use eframe::egui::{self, Context};
use log::{error, info};

use crate::api::{ApiClient, SharedApi};
use crate::config::FrontendConfig;
use crate::router::Route;
use crate::session::{FileSessionStore, Session, SessionStore};

pub mod feedback;
mod handlers_auth;
mod handlers_comments;
mod handlers_community;
mod images;
mod messages;
mod spawners;
pub mod state;
mod tasks;
mod ui;

use images::ImageCache;
use messages::AppMessage;
use state::{AuthState, CommentsState, CommunityState, PageAction, ViewState};

pub struct CarbonTrackApp {
    api: SharedApi,
    store: Box<dyn SessionStore>,
    session: Option<Session>,
    tx: Sender<AppMessage>,
    rx: Receiver<AppMessage>,
    route: Route,
    view: ViewState,
    last_instance: u64,
    base_url_input: String,
    info_banner: Option<String>,
    images: ImageCache,
}

impl CarbonTrackApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> anyhow::Result<Self> {
        let config = FrontendConfig::from_env();
        let api = ApiClient::new(config.api_url.clone(), config.request_timeout)?;
        let store = FileSessionStore::new(&config.data_dir);
        info!("session file at {}", store.path().display());
        Ok(Self::with_parts(&config, Arc::new(api), Box::new(store)))
    }

    /// Builds the shell around an explicit API and session store, then
    /// mounts the configured start route.
    pub fn with_parts(
        config: &FrontendConfig,
        api: SharedApi,
        store: Box<dyn SessionStore>,
    ) -> Self {
        let session = store.load().unwrap_or_else(|err| {
            error!("failed to load stored session: {err:#}");
            None
        });
        let (tx, rx) = mpsc::channel();
        let images = ImageCache::new(api.clone(), tx.clone());

        let mut app = Self {
            base_url_input: api.base_url(),
            api,
            store,
            session,
            tx,
            rx,
            route: Route::Home,
            view: ViewState::Home,
            last_instance: 0,
            info_banner: None,
            images,
        };
        app.navigate(config.start_route.clone());
        app
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn community(&self) -> Option<&CommunityState> {
        match &self.view {
            ViewState::Community(state) => Some(state),
            _ => None,
        }
    }

    pub fn comments(&self) -> Option<&CommentsState> {
        match &self.view {
            ViewState::Comments(state) => Some(state),
            _ => None,
        }
    }

    pub fn auth(&self) -> Option<&AuthState> {
        match &self.view {
            ViewState::Auth(state) => Some(state),
            _ => None,
        }
    }

    /// Mounts a fresh page for `route`. Protected routes without a session
    /// land on the auth page instead, before any request is made.
    pub fn navigate(&mut self, route: Route) {
        if route.requires_session() && self.session.is_none() {
            info!("no session for {route}, redirecting to {}", Route::Auth);
            self.navigate(Route::Auth);
            return;
        }
        info!("navigating to {route}");
        self.last_instance += 1;
        let instance = self.last_instance;
        self.view = match &route {
            Route::Home => ViewState::Home,
            Route::CarbonTracker => ViewState::CarbonTracker,
            Route::Location => ViewState::Location,
            Route::Auth => ViewState::Auth(AuthState::new(instance)),
            Route::Community => ViewState::Community(CommunityState::new(instance)),
            Route::Comments { post_id } => {
                ViewState::Comments(CommentsState::new(instance, post_id.clone()))
            }
        };
        self.route = route;
        self.mount();
    }

    fn mount(&mut self) {
        match &self.view {
            ViewState::Community(_) => {
                self.spawn_load_posts();
                self.spawn_load_profile();
            }
            ViewState::Comments(_) => self.spawn_load_post(),
            _ => {}
        }
    }

    /// Forgets the session locally and in the store. No server call.
    pub fn logout(&mut self) {
        if let Err(err) = self.store.clear() {
            error!("failed to clear stored session: {err:#}");
        }
        self.session = None;
        info!("logged out");
        self.navigate(Route::Auth);
    }

    pub fn apply(&mut self, action: PageAction) {
        match action {
            PageAction::Navigate(route) => self.navigate(route),
            PageAction::Logout => self.logout(),
            PageAction::Refresh => self.refresh_posts(),
            PageAction::SubmitPost => self.submit_post(),
            PageAction::PickImage => self.pick_image(),
            PageAction::ClearImage => {
                if let ViewState::Community(state) = &mut self.view {
                    state.new_post.image = None;
                }
            }
            PageAction::Like(post_id) => self.like_post(&post_id),
            PageAction::Delete(post_id) => self.delete_post(&post_id),
            PageAction::SubmitComment(post_id) => self.submit_comment(&post_id),
            PageAction::ViewComments(post_id) => self.view_comments(&post_id),
            PageAction::SubmitDetailComment => self.submit_detail_comment(),
            PageAction::SubmitAuth => self.submit_auth(),
            PageAction::ToggleAuthMode => self.toggle_auth_mode(),
            PageAction::DismissError => match &mut self.view {
                ViewState::Community(state) => state.error = None,
                ViewState::Comments(state) => state.error = None,
                ViewState::Auth(state) => state.error = None,
                _ => {}
            },
            PageAction::DismissNotice => {
                if let ViewState::Community(state) = &mut self.view {
                    state.notice = None;
                }
            }
        }
    }

    pub fn process_messages(&mut self) {
        messages::process_messages(self);
    }

    /// Blocks until one task result arrives and applies it. Returns `false`
    /// on timeout.
    pub fn pump_blocking(&mut self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(message) => {
                messages::handle_message(self, message);
                true
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    fn apply_base_url(&mut self) {
        match self.api.set_base_url(&self.base_url_input) {
            Ok(()) => {
                self.base_url_input = self.api.base_url();
                self.info_banner = Some("API URL updated".into());
                let route = self.route.clone();
                self.navigate(route);
            }
            Err(err) => {
                self.info_banner = Some(format!("Failed to update URL: {err}"));
            }
        }
    }
}

impl eframe::App for CarbonTrackApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.process_messages();

        let mut actions = ui::shell::render_top_bar(self, ctx);

        let base_url = self.api.base_url();
        egui::CentralPanel::default().show(ctx, |ui| {
            let page_actions = match &mut self.view {
                ViewState::Home => ui::pages::render_home(ui),
                ViewState::CarbonTracker => ui::pages::render_carbon_tracker(ui),
                ViewState::Location => ui::pages::render_location(ui),
                ViewState::Auth(state) => ui::auth::render_auth(ui, state),
                ViewState::Community(state) => {
                    ui::community::render_community(ui, state, &mut self.images, &base_url)
                }
                ViewState::Comments(state) => {
                    ui::comments::render_comments(ui, state, &mut self.images, &base_url)
                }
            };
            actions.extend(page_actions);
        });

        if let ViewState::Community(state) = &self.view {
            if let Some(notice) = &state.notice {
                if ui::community::render_notice(ctx, notice) {
                    actions.push(PageAction::DismissNotice);
                }
            }
        }

        for action in actions {
            self.apply(action);
        }

        // Worker threads cannot wake the UI, so keep polling while idle.
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

pub(crate) fn format_timestamp(ts: &str) -> String {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| {
            dt.with_timezone(&Utc)
                .format("%Y-%m-%d %H:%M UTC")
                .to_string()
        })
        .unwrap_or_else(|_| ts.to_string())
}
