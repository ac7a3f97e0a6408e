use log::{debug, error, info};

use crate::models::AuthResponse;
use crate::router::Route;
use crate::session::Session;

use super::feedback::{RemoteFailure, ACCOUNT_CREATED};
use super::state::{AuthMode, ViewState};
use super::CarbonTrackApp;

impl CarbonTrackApp {
    pub(super) fn handle_logged_in(
        &mut self,
        instance: u64,
        result: Result<AuthResponse, anyhow::Error>,
    ) {
        let ViewState::Auth(state) = &mut self.view else {
            debug!("dropping LoggedIn: auth page not mounted");
            return;
        };
        if state.instance != instance {
            debug!("dropping stale LoggedIn for page instance {instance}");
            return;
        }
        state.submitting = false;
        let auth = match result {
            Ok(auth) => auth,
            Err(err) => {
                error!("Error logging in: {err:#}");
                state.error = Some(RemoteFailure::Login.to_string());
                return;
            }
        };
        let Some(session) = Session::from_parts(Some(auth.user_id), Some(auth.token)) else {
            error!("login response carried an empty user id or token");
            state.error = Some(RemoteFailure::Login.to_string());
            return;
        };
        if let Err(err) = self.store.save(&session) {
            error!("Error saving session: {err:#}");
            state.error = Some(RemoteFailure::SaveSession.to_string());
            return;
        }
        info!("logged in as user {}", session.user_id);
        self.session = Some(session);
        self.navigate(Route::Community);
    }

    pub(super) fn handle_signed_up(&mut self, instance: u64, result: Result<(), anyhow::Error>) {
        let ViewState::Auth(state) = &mut self.view else {
            debug!("dropping SignedUp: auth page not mounted");
            return;
        };
        if state.instance != instance {
            debug!("dropping stale SignedUp for page instance {instance}");
            return;
        }
        state.submitting = false;
        match result {
            Ok(()) => {
                state.mode = AuthMode::Login;
                state.password.clear();
                state.error = None;
                state.info = Some(ACCOUNT_CREATED.to_string());
            }
            Err(err) => {
                error!("Error signing up: {err:#}");
                state.error = Some(RemoteFailure::Signup.to_string());
            }
        }
    }
}
