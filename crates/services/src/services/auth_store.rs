//! Observable sign-in state on top of `AuthService` and the shared `Session`.

use tokio::sync::watch;
use tracing::{info, warn};

use super::{api_client::ApiClient, auth::AuthService, session::Session};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Holds `AuthState` and publishes every change to subscribers
#[derive(Debug)]
pub struct AuthStore {
    auth: AuthService,
    session: Session,
    state: watch::Sender<AuthState>,
}

impl AuthStore {
    /// Starts signed in if the client's session already carries a token
    pub fn new(client: ApiClient) -> Self {
        let session = client.session().clone();
        let (state, _) = watch::channel(AuthState {
            token: session.token(),
            ..Default::default()
        });
        Self {
            auth: AuthService::new(client),
            session,
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Returns whether sign-in succeeded; the failure reason lands in `AuthState::error`
    pub async fn login(&self, username: &str, password: &str) -> bool {
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.auth.login(username, password).await {
            Ok(response) => {
                self.session.set_token(Some(response.access_token.clone()));
                self.state.send_modify(|s| {
                    s.token = Some(response.access_token);
                    s.is_loading = false;
                });
                info!(username, "Signed in");
                true
            }
            Err(e) => {
                warn!(username, error = %e, "Sign-in failed");
                self.state.send_modify(|s| {
                    s.error = Some(e.to_string());
                    s.is_loading = false;
                });
                false
            }
        }
    }

    /// Swap the current token for a fresh one. A rejected refresh signs out.
    pub async fn refresh(&self) -> bool {
        if !self.session.has_token() {
            return false;
        }

        match self.auth.refresh().await {
            Ok(response) => {
                self.session.set_token(Some(response.access_token.clone()));
                self.state.send_modify(|s| s.token = Some(response.access_token));
                true
            }
            Err(e) if e.is_unauthorized() => {
                warn!(error = %e, "Token refresh rejected, signing out");
                self.logout();
                false
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                self.state.send_modify(|s| s.error = Some(e.to_string()));
                false
            }
        }
    }

    pub fn logout(&self) {
        self.session.clear();
        self.state.send_replace(AuthState::default());
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }
}
