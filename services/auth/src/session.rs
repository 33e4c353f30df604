//! Session state shared by the whole application
//!
//! There is one [`Session`] per running client. It starts out loading, is
//! resolved once by [`Session::restore`] (or by the OAuth completion), and is
//! torn down by [`Session::logout`] or after the backend rejected the token.
//! Consumers read snapshots or subscribe to changes; they never mutate the
//! state directly.

use std::sync::Arc;

use common::{
    error::StorageResult,
    navigation::{Navigator, Route},
    storage::TokenStore,
};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::{models::User, repositories::UserRepository};

/// Authentication state as seen by views and the access gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub authenticated: bool,
    pub user: Option<User>,
    /// No decision is available while this is set
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            authenticated: false,
            user: None,
            loading: true,
        }
    }
}

impl SessionState {
    /// Email of the signed-in user, if any
    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.email.as_str())
    }
}

/// Handle to the application session; clones share the same state
#[derive(Clone)]
pub struct Session {
    state: Arc<watch::Sender<SessionState>>,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
}

impl Session {
    /// Create a session in its loading state
    pub fn new(tokens: Arc<dyn TokenStore>, navigator: Arc<dyn Navigator>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            state: Arc::new(state),
            tokens,
            navigator,
        }
    }

    /// Current state
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Watch state changes
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Wait until the initial check has resolved and return the state then
    pub async fn resolved(&self) -> SessionState {
        let mut changes = self.subscribe();
        match changes.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            // The sender lives in `self`, so it cannot be gone
            Err(_) => self.snapshot(),
        }
    }

    pub fn set_authenticated(&self, authenticated: bool) {
        self.state.send_modify(|state| state.authenticated = authenticated);
    }

    pub fn set_user(&self, user: Option<User>) {
        self.state.send_modify(|state| state.user = user);
    }

    /// Resolve the initial state by asking the backend who the stored token belongs to
    ///
    /// Runs once; later calls leave the resolved state untouched.
    pub async fn restore(&self, users: &UserRepository) {
        if !self.state.borrow().loading {
            return;
        }

        let token = match self.tokens.get() {
            Ok(token) => token,
            Err(e) => {
                error!("Failed to read stored token: {}", e);
                None
            }
        };

        let user = match token {
            None => {
                info!("No stored token, session starts signed out");
                None
            }
            Some(_) => match users.current_user().await {
                Ok(Some(user)) if user.has_identity() => Some(user),
                Ok(_) => {
                    warn!("Backend did not identify the stored token");
                    None
                }
                Err(e) => {
                    warn!("Auth check failed: {}", e);
                    None
                }
            },
        };

        if user.is_none() {
            self.forget_token();
        } else {
            info!("Session restored");
        }

        self.state.send_modify(|state| {
            state.authenticated = user.is_some();
            state.user = user;
            state.loading = false;
        });
    }

    /// Sign out locally and go back to the login page
    ///
    /// The backend is not told; a server-side session cookie outlives this.
    pub fn logout(&self) {
        info!("Logging out");
        self.forget_token();
        self.sign_out();
        self.navigator.navigate(Route::Login);
    }

    /// Drop the signed-in user after the backend rejected the token
    pub fn reset(&self) {
        self.sign_out();
    }

    /// Adopt a signed-in user; used by the OAuth completion
    pub(crate) fn sign_in(&self, user: User) {
        self.state.send_modify(|state| {
            state.user = Some(user);
            state.authenticated = true;
            state.loading = false;
        });
    }

    pub(crate) fn store_token(&self, token: &str) -> StorageResult<()> {
        self.tokens.set(token)
    }

    pub(crate) fn forget_token(&self) {
        if let Err(e) = self.tokens.delete() {
            error!("Failed to clear stored token: {}", e);
        }
    }

    pub(crate) fn navigate(&self, to: Route) {
        self.navigator.navigate(to);
    }

    fn sign_out(&self) {
        self.state.send_modify(|state| {
            state.authenticated = false;
            state.user = None;
            state.loading = false;
        });
    }
}
