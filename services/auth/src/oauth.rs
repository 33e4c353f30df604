//! OAuth2 sign-in: starting the provider flow and finishing it on return
//!
//! The provider dance itself happens between the browser, the provider and
//! the backend. The client only sends the user to the backend's authorization
//! endpoint and, on the way back, reads the token the backend put on the
//! callback URL.

use common::{error::RequestResult, gateway::Gateway, navigation::Route};
use reqwest::Url;
use tracing::{error, info, warn};

use crate::{gate::landing_route, repositories::UserRepository, session::Session};

/// Identity providers the backend can redirect to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
}

impl OAuthProvider {
    /// Get the provider name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
        }
    }
}

/// Backend URL that starts the provider flow (a full-page redirect, not an API call)
pub fn authorization_url(gateway: &Gateway, provider: OAuthProvider) -> RequestResult<Url> {
    gateway.endpoint(&["oauth2", "authorization", provider.as_str()])
}

/// Extract the token from what the callback received
///
/// Accepts the full callback URL, a bare `?token=...` query, or the token itself.
pub fn callback_token(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let from_query = |url: Url| {
        url.query_pairs()
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned())
            .filter(|token| !token.is_empty())
    };

    match Url::parse(input) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => return from_query(url),
        _ => {}
    }

    if let Some(query) = input.strip_prefix('?') {
        // Any absolute base works for parsing a detached query
        return Url::parse(&format!("http://callback.invalid/?{}", query))
            .ok()
            .and_then(from_query);
    }

    Some(input.to_string())
}

/// Finish a sign-in after the provider sent the user back
///
/// Persists the token when one came back, asks the backend who signed in,
/// and moves the application to the user's landing route. Any failure clears
/// the token and sends the application to the login page. Returns the route
/// navigated to.
pub async fn complete_login(
    session: &Session,
    users: &UserRepository,
    token: Option<&str>,
) -> Route {
    if let Some(token) = token {
        if let Err(e) = session.store_token(token) {
            error!("Failed to store token: {}", e);
        }
    }

    let route = match users.current_user().await {
        Ok(Some(user)) if user.has_identity() => {
            info!("Signed in as {}", user.email);
            let route = landing_route(&user);
            session.sign_in(user);
            route
        }
        Ok(_) => {
            warn!("No user data received after sign-in");
            fail_login(session)
        }
        Err(e) => {
            warn!("Failed to fetch user after OAuth: {}", e);
            fail_login(session)
        }
    };

    session.navigate(route);
    route
}

fn fail_login(session: &Session) -> Route {
    session.forget_token();
    session.reset();
    Route::Login
}
