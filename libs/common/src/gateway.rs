//! Request gateway
//!
//! Every backend call goes through [`Gateway`]: it attaches the JSON content
//! type, the stored bearer token and the session cookies, turns error answers
//! into [`RequestError`]s, and sends the whole application back to the login
//! page when the backend answers 401.

use std::sync::Arc;

use reqwest::{
    Client, Method, StatusCode, Url,
    header::{CONTENT_TYPE, HeaderValue},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::{
    config::ClientConfig,
    error::{RequestError, RequestResult},
    navigation::{Navigator, Route},
    storage::TokenStore,
};

/// Error body convention of the backend
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Single entry point for backend calls
pub struct Gateway {
    client: Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
}

impl Gateway {
    /// Create a gateway for the configured backend
    pub fn new(
        config: &ClientConfig,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> RequestResult<Self> {
        let base_url = config
            .base_url()
            .map_err(|e| RequestError::InvalidEndpoint(e.to_string()))?;

        // Session cookies set by the OAuth completion travel with every call
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(RequestError::Transport)?;

        Ok(Self {
            client,
            base_url,
            tokens,
            navigator,
        })
    }

    /// Base URL of the backend
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Token storage shared with the session
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Navigator used for the login redirect
    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Build the URL of an endpoint; each segment is percent-encoded on its own
    pub fn endpoint(&self, segments: &[&str]) -> RequestResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RequestError::InvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Perform one call and return the parsed JSON body, `None` for an empty body
    pub async fn call(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&Value>,
    ) -> RequestResult<Option<Value>> {
        let url = self.endpoint(segments)?;
        let result = self.execute(method.clone(), url.clone(), body).await;

        if let Err(e) = &result {
            if !e.is_unauthorized() {
                error!("API error on {} {}: {}", method, url.path(), e);
            }
        }

        result
    }

    /// Perform one call with a typed body and a typed answer
    pub async fn send<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> RequestResult<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(RequestError::Decode)?;

        match self.call(method, segments, body.as_ref()).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(RequestError::Decode),
            None => Ok(None),
        }
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> RequestResult<Option<Value>> {
        debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.tokens.get()? {
            request = request.bearer_auth(token);
        }

        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = request.send().await.map_err(RequestError::Transport)?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.expire_session();
            return Err(RequestError::Unauthorized);
        }

        let text = response.text().await.map_err(RequestError::Transport)?;

        if !status.is_success() {
            return Err(RequestError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status, &text),
            });
        }

        if text.is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&text)
            .map(Some)
            .map_err(RequestError::Decode)
    }

    /// Global reaction to a 401, whatever call triggered it
    fn expire_session(&self) {
        warn!("Backend rejected the session, returning to login");

        if let Err(e) = self.tokens.delete() {
            error!("Failed to clear stored token: {}", e);
        }

        self.navigator.navigate(Route::Login);
    }
}

/// Message of a rejected call: the body's `message`, or the bare status
fn rejection_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("HTTP Error: {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        navigation::{EmployeeView, NavigationBus},
        storage::MemoryTokenStore,
        testing::MockBackend,
    };
    use axum::{
        Json, Router,
        http::{HeaderMap, StatusCode as AxumStatus},
        routing::{delete, get, patch, post},
    };
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    fn gateway(
        backend: &MockBackend,
        tokens: Arc<MemoryTokenStore>,
        bus: Arc<NavigationBus>,
    ) -> Gateway {
        let config = ClientConfig {
            api_base_url: backend.base_url(),
            ..ClientConfig::default()
        };
        Gateway::new(&config, tokens, bus).expect("Failed to build gateway")
    }

    #[test]
    fn test_rejection_message_fallbacks() {
        let status = StatusCode::NOT_FOUND;
        assert_eq!(
            rejection_message(status, r#"{"message":"Bill not found"}"#),
            "Bill not found"
        );
        assert_eq!(rejection_message(status, ""), "HTTP Error: 404");
        assert_eq!(rejection_message(status, "<html>"), "HTTP Error: 404");
        assert_eq!(rejection_message(status, r#"{"message":""}"#), "HTTP Error: 404");
        assert_eq!(rejection_message(status, r#"{"error":"x"}"#), "HTTP Error: 404");
    }

    #[tokio::test]
    async fn test_endpoint_encodes_each_segment() {
        let backend = MockBackend::start(Router::new()).await;
        let gateway = gateway(
            &backend,
            Arc::new(MemoryTokenStore::new()),
            Arc::new(NavigationBus::default()),
        );

        let url = assert_ok!(gateway.endpoint(&["student-bills", "assign-to-domain", "M.Tech CSE/AI", "7"]));
        assert!(url.path().ends_with("/student-bills/assign-to-domain/M.Tech%20CSE%2FAI/7"));
    }

    #[tokio::test]
    async fn test_sends_json_content_type_and_bearer_token() {
        let router = Router::new().route(
            "/auth/user",
            get(|headers: HeaderMap| async move {
                Json(json!({
                    "authorization": headers.get("authorization").and_then(|v| v.to_str().ok()),
                    "contentType": headers.get("content-type").and_then(|v| v.to_str().ok()),
                }))
            }),
        );
        let backend = MockBackend::start(router).await;
        let tokens = Arc::new(MemoryTokenStore::with_token("tok-123"));
        let gateway = gateway(&backend, tokens, Arc::new(NavigationBus::default()));

        let body = assert_ok!(gateway.call(Method::GET, &["auth", "user"], None).await)
            .expect("expected a body");

        assert_eq!(body["authorization"], "Bearer tok-123");
        assert_eq!(body["contentType"], "application/json");
    }

    #[tokio::test]
    async fn test_no_authorization_header_without_token() {
        let router = Router::new().route(
            "/bills/show-all-bills",
            get(|headers: HeaderMap| async move {
                Json(json!({ "hasAuth": headers.contains_key("authorization") }))
            }),
        );
        let backend = MockBackend::start(router).await;
        let gateway = gateway(
            &backend,
            Arc::new(MemoryTokenStore::new()),
            Arc::new(NavigationBus::default()),
        );

        let body = assert_ok!(gateway.call(Method::GET, &["bills", "show-all-bills"], None).await)
            .expect("expected a body");
        assert_eq!(body["hasAuth"], false);
    }

    #[tokio::test]
    async fn test_session_cookie_is_sent_back() {
        let router = Router::new()
            .route(
                "/login/oauth2/code/google",
                get(|| async {
                    (
                        [("set-cookie", "JSESSIONID=abc123; Path=/")],
                        Json(json!({})),
                    )
                }),
            )
            .route(
                "/auth/user",
                get(|headers: HeaderMap| async move {
                    let cookie = headers
                        .get("cookie")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    Json(json!({ "cookie": cookie }))
                }),
            );
        let backend = MockBackend::start(router).await;
        let gateway = gateway(
            &backend,
            Arc::new(MemoryTokenStore::new()),
            Arc::new(NavigationBus::default()),
        );

        assert_ok!(gateway.call(Method::GET, &["login", "oauth2", "code", "google"], None).await);
        let body = assert_ok!(gateway.call(Method::GET, &["auth", "user"], None).await)
            .expect("expected a body");
        assert_eq!(body["cookie"], "JSESSIONID=abc123");
    }

    #[tokio::test]
    async fn test_unauthorized_clears_token_and_redirects() {
        let router = Router::new().route(
            "/bills/delete-billid/:id",
            delete(|| async { AxumStatus::UNAUTHORIZED }),
        );
        let backend = MockBackend::start(router).await;
        let tokens = Arc::new(MemoryTokenStore::with_token("stale"));
        let bus = Arc::new(NavigationBus::new(Route::Employee(EmployeeView::DeleteBill)));
        let gateway = gateway(&backend, tokens.clone(), bus.clone());

        let err = assert_err!(gateway.call(Method::DELETE, &["bills", "delete-billid", "4"], None).await);

        assert!(err.is_unauthorized());
        assert_eq!(tokens.get().expect("store"), None);
        assert_eq!(bus.current(), Route::Login);
    }

    #[tokio::test]
    async fn test_rejection_uses_backend_message() {
        let router = Router::new().route(
            "/bills/:id",
            get(|| async {
                (
                    AxumStatus::NOT_FOUND,
                    Json(json!({ "status": 404, "message": "Bill not found with id: 42" })),
                )
            }),
        );
        let backend = MockBackend::start(router).await;
        let bus = Arc::new(NavigationBus::new(Route::Employee(EmployeeView::UpdateBill)));
        let gateway = gateway(&backend, Arc::new(MemoryTokenStore::with_token("t")), bus.clone());

        let err = assert_err!(gateway.call(Method::GET, &["bills", "42"], None).await);

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Bill not found with id: 42");
        // Only a 401 moves the application
        assert_eq!(bus.current(), Route::Employee(EmployeeView::UpdateBill));
    }

    #[tokio::test]
    async fn test_rejection_without_body_uses_status() {
        let router = Router::new().route(
            "/bills/add-bill",
            post(|| async { AxumStatus::INTERNAL_SERVER_ERROR }),
        );
        let backend = MockBackend::start(router).await;
        let gateway = gateway(
            &backend,
            Arc::new(MemoryTokenStore::new()),
            Arc::new(NavigationBus::default()),
        );

        let err = assert_err!(
            gateway
                .call(Method::POST, &["bills", "add-bill"], Some(&json!({})))
                .await
        );
        assert_eq!(err.to_string(), "HTTP Error: 500");
    }

    #[tokio::test]
    async fn test_empty_success_body_is_none() {
        let router = Router::new().route(
            "/student-bills/assign-to-roll/:roll/:bill",
            post(|| async { AxumStatus::NO_CONTENT }),
        );
        let backend = MockBackend::start(router).await;
        let gateway = gateway(
            &backend,
            Arc::new(MemoryTokenStore::new()),
            Arc::new(NavigationBus::default()),
        );

        let body = assert_ok!(
            gateway
                .call(Method::POST, &["student-bills", "assign-to-roll", "IMT2021001", "3"], None)
                .await
        );
        assert!(body.is_none());
    }

    #[tokio::test]
    async fn test_unparsable_success_body_is_an_error() {
        let router = Router::new().route(
            "/bills/update-bill-details/:id",
            patch(|| async { "not json" }),
        );
        let backend = MockBackend::start(router).await;
        let gateway = gateway(
            &backend,
            Arc::new(MemoryTokenStore::new()),
            Arc::new(NavigationBus::default()),
        );

        let err = assert_err!(
            gateway
                .call(Method::PATCH, &["bills", "update-bill-details", "1"], Some(&json!({})))
                .await
        );
        assert!(matches!(err, RequestError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_failure() {
        let config = ClientConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..ClientConfig::default()
        };
        let gateway = Gateway::new(
            &config,
            Arc::new(MemoryTokenStore::new()),
            Arc::new(NavigationBus::default()),
        )
        .expect("Failed to build gateway");

        let err = assert_err!(gateway.call(Method::GET, &["bills", "show-all-bills"], None).await);
        assert!(matches!(err, RequestError::Transport(_)));
    }

    #[tokio::test]
    async fn test_send_decodes_typed_answer() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Echo {
            description: String,
        }

        let router = Router::new().route(
            "/bills/add-bill",
            post(|Json(body): Json<Value>| async move { (AxumStatus::CREATED, Json(body)) }),
        );
        let backend = MockBackend::start(router).await;
        let gateway = gateway(
            &backend,
            Arc::new(MemoryTokenStore::new()),
            Arc::new(NavigationBus::default()),
        );

        let echo: Option<Echo> = assert_ok!(
            gateway
                .send(Method::POST, &["bills", "add-bill"], Some(&json!({ "description": "Hostel fee" })))
                .await
        );
        assert_eq!(
            echo,
            Some(Echo {
                description: "Hostel fee".to_string()
            })
        );
    }
}
