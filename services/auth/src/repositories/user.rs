//! User repository: the backend's "who am I" endpoint

use std::sync::Arc;

use common::{error::RequestResult, gateway::Gateway};
use reqwest::Method;
use tracing::info;

use crate::models::User;

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    gateway: Arc<Gateway>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Get the user the current token or session cookie belongs to
    pub async fn current_user(&self) -> RequestResult<Option<User>> {
        info!("Fetching current user");

        self.gateway
            .send::<(), User>(Method::GET, &["auth", "user"], None)
            .await
    }

    /// Gateway the repository calls through
    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }
}
