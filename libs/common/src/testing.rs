//! In-process backend for integration tests
//!
//! Serves an axum router on an ephemeral loopback port so that tests exercise
//! the real gateway, HTTP stack included.

use std::net::SocketAddr;

use axum::Router;
use tokio::{net::TcpListener, task::JoinHandle};
use tracing::info;

/// A running test backend; stopped when dropped
pub struct MockBackend {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl MockBackend {
    /// Serve the router until the backend is dropped
    pub async fn start(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test backend");
        let addr = listener
            .local_addr()
            .expect("Failed to read test backend address");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Test backend stopped: {}", e);
            }
        });

        info!("Test backend listening on {}", addr);
        Self { addr, handle }
    }

    /// Base URL to configure the gateway with
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
