//! Common library for the academic ERP console
//!
//! This crate provides the pieces shared by the auth and billing crates and
//! the console binary: configuration, error types, bearer token storage,
//! application routes and the request gateway through which every backend
//! call is made.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use common::{
//!     config::ClientConfig,
//!     gateway::Gateway,
//!     navigation::NavigationBus,
//!     storage::FileTokenStore,
//! };
//! use reqwest::Method;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env()?;
//!     let tokens = Arc::new(FileTokenStore::new(&config.token_path));
//!     let gateway = Gateway::new(&config, tokens, Arc::new(NavigationBus::default()))?;
//!     let bills = gateway.call(Method::GET, &["bills", "show-all-bills"], None).await?;
//!     println!("{:?}", bills);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod navigation;
pub mod storage;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
