//! Client configuration
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `ERP_`-prefixed environment variables.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use reqwest::Url;
use serde::Deserialize;
use tracing::info;

use crate::error::{ConfigError, ConfigResult};

/// Default backend location when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// How long add/assign/student-bill delete successes stay on screen
pub const DEFAULT_SUCCESS_DISPLAY_MS: u64 = 3000;

/// How long update/delete bill successes stay on screen
pub const DEFAULT_EDIT_DISPLAY_MS: u64 = 2000;

/// Configuration of the console client
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the billing backend (e.g. "http://localhost:8080")
    pub api_base_url: String,
    /// File holding the bearer token between runs
    pub token_path: PathBuf,
    /// Display window of a success notice, in milliseconds
    pub success_display_ms: u64,
    /// Display window of an update/delete bill success, in milliseconds
    pub edit_display_ms: u64,
}

impl ClientConfig {
    /// Load the configuration from defaults, an optional file and the environment
    ///
    /// # Environment Variables
    /// - `ERP_API_BASE_URL`: backend base URL (default: "http://localhost:8080")
    /// - `ERP_TOKEN_PATH`: token file (default: `<config dir>/erp-console/token`)
    /// - `ERP_SUCCESS_DISPLAY_MS`: success display window (default: 3000)
    /// - `ERP_EDIT_DISPLAY_MS`: update/delete display window (default: 2000)
    pub fn load(file: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = config::Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default(
                "token_path",
                default_token_path().to_string_lossy().into_owned(),
            )?
            .set_default("success_display_ms", DEFAULT_SUCCESS_DISPLAY_MS as i64)?
            .set_default("edit_display_ms", DEFAULT_EDIT_DISPLAY_MS as i64)?;

        if let Some(path) = file {
            info!("Reading configuration file {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config: ClientConfig = builder
            .add_source(config::Environment::with_prefix("ERP").try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.base_url()?;
        Ok(config)
    }

    /// Load the configuration from defaults and the environment only
    pub fn from_env() -> ConfigResult<Self> {
        Self::load(None)
    }

    /// The backend base URL, checked to be an absolute http(s) base
    pub fn base_url(&self) -> ConfigResult<Url> {
        let url = Url::parse(&self.api_base_url)
            .map_err(|e| ConfigError::InvalidBaseUrl(format!("{}: {}", self.api_base_url, e)))?;

        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl(self.api_base_url.clone()));
        }

        Ok(url)
    }

    /// Display window of a success notice
    pub fn success_display(&self) -> Duration {
        Duration::from_millis(self.success_display_ms)
    }

    /// Display window of an update/delete bill success
    pub fn edit_display(&self) -> Duration {
        Duration::from_millis(self.edit_display_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_path: default_token_path(),
            success_display_ms: DEFAULT_SUCCESS_DISPLAY_MS,
            edit_display_ms: DEFAULT_EDIT_DISPLAY_MS,
        }
    }
}

fn default_token_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("erp-console").join("token"))
        .unwrap_or_else(|| PathBuf::from(".erp-token"))
}
