//! Intake configuration loading
//!
//! Loads configuration from `~/.config/intake/intake.toml` (or `INTAKE_CONFIG`
//! env). The resulting value is handed to the API client at construction;
//! nothing reads a global base URL.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::errors::{IntakeError, Result};

/// Root configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct IntakeConfig {
    /// Restaurant API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Local session store settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Identity provider settings
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Restaurant API configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Scheme and host of the functions deployment
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Collection path for create/list/get/update/delete
    #[serde(default = "default_restaurants_path")]
    pub restaurants_path: String,

    /// Prefix for the admin dashboard endpoints
    #[serde(default = "default_admin_path")]
    pub admin_path: String,

    /// Fixed URL used once when the sorted list fetch fails.
    /// Defaults to the collection URL without query parameters.
    #[serde(default)]
    pub fallback_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://us-central1-mongoose1-app.cloudfunctions.net".to_string()
}

fn default_restaurants_path() -> String {
    "/api/restaurants/holding".to_string()
}

fn default_admin_path() -> String {
    "/api/admin".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            restaurants_path: default_restaurants_path(),
            admin_path: default_admin_path(),
            fallback_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Config pointing at `base_url` with default paths
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// `{base}{restaurants_path}`
    pub fn restaurants_url(&self) -> String {
        join_url(&self.base_url, &self.restaurants_path)
    }

    /// `{base}{restaurants_path}/{id}`, the id escaped as one path segment
    pub fn restaurant_url(&self, id: &str) -> Result<String> {
        push_segment(&self.restaurants_url(), id)
    }

    /// `{base}{admin_path}/restaurants/{id}`, the id escaped as one path segment
    pub fn admin_restaurant_url(&self, id: &str) -> Result<String> {
        push_segment(&self.admin_url("restaurants"), id)
    }

    /// `{base}{admin_path}/{suffix}`
    pub fn admin_url(&self, suffix: &str) -> String {
        format!(
            "{}/{}",
            join_url(&self.base_url, &self.admin_path),
            suffix.trim_start_matches('/')
        )
    }

    /// Configured fallback, or the collection URL
    pub fn fallback_url(&self) -> String {
        self.fallback_url
            .clone()
            .unwrap_or_else(|| self.restaurants_url())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Append `segment` to a collection URL. Dot segments would resolve to the
/// collection or its parent and are refused.
fn push_segment(collection: &str, segment: &str) -> Result<String> {
    if matches!(segment, "" | "." | "..") {
        return Err(IntakeError::internal(format!("invalid restaurant id: {segment:?}")));
    }
    let mut url = url::Url::parse(collection).map_err(|e| {
        IntakeError::config_with_source(format!("invalid API URL: {collection}"), e)
    })?;
    url.path_segments_mut()
        .map_err(|()| IntakeError::config(format!("API URL cannot take a path: {collection}")))?
        .pop_if_empty()
        .push(segment);
    Ok(url.into())
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

/// Session store configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Path of the JSON session file
    #[serde(default = "default_session_path")]
    pub path: String,
}

fn default_session_path() -> String {
    config_dir()
        .join("session.json")
        .to_string_lossy()
        .into_owned()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

impl SessionConfig {
    /// Session path with `~/` expanded
    pub fn resolved_path(&self) -> PathBuf {
        expand_home(&self.path)
    }
}

/// Identity provider configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// REST endpoint of the identity toolkit
    #[serde(default = "default_auth_endpoint")]
    pub endpoint: String,

    /// Web API key for the project
    #[serde(default)]
    pub api_key: String,
}

fn default_auth_endpoint() -> String {
    "https://identitytoolkit.googleapis.com/v1".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            endpoint: default_auth_endpoint(),
            api_key: String::new(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".config").join("intake"))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

impl IntakeConfig {
    /// Environment variable for config path override
    pub const ENV_CONFIG_PATH: &'static str = "INTAKE_CONFIG";

    /// Default config filename
    pub const DEFAULT_CONFIG_FILENAME: &'static str = "intake.toml";

    /// Load configuration from file
    ///
    /// Resolution order:
    /// 1. `INTAKE_CONFIG` environment variable
    /// 2. `~/.config/intake/intake.toml`
    ///
    /// If the config file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let path = Self::resolve_config_path();

        if !path.exists() {
            tracing::info!(
                path = %path.display(),
                "Intake config not found, using defaults"
            );
            return Ok(Self::default());
        }

        Self::load_from_path(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            IntakeError::config_with_source(
                format!("failed to read config at {}", path.display()),
                e,
            )
        })?;

        Self::parse(&contents)
    }

    /// Parse configuration from TOML string
    pub fn parse(contents: &str) -> Result<Self> {
        let cfg: IntakeConfig = toml::from_str(contents)
            .map_err(|e| IntakeError::config_with_source("failed to parse config", e))?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// Resolve the configuration file path
    fn resolve_config_path() -> PathBuf {
        if let Ok(path) = std::env::var(Self::ENV_CONFIG_PATH) {
            return PathBuf::from(path);
        }

        config_dir().join(Self::DEFAULT_CONFIG_FILENAME)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.api.base_url).map_err(|e| {
            IntakeError::config_with_source(
                format!("api.base_url is not a valid URL: {}", self.api.base_url),
                e,
            )
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(IntakeError::config(format!(
                "api.base_url must be http or https, got {}",
                base.scheme()
            )));
        }

        if let Some(fallback) = &self.api.fallback_url
            && url::Url::parse(fallback).is_err()
        {
            return Err(IntakeError::config(format!(
                "api.fallback_url is not a valid URL: {fallback}"
            )));
        }

        if self.api.timeout_secs == 0 {
            tracing::warn!("api.timeout_secs is 0; requests will time out immediately");
        }

        if self.auth.api_key.is_empty() {
            tracing::warn!("auth.api_key is empty; sign-in will fail at runtime");
        }

        Ok(())
    }
}
