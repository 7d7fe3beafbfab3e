use std::env;
use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::error::ApiError;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const LOCAL_ENV_FILE: &str = ".env.local";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Process-wide settings, read once at startup and shared with every handler.
#[derive(Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(lookup(API_KEY_VAR));

        if let Some(model) = lookup("GEMINI_MODEL").filter(|v| !v.trim().is_empty()) {
            config = config.with_model(model.trim());
        }
        if let Some(url) = lookup("GEMINI_API_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config = config.with_api_base_url(url.trim());
        }
        if let Some(host) = lookup("HOST").filter(|v| !v.trim().is_empty()) {
            config.host = host.trim().to_string();
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got {:?}", port))?;
        }

        Ok(config)
    }

    pub fn require_api_key(&self) -> Result<&str, ApiError> {
        self.api_key.as_deref().ok_or(ApiError::MissingApiKey)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

pub fn is_production() -> bool {
    env::var("APP_ENV")
        .map(|v| v.eq_ignore_ascii_case("production"))
        .unwrap_or(false)
}

// Skipped when the key is already set or in production
pub fn load_local_env() -> std::result::Result<Option<PathBuf>, dotenv::Error> {
    if env::var_os(API_KEY_VAR).is_some() || is_production() {
        return Ok(None);
    }
    dotenv::from_filename(LOCAL_ENV_FILE).map(Some)
}
