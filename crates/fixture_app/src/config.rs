use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use fixture_client::{ClientSettings, Credentials, Routes};
use fixture_logging::fixture_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const CONFIG_FILENAME: &str = "fixture.ron";
pub const CONFIG_PATH_ENV: &str = "E2E_FIXTURE_CONFIG";
pub const BASE_URL_ENV: &str = "E2E_FIXTURE_BASE_URL";
pub const USERNAME_ENV: &str = "E2E_FIXTURE_USERNAME";
pub const PASSWORD_ENV: &str = "E2E_FIXTURE_PASSWORD";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("config validation failed: {message}")]
    Invalid { message: String },
}

/// Settings of one fixture run, read from `fixture.ron`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub routes: Routes,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    /// How long the driver waits for pending calls before giving up.
    pub settle_timeout_ms: u64,
    /// Body of the messages sent; the default greeting when absent.
    pub message_text: Option<String>,
    pub logout_at_end: bool,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:45678".to_string(),
            username: None,
            password: None,
            routes: Routes::default(),
            connect_timeout_ms: 5_000,
            request_timeout_ms: 15_000,
            settle_timeout_ms: 30_000,
            message_text: None,
            logout_at_end: false,
        }
    }
}

impl FixtureConfig {
    /// `$E2E_FIXTURE_CONFIG`, else `./fixture.ron`.
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
    }

    /// Loads the default config file, applies environment overrides and validates.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parses `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fixture_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            self.base_url = base_url;
        }
        if let Some(username) = lookup(USERNAME_ENV) {
            self.username = Some(username);
        }
        if let Some(password) = lookup(PASSWORD_ENV) {
            self.password = Some(password);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|err| ConfigError::Invalid {
            message: format!("base_url {:?}: {err}", self.base_url),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                message: format!("base_url must be http or https, got {}", url.scheme()),
            });
        }
        if self.username.is_some() != self.password.is_some() {
            return Err(ConfigError::Invalid {
                message: "username and password must be set together".to_string(),
            });
        }
        if self.settle_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                message: "settle_timeout_ms must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            routes: self.routes.clone(),
            credentials: self.credentials(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }

    pub fn settle_timeout(&self) -> Duration {
        Duration::from_millis(self.settle_timeout_ms)
    }
}
