//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `thingif.toml` in the working directory unless another path is
//! given. The file is optional; credentials usually come from the
//! environment. Environment variables take precedence over file values.

use serde::Deserialize;
use thingif_adapter_http_reqwest::HttpConfig;
use thingif_domain::id::TypedId;
use thingif_domain::kii_app::{KiiApp, Site};

pub const DEFAULT_PATH: &str = "thingif.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application identity.
    pub app: AppConfig,
    /// Credentials and the bound target.
    pub auth: AuthConfig,
    /// HTTP transport settings.
    pub http: HttpConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Application registered on the platform.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Region name (`us`, `jp`, `cn3`, `sg`, `eu`) or a base URL.
    pub site: String,
    pub app_id: String,
    pub app_key: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Owner access token.
    pub token: String,
    /// Owner typed id, e.g. `user:1234`.
    pub owner: String,
    /// Target typed id, e.g. `thing:th.1234`.
    pub target: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `path` (or `thingif.toml`) if present, then
    /// apply environment-variable overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is unreadable or malformed, or
    /// if the resulting configuration is incomplete.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path.unwrap_or(DEFAULT_PATH))?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("THINGIF_SITE") {
            self.app.site = val;
        }
        if let Some(val) = lookup("THINGIF_APP_ID") {
            self.app.app_id = val;
        }
        if let Some(val) = lookup("THINGIF_APP_KEY") {
            self.app.app_key = val;
        }
        if let Some(val) = lookup("THINGIF_TOKEN") {
            self.auth.token = val;
        }
        if let Some(val) = lookup("THINGIF_OWNER") {
            self.auth.owner = val;
        }
        if let Some(val) = lookup("THINGIF_TARGET") {
            self.auth.target = Some(val);
        }
        if let Some(val) = lookup("THINGIF_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.token.is_empty() {
            return Err(ConfigError::Validation("token must be set".to_string()));
        }
        self.kii_app()?;
        self.owner()?;
        self.target()?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for an unknown site or an empty
    /// app id or key.
    pub fn kii_app(&self) -> Result<KiiApp, ConfigError> {
        let site: Site = self.app.site.parse().map_err(invalid)?;
        KiiApp::new(&self.app.app_id, &self.app.app_key, site).map_err(invalid)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when the owner is not a typed id.
    pub fn owner(&self) -> Result<TypedId, ConfigError> {
        self.auth.owner.parse().map_err(invalid)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when the target is set but is not
    /// a typed id.
    pub fn target(&self) -> Result<Option<TypedId>, ConfigError> {
        self.auth
            .target
            .as_deref()
            .map(str::parse::<TypedId>)
            .transpose()
            .map_err(invalid)
    }
}

fn invalid(err: impl std::fmt::Display) -> ConfigError {
    ConfigError::Validation(err.to_string())
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site: "us".to_string(),
            app_id: String::new(),
            app_key: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn,thingifctl=info,thingif_app=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
