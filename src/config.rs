//! Storefront configuration
//!
//! Defaults point at the public Stellar Burgers API. A YAML file and
//! environment variables can override them; environment wins.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://norma.nomoreparties.space/api/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable names
pub const ENV_API_URL: &str = "BURGER_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "BURGER_API_TIMEOUT_SECS";
pub const ENV_CONFIG_PATH: &str = "BURGER_CONFIG";

/// Route paths the core hands back to the navigation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Constructor page; origin recorded when submission needs a login first
    pub constructor: String,
    pub login: String,
    /// Where a successful login goes when no origin was recorded
    pub after_login: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            constructor: "/".to_string(),
            login: "/login".to_string(),
            after_login: "/profile".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Base URL of the REST API; always ends with a slash
    pub api_base_url: Url,
    pub request_timeout_secs: u64,
    pub routes: RouteConfig,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_URL).expect("DEFAULT_API_URL is a valid URL"),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            routes: RouteConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load from a YAML file. Missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: StorefrontConfig = serde_yaml::from_str(&content)?;
        config.api_base_url = normalize_base(config.api_base_url);
        if config.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(config)
    }

    /// Defaults, then the file named by `BURGER_CONFIG` (if set), then
    /// individual environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var(ENV_CONFIG_PATH) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(ENV_API_URL) {
            self.api_base_url = parse_base_url(&value)?;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            self.request_timeout_secs = match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_TIMEOUT_SECS.to_string(),
                        value,
                    })
                }
            };
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Parse a base URL, appending the trailing slash `Url::join` relies on
pub fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|source| ConfigError::Url {
        value: value.to_string(),
        source,
    })?;
    Ok(normalize_base(url))
}

fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
