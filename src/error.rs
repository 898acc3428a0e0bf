//! Error handling for the storefront core
//!
//! Failures from the external API are normalized into [`ApiError`] exactly once,
//! at the adapter boundary. Everything above that layer works with typed errors
//! built on thiserror and never inspects raw transport failures.

use thiserror::Error;

/// Fixed user-facing messages used as fallbacks when a failure carries no
/// structured message of its own.
pub mod messages {
    pub const EMPTY_ORDER: &str = "No ingredients were supplied for the order";
    pub const MISSING_BUN: &str = "A bun is required to place an order";
    pub const ORDER_FAILED: &str = "Failed to create the order";
    pub const INGREDIENTS_FAILED: &str = "Failed to load ingredients";
    pub const INVALID_INGREDIENTS: &str = "Received malformed ingredient data";
    pub const FEED_FAILED: &str = "Failed to load the order feed";
    pub const ORDERS_FAILED: &str = "Failed to load order history";
    pub const REGISTRATION_FAILED: &str = "Registration failed";
    pub const LOGIN_FAILED: &str = "Login failed";
    pub const UPDATE_FAILED: &str = "Failed to update user data";
    pub const USER_NOT_FOUND: &str = "User not found";
    pub const NOT_AUTHENTICATED: &str = "Not authenticated";
    pub const UNKNOWN: &str = "Unknown error";
}

/// Normalized failure of an external call.
///
/// `message` is whatever the failure payload carried (server message,
/// transport error text); `status` is the HTTP status when one was received.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .message.as_deref().unwrap_or(messages::UNKNOWN))]
pub struct ApiError {
    pub message: Option<String>,
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            status: None,
        }
    }

    /// A failure with no usable payload
    pub fn opaque() -> Self {
        Self {
            message: None,
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// The carried message, or `fallback` when the failure had none
    pub fn message_or(&self, fallback: &str) -> String {
        match self.message.as_deref() {
            Some(message) if !message.trim().is_empty() => message.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Server rejected the access token because it expired
    pub fn is_token_expired(&self) -> bool {
        self.message.as_deref() == Some("jwt expired")
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, Some(401) | Some(403))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        Self {
            message: Some(error.to_string()),
            status: error.status().map(|s| s.as_u16()),
        }
    }
}

/// Failures of the order submission path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("{}", messages::EMPTY_ORDER)]
    EmptyIngredients,

    #[error("{}", messages::MISSING_BUN)]
    MissingBun,

    #[error("{}", .0.message_or(messages::ORDER_FAILED))]
    Api(#[from] ApiError),
}

impl OrderError {
    /// Validation failures are resolved locally, before any network call
    pub fn is_validation(&self) -> bool {
        matches!(self, OrderError::EmptyIngredients | OrderError::MissingBun)
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid API base URL '{value}': {source}")]
    Url {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}
