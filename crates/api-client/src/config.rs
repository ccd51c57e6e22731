//! Configuration for the Stripe API client
//!
//! Supports environment-based configuration, TOML files and builder-style
//! overrides. The configuration is read-only once a client is built.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.stripe.com";

/// API version pinned on every request unless overridden
pub const DEFAULT_API_VERSION: &str = "2018-02-28";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Which mode a secret key operates in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Test mode; no real money moves
    Test,
    /// Live mode
    Live,
}

impl Environment {
    /// Infer the mode from a secret or restricted key prefix
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        if key.starts_with("sk_test_") || key.starts_with("rk_test_") {
            Some(Self::Test)
        } else if key.starts_with("sk_live_") || key.starts_with("rk_live_") {
            Some(Self::Live)
        } else {
            None
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Test => f.write_str("test"),
            Self::Live => f.write_str("live"),
        }
    }
}

/// Client configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API base URL, without a trailing `/v1`
    pub base_url: String,
    /// Secret or restricted key sent as a bearer token
    pub secret_key: String,
    /// Value of the `Stripe-Version` header
    pub api_version: String,
    /// Request timeout, in whole seconds when serialized
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            secret_key: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("secret_key", &redact(&self.secret_key))
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Keep the mode prefix, hide the rest
fn redact(key: &str) -> String {
    match key.get(..8) {
        Some(prefix) if Environment::from_key(key).is_some() => format!("{prefix}****"),
        _ if key.is_empty() => String::new(),
        _ => "****".to_string(),
    }
}

impl ClientConfig {
    /// Create a configuration for `secret_key` with default settings
    #[must_use]
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self::default().with_secret_key(secret_key)
    }

    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `STRIPE_SECRET_KEY`: Secret key (required)
    /// - `STRIPE_API_BASE`: Base URL (optional)
    /// - `STRIPE_API_VERSION`: Pinned API version (optional)
    /// - `STRIPE_TIMEOUT_SECS`: Request timeout in seconds (optional)
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the secret key is missing or the
    /// timeout is not a number.
    pub fn from_env() -> ApiResult<Self> {
        let secret_key = env::var("STRIPE_SECRET_KEY")
            .map_err(|_| ApiError::config("STRIPE_SECRET_KEY is not set"))?;

        let mut config = Self::new(secret_key);
        if let Ok(url) = env::var("STRIPE_API_BASE") {
            config.base_url = url;
        }
        if let Ok(version) = env::var("STRIPE_API_VERSION") {
            config.api_version = version;
        }
        if let Ok(secs) = env::var("STRIPE_TIMEOUT_SECS") {
            let secs = secs
                .parse()
                .map_err(|_| ApiError::config(format!("invalid STRIPE_TIMEOUT_SECS: {secs}")))?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Parse configuration from TOML; missing keys take their defaults
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the document is not valid TOML or has
    /// fields of the wrong type.
    pub fn from_toml_str(content: &str) -> ApiResult<Self> {
        toml::from_str(content).map_err(|e| ApiError::config(format!("invalid config: {e}")))
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ApiError::config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Mode implied by the secret key prefix
    #[must_use]
    pub fn environment(&self) -> Option<Environment> {
        Environment::from_key(&self.secret_key)
    }

    /// Builder-style method to set the secret key
    #[must_use]
    pub fn with_secret_key(mut self, key: impl Into<String>) -> Self {
        self.secret_key = key.into();
        self
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to pin an API version
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] naming the first invalid setting.
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.secret_key.trim().is_empty() {
            return Err(ApiError::config("secret_key cannot be empty"));
        }

        if self.secret_key.chars().any(char::is_whitespace) {
            return Err(ApiError::config("secret_key cannot contain whitespace"));
        }

        if self.api_version.trim().is_empty() {
            return Err(ApiError::config("api_version cannot be empty"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}
