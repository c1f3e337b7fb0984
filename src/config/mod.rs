//! Configuration types for the EasyPost API client.
//!
//! This module provides the core configuration types used to initialize
//! the client for API communication with EasyPost.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`EasyPostConfig`]: The configuration struct holding all client settings
//! - [`EasyPostConfigBuilder`]: A builder for constructing [`EasyPostConfig`] instances
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`BaseUrl`]: A validated API base URL
//! - [`WebhookSecret`]: A validated webhook signing secret
//! - [`ApiVersion`]: The API version prefix to use
//!
//! # Example
//!
//! ```rust
//! use easypost::{EasyPostConfig, ApiKey, ApiVersion};
//! use std::time::Duration;
//!
//! let config = EasyPostConfig::builder()
//!     .api_key(ApiKey::new("EZTK_test").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;
mod version;

use std::time::Duration;

pub use newtypes::{ApiKey, BaseUrl, WebhookSecret};
pub use version::ApiVersion;

use crate::error::ConfigError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the EasyPost API client.
///
/// # Thread Safety
///
/// `EasyPostConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use easypost::{EasyPostConfig, ApiKey, BaseUrl};
///
/// let config = EasyPostConfig::builder()
///     .api_key(ApiKey::new("EZTK_test").unwrap())
///     .base_url(BaseUrl::new("http://localhost:8080").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.base_url().as_ref(), "http://localhost:8080");
/// ```
#[derive(Clone, Debug)]
pub struct EasyPostConfig {
    api_key: ApiKey,
    base_url: BaseUrl,
    api_version: ApiVersion,
    timeout: Duration,
    user_agent_prefix: Option<String>,
}

impl EasyPostConfig {
    /// Creates a new builder for constructing an `EasyPostConfig`.
    #[must_use]
    pub fn builder() -> EasyPostConfigBuilder {
        EasyPostConfigBuilder::new()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify EasyPostConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EasyPostConfig>();
};

/// Builder for constructing [`EasyPostConfig`] instances.
///
/// Only `api_key` is required.
///
/// # Defaults
///
/// - `base_url`: `https://api.easypost.com`
/// - `api_version`: `v2`
/// - `timeout`: 60 seconds
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct EasyPostConfigBuilder {
    api_key: Option<ApiKey>,
    base_url: Option<BaseUrl>,
    api_version: Option<ApiVersion>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl EasyPostConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`EasyPostConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` is not set.
    pub fn build(self) -> Result<EasyPostConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        Ok(EasyPostConfig {
            api_key,
            base_url: self.base_url.unwrap_or_default(),
            api_version: self.api_version.unwrap_or_default(),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
