//! Error types for the EasyPost API client.
//!
//! This module contains the configuration error type. Errors raised while
//! talking to the API live next to the layer that produces them:
//! [`HttpError`](crate::clients::HttpError) for transport failures,
//! [`ResourceError`](crate::rest::ResourceError) for classified API errors,
//! and [`PollError`](crate::rest::PollError) for bounded waits.
//!
//! # Example
//!
//! ```rust
//! use easypost::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while building client configuration.
///
/// Each variant carries enough context to explain what was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid EasyPost API key.")]
    EmptyApiKey,

    /// Webhook secret cannot be empty.
    #[error("Webhook secret cannot be empty.")]
    EmptyWebhookSecret,

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected 'v2', 'beta', or a version string starting with 'v'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide an http(s) URL (e.g., 'https://api.easypost.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to initialize HTTP client: {reason}")]
    HttpClientInit {
        /// Why construction failed.
        reason: String,
    },
}
