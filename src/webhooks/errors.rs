//! Webhook-specific error types.
//!
//! - [`WebhookError::MissingSignature`]: the delivery had no signature header
//! - [`WebhookError::InvalidSignature`]: the signature did not match any secret
//! - [`WebhookError::InvalidPayload`]: the body was not an event
//!
//! # Example
//!
//! ```rust
//! use easypost::webhooks::WebhookError;
//!
//! let error = WebhookError::InvalidSignature;
//! assert!(error.to_string().contains("signature"));
//! ```

use thiserror::Error;

/// Error type for webhook verification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WebhookError {
    /// The `X-Hmac-Signature` header was absent or empty.
    #[error("Webhook delivery has no X-Hmac-Signature header")]
    MissingSignature,

    /// The signature did not match the body.
    ///
    /// The delivery may be forged, or the secret may be wrong. The body
    /// must not be trusted.
    #[error("Webhook signature did not match. The delivery may not be from EasyPost.")]
    InvalidSignature,

    /// The signature matched but the body is not a valid event.
    #[error("Webhook body is not a valid event: {message}")]
    InvalidPayload {
        /// The decoder's message.
        message: String,
    },
}

// Verify WebhookError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebhookError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert!(WebhookError::MissingSignature
            .to_string()
            .contains("X-Hmac-Signature"));

        let error = WebhookError::InvalidPayload {
            message: "expected value at line 1".to_string(),
        };
        assert!(error.to_string().contains("line 1"));
    }

    #[test]
    fn test_implements_std_error() {
        let error: &dyn std::error::Error = &WebhookError::InvalidSignature;
        let _ = error;
    }
}
