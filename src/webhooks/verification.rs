//! Webhook signature verification.
//!
//! EasyPost signs each webhook delivery with HMAC-SHA256 over the raw body,
//! keyed by the webhook's secret, and sends the lowercase hex digest in the
//! `X-Hmac-Signature` header as `hmac-sha256-hex=<digest>`.
//!
//! - [`validate_webhook`]: verify and decode a delivery into an [`Event`]
//! - [`validate_webhook_any`]: the same, trying several secrets (rotation)
//! - [`verify_signature`]: the low-level check
//!
//! # Example
//!
//! ```rust
//! use easypost::webhooks::{compute_signature, validate_webhook, SIGNATURE_PREFIX};
//! use easypost::WebhookSecret;
//!
//! let secret = WebhookSecret::new("sekrit").unwrap();
//! let body = br#"{"id": "evt_1", "object": "Event", "description": "tracker.updated", "result": {}}"#;
//! let header = format!("{SIGNATURE_PREFIX}{}", compute_signature(body, &secret));
//!
//! let event = validate_webhook(body, Some(&header), &secret).unwrap();
//! assert_eq!(event.description, "tracker.updated");
//! ```
//!
//! # Security
//!
//! Digests are compared in constant time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::WebhookSecret;
use crate::rest::resources::Event;
use crate::webhooks::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// HTTP header carrying the delivery signature.
pub const HEADER_HMAC_SIGNATURE: &str = "X-Hmac-Signature";

/// Prefix of the signature header value.
pub const SIGNATURE_PREFIX: &str = "hmac-sha256-hex=";

/// Computes the lowercase hex HMAC-SHA256 digest of `body`.
///
/// # Example
///
/// ```rust
/// use easypost::webhooks::compute_signature;
/// use easypost::WebhookSecret;
///
/// let digest = compute_signature(b"payload", &WebhookSecret::new("sekrit").unwrap());
/// assert_eq!(digest.len(), 64);
/// ```
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(body: &[u8], secret: &WebhookSecret) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_ref().as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Returns `true` if `signature_header` is a valid signature of `body`.
///
/// The header must carry the `hmac-sha256-hex=` prefix. Hex case is ignored.
#[must_use]
pub fn verify_signature(body: &[u8], signature_header: &str, secret: &WebhookSecret) -> bool {
    let Some(received) = signature_header.trim().strip_prefix(SIGNATURE_PREFIX) else {
        return false;
    };

    let expected = compute_signature(body, secret);
    let received = received.to_ascii_lowercase();

    expected.as_bytes().ct_eq(received.as_bytes()).into()
}

/// Verifies a delivery and decodes it into an [`Event`].
///
/// # Arguments
///
/// * `body` - The raw request body, exactly as received
/// * `signature_header` - The `X-Hmac-Signature` header value, if present
/// * `secret` - The webhook's secret
///
/// # Errors
///
/// Returns [`WebhookError::MissingSignature`] if the header is absent,
/// [`WebhookError::InvalidSignature`] if it does not match, and
/// [`WebhookError::InvalidPayload`] if the verified body is not an event.
pub fn validate_webhook(
    body: &[u8],
    signature_header: Option<&str>,
    secret: &WebhookSecret,
) -> Result<Event, WebhookError> {
    validate_webhook_any(body, signature_header, std::slice::from_ref(secret))
}

/// Like [`validate_webhook`], accepting a signature from any of `secrets`.
///
/// Use this while rotating a webhook secret: pass the new secret first and
/// the old one second.
///
/// # Errors
///
/// Same as [`validate_webhook`].
pub fn validate_webhook_any(
    body: &[u8],
    signature_header: Option<&str>,
    secrets: &[WebhookSecret],
) -> Result<Event, WebhookError> {
    let header = signature_header
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or(WebhookError::MissingSignature)?;

    if !secrets
        .iter()
        .any(|secret| verify_signature(body, header, secret))
    {
        tracing::warn!("rejected webhook delivery with invalid signature");
        return Err(WebhookError::InvalidSignature);
    }

    let event: Event =
        serde_json::from_slice(body).map_err(|e| WebhookError::InvalidPayload {
            message: e.to_string(),
        })?;

    tracing::debug!(
        event_id = event.id.as_deref(),
        description = %event.description,
        "verified webhook delivery"
    );
    Ok(event)
}
