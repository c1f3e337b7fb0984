//! Webhook delivery verification.
//!
//! EasyPost notifies webhooks with [`Event`](crate::rest::resources::Event)
//! payloads signed by the webhook's secret. Verify every delivery before
//! trusting it:
//!
//! ```rust,ignore
//! use easypost::webhooks::{validate_webhook, WebhookError, HEADER_HMAC_SIGNATURE};
//! use easypost::rest::resources::Tracker;
//!
//! let signature = request.headers().get(HEADER_HMAC_SIGNATURE).and_then(|v| v.to_str().ok());
//! match validate_webhook(&body, signature, &secret) {
//!     Ok(event) if event.description == "tracker.updated" => {
//!         let tracker: Tracker = event.result_as()?;
//!     }
//!     Ok(_) => {}
//!     Err(WebhookError::InvalidSignature) => return reject(),
//!     Err(e) => return bad_request(e),
//! }
//! ```

mod errors;
mod verification;

pub use errors::WebhookError;
pub use verification::{
    compute_signature, validate_webhook, validate_webhook_any, verify_signature,
    HEADER_HMAC_SIGNATURE, SIGNATURE_PREFIX,
};
