//! Transport failures.
//!
//! Only failures that prevent a response from being received live here.
//! A response with a 4xx or 5xx status is still a response: it is handed
//! back to the caller and classified by
//! [`ResourceError::from_http_response`](crate::rest::ResourceError::from_http_response).
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::clients::HttpError;
//!
//! match client.request(request).await {
//!     Ok(response) if response.is_ok() => println!("{}", response.body),
//!     Ok(response) => println!("EasyPost answered {}", response.code),
//!     Err(e) if e.is_timeout() => println!("timed out, safe to retry reads"),
//!     Err(e) => println!("no response: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpMethod;

/// A request that was refused before it was sent.
///
/// ```rust
/// use easypost::clients::{HttpMethod, InvalidHttpRequestError};
///
/// let error = InvalidHttpRequestError::UnexpectedBody { method: HttpMethod::Get };
/// assert_eq!(error.to_string(), "GET requests send parameters as a query string, not a body");
/// ```
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// `POST` or `PUT` without a JSON body.
    #[error("{method} requests need a JSON body")]
    MissingBody {
        /// The offending method.
        method: HttpMethod,
    },

    /// `GET` or `DELETE` with a body.
    #[error("{method} requests send parameters as a query string, not a body")]
    UnexpectedBody {
        /// The offending method.
        method: HttpMethod,
    },
}

/// No response was received.
///
/// `Network` covers connection refused, DNS and TLS failures, and timeouts.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request was refused before sending.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The request was sent, or attempted, and no response came back.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns `true` if the configured timeout elapsed.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network(e) if e.is_timeout())
    }

    /// Returns `true` if no connection could be established.
    ///
    /// The server never saw such a request, so retrying it cannot
    /// double-purchase.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Network(e) if e.is_connect())
    }
}
