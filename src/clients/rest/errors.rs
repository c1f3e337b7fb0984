//! Errors raised by [`RestClient`](super::RestClient) before or while sending.

use thiserror::Error;

use crate::clients::HttpError;

/// Why a REST call produced no response.
///
/// # Example
///
/// ```rust
/// use easypost::clients::rest::RestError;
///
/// let error = RestError::InvalidPath {
///     path: "shipments?page_size=5".to_string(),
///     reason: "query parameters go in the query map",
/// };
/// assert!(error.to_string().contains("page_size"));
/// ```
#[derive(Debug, Error)]
pub enum RestError {
    /// The path cannot be appended to the versioned base URL.
    #[error("Invalid REST API path '{path}': {reason}")]
    InvalidPath {
        /// The path as given.
        path: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// The transport failed.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl RestError {
    /// Returns `true` for failures worth retrying: timeouts and refused
    /// connections.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::InvalidPath { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpMethod, InvalidHttpRequestError};

    #[test]
    fn test_invalid_path_message() {
        let error = RestError::InvalidPath {
            path: String::new(),
            reason: "path is empty",
        };
        assert_eq!(error.to_string(), "Invalid REST API path '': path is empty");
        assert!(!error.is_transient());
    }

    #[test]
    fn test_wraps_transport_errors_transparently() {
        let http: HttpError = InvalidHttpRequestError::UnexpectedBody {
            method: HttpMethod::Get,
        }
        .into();
        let error: RestError = http.into();

        assert!(matches!(error, RestError::Http(HttpError::InvalidRequest(_))));
        assert!(error.to_string().starts_with("GET requests"));
        assert!(!error.is_transient());
    }
}
