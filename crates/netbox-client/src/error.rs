//! Error types for the NetBox client

use thiserror::Error;

/// Errors that can occur when talking to the NetBox API
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed (connect, TLS, timeout, body decoding)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Token cannot be used as a header value
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// API returned a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// API answered with a success status other than the one required
    #[error("expected HTTP {expected}, got {status}: {message}")]
    UnexpectedStatus {
        /// Required status code
        expected: u16,
        /// Received status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Whether the API could not be reached or refused the request
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            ClientError::Http(_) | ClientError::Api { .. } | ClientError::UnexpectedStatus { .. }
        )
    }

    /// HTTP status code attached to the error, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } | ClientError::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_is_connectivity() {
        let err = ClientError::Api {
            status: 503,
            message: "down".to_string(),
        };
        assert!(err.is_connectivity());
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "API error (503): down");
    }

    #[test]
    fn test_invalid_response_is_not_connectivity() {
        let err = ClientError::InvalidResponse("missing id".to_string());
        assert!(!err.is_connectivity());
        assert_eq!(err.status(), None);
    }
}
