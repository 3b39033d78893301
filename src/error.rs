//! Graph API error types.

use thiserror::Error;

use crate::batch::BatchRequest;

/// Errors surfaced by Graph API calls.
#[derive(Error, Debug)]
pub enum GraphError {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    /// The API reported a structured error, in either its current or its
    /// legacy shape
    #[error("Graph API error {code}: {message}")]
    Api {
        /// Numeric error code, 0 when the response carried none
        code: i64,
        /// Human-readable message
        message: String,
    },

    /// The API answered with the bare literal `false`, an authorization or
    /// permission failure with no further detail
    #[error("OAuth or API error: {message}")]
    OAuth {
        /// Placeholder message, the API gives none
        message: String,
    },

    /// The call was misused on the client side
    #[error("configuration error: {0}")]
    Config(String),
}

impl GraphError {
    /// Check if this is an API-reported failure eligible for retry.
    ///
    /// Transport and decode failures are not; whether transport failures
    /// retry is the caller's choice via
    /// [`RetryConfig::retry_transport`](crate::RetryConfig).
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::OAuth { .. })
    }
}

/// Result type for Graph API operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// A failed sub-request inside a batch result.
///
/// Carries the originating request so callers can tell which sub-call
/// failed without positional bookkeeping. Batch item failures are values in
/// the result vector, never aborts; sibling items decode regardless.
#[derive(Error, Debug, Clone)]
#[error("batch item failed with code {code}: {message}")]
pub struct BatchItemError {
    /// Numeric error code, 0 when the sub-response carried none
    pub code: i64,

    /// Human-readable message
    pub message: String,

    /// The sub-request that produced this failure
    pub request: BatchRequest,
}

impl BatchItemError {
    pub(crate) fn from_error(error: &GraphError, request: BatchRequest) -> Self {
        let (code, message) = match error {
            GraphError::Api { code, message } => (*code, message.clone()),
            other => (0, other.to_string()),
        };

        Self {
            code,
            message,
            request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_and_oauth_errors_are_retryable() {
        let api = GraphError::Api {
            code: 500,
            message: "server".into(),
        };
        let oauth = GraphError::OAuth {
            message: "unknown error".into(),
        };
        let config = GraphError::Config("bad".into());

        assert!(api.is_retryable());
        assert!(oauth.is_retryable());
        assert!(!config.is_retryable());
    }

    #[test]
    fn batch_item_error_keeps_api_code() {
        let request = BatchRequest::get("me");
        let error = GraphError::Api {
            code: 190,
            message: "token expired".into(),
        };

        let item = BatchItemError::from_error(&error, request.clone());
        assert_eq!(item.code, 190);
        assert_eq!(item.message, "token expired");
        assert_eq!(item.request, request);
    }

    #[test]
    fn batch_item_error_defaults_code_for_other_kinds() {
        let error = GraphError::OAuth {
            message: "unknown error".into(),
        };

        let item = BatchItemError::from_error(&error, BatchRequest::get("me"));
        assert_eq!(item.code, 0);
        assert!(item.message.contains("unknown error"));
    }
}
