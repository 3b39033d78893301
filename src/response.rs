//! Response body decoding.
//!
//! Every body that comes back from the API flows through [`decode`], the
//! batch sub-response bodies included, so error-shape detection lives in
//! exactly one place.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{GraphError, GraphResult};

/// Error fields the API may embed in an otherwise ordinary JSON object.
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorBody>,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    error_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// Decode a raw response body, normalizing the API's error shapes.
///
/// Detection order is fixed: the bare `false` literal, then the current
/// `{"error": {...}}` shape, then the legacy `{"error_code", "error_msg"}`
/// shape. Anything else is a success payload, returned exactly as parsed.
/// The bare `true` literal, which DELETE answers with, is a success.
pub(crate) fn decode(body: &str) -> GraphResult<Value> {
    let value: Value = serde_json::from_str(body)?;

    match &value {
        Value::Bool(false) => Err(GraphError::OAuth {
            message: "unknown error".into(),
        }),
        Value::Object(_) => {
            let envelope = ErrorEnvelope::deserialize(&value).unwrap_or_default();

            if let Some(error) = envelope.error {
                Err(GraphError::Api {
                    code: error.code.unwrap_or(0),
                    message: error.message.unwrap_or_else(|| "unknown error".into()),
                })
            } else if let Some(message) = envelope.error_msg {
                Err(GraphError::Api {
                    code: envelope.error_code.unwrap_or(0),
                    message,
                })
            } else {
                Ok(value)
            }
        }
        _ => Ok(value),
    }
}
