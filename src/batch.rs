//! Batch execution: wire types and the combined-response demultiplexer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BatchItemError, GraphResult};
use crate::response;

/// One sub-request of a batch call.
///
/// Order matters: the combined response carries one sub-response per
/// sub-request, in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    /// HTTP method of the sub-request
    pub method: String,

    /// Path relative to the API root, including any query string
    pub relative_url: String,

    /// Form-encoded body for POST sub-requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Name other sub-requests can reference in dependency expressions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl BatchRequest {
    /// A GET sub-request.
    #[must_use]
    pub fn get(relative_url: impl Into<String>) -> Self {
        Self {
            method: "GET".into(),
            relative_url: relative_url.into(),
            body: None,
            name: None,
        }
    }

    /// A POST sub-request with a form-encoded body.
    #[must_use]
    pub fn post(relative_url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: "POST".into(),
            relative_url: relative_url.into(),
            body: Some(body.into()),
            name: None,
        }
    }

    /// A DELETE sub-request.
    #[must_use]
    pub fn delete(relative_url: impl Into<String>) -> Self {
        Self {
            method: "DELETE".into(),
            relative_url: relative_url.into(),
            body: None,
            name: None,
        }
    }

    /// Name this sub-request so later ones can reference its result.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// One sub-response of the combined reply. Headers arrive on the wire too
/// but nothing downstream consumes them, so they are left to serde's
/// unknown-field handling.
#[derive(Debug, Clone, Deserialize)]
struct BatchSubResponse {
    code: u16,
    #[serde(default)]
    body: Option<String>,
}

/// Split a combined batch response into per-item outcomes.
///
/// Outcomes stay aligned and in-order with `requests`. A failed item is a
/// value in the output, never an abort; surplus requests with no matching
/// sub-response produce no outcome, mirroring the API's omission.
pub(crate) fn split(
    requests: Vec<BatchRequest>,
    combined: Value,
) -> GraphResult<Vec<Result<Value, BatchItemError>>> {
    let responses: Vec<Option<BatchSubResponse>> = serde_json::from_value(combined)?;

    Ok(requests
        .into_iter()
        .zip(responses)
        .map(|(request, response)| resolve(request, response))
        .collect())
}

/// Resolve one sub-response against its originating sub-request.
fn resolve(
    request: BatchRequest,
    response: Option<BatchSubResponse>,
) -> Result<Value, BatchItemError> {
    let Some(response) = response else {
        // The API nulls out entries whose dependency failed.
        return Err(BatchItemError {
            code: 0,
            message: "no response for this request".into(),
            request,
        });
    };

    let Some(body) = response.body else {
        return Err(BatchItemError {
            code: 0,
            message: format!("HTTP {} with empty body", response.code),
            request,
        });
    };

    match response::decode(&body) {
        Err(error) => Err(BatchItemError::from_error(&error, request)),
        Ok(_) if response.code >= 400 => Err(BatchItemError {
            code: 0,
            message: format!("HTTP {}", response.code),
            request,
        }),
        Ok(value) => Ok(value),
    }
}
