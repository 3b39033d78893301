//! Graph API response envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of a cursor-paginated collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    /// The page's records
    #[serde(default)]
    pub data: Vec<Value>,

    /// Cursor block, absent on the final page
    #[serde(default)]
    pub paging: Option<Paging>,
}

/// Cursor block of a paginated response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paging {
    /// Absolute URL of the next page
    #[serde(default)]
    pub next: Option<String>,

    /// Absolute URL of the previous page
    #[serde(default)]
    pub previous: Option<String>,
}
