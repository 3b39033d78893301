//! Graph API client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the Graph API client.
///
/// Fixed for the lifetime of a [`GraphClient`](crate::GraphClient); every
/// call made through a client uses the same credential and base URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// OAuth access token attached to every outgoing call
    pub access_token: String,

    /// Base URL for the Graph API (default: <https://graph.facebook.com>)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_api_url() -> String {
    "https://graph.facebook.com".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Retry configuration.
///
/// Re-attempts are immediate; the API signals transient failures in the
/// response body, so there is no backoff to coordinate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per call; 0 and 1 both mean a single attempt
    #[serde(default)]
    pub max_attempts: u32,

    /// Also retry transport-level failures (connect, timeout), not just
    /// API-reported errors
    #[serde(default)]
    pub retry_transport: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            api_url: default_api_url(),
            timeout: default_timeout(),
            retry: RetryConfig::default(),
        }
    }
}
