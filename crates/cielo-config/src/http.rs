use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// HTTP client settings
///
/// Cancellation is delegated entirely to these timeouts; the client itself
/// never aborts a call.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Total time allowed for one request, e.g. `"30s"`
    #[serde(default = "default_timeout", deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    /// Time allowed to establish the connection
    #[serde(default = "default_connect_timeout", deserialize_with = "deserialize_duration")]
    pub connect_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

const fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

const fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    duration_str::parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid duration '{raw}': {e}")))
}
