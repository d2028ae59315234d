use serde::Deserialize;

/// Log output settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log redacted request and response bodies at INFO
    #[serde(default = "default_payloads")]
    pub payloads: bool,
    /// `tracing-subscriber` filter directive
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            payloads: default_payloads(),
            filter: default_filter(),
            json: false,
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_payloads() -> bool {
    true
}

fn default_filter() -> String {
    "info".to_owned()
}
