//! Configuration builder for integration tests

use cielo_config::ClientConfig;

use super::mock_cielo::{MERCHANT_ID, MERCHANT_KEY};

/// Builder for test configurations, rendered through the TOML loader
pub struct ConfigBuilder {
    merchant_id: String,
    merchant_key: String,
    base_url: String,
    timeout: String,
    payloads: bool,
}

impl ConfigBuilder {
    /// Credentials the mock accepts, pointed at `base_url`
    pub fn new(base_url: &str) -> Self {
        Self {
            merchant_id: MERCHANT_ID.to_owned(),
            merchant_key: MERCHANT_KEY.to_owned(),
            base_url: base_url.to_owned(),
            timeout: "5s".to_owned(),
            payloads: true,
        }
    }

    /// Use credentials the mock rejects
    pub fn with_wrong_key(mut self) -> Self {
        self.merchant_key = "WRONG".to_owned();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: &str) -> Self {
        timeout.clone_into(&mut self.timeout);
        self
    }

    /// Turn payload logging off
    pub fn without_payloads(mut self) -> Self {
        self.payloads = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> ClientConfig {
        let raw = format!(
            r#"
[merchant]
id = "{id}"
key = "{key}"

[environment]
type = "custom"
api_url = "{base}"
api_query_url = "{base}"

[http]
timeout = "{timeout}"

[logging]
payloads = {payloads}
"#,
            id = self.merchant_id,
            key = self.merchant_key,
            base = self.base_url,
            timeout = self.timeout,
            payloads = self.payloads,
        );

        ClientConfig::from_toml(&raw).expect("valid test config")
    }
}
