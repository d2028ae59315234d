use std::fmt;

use cielo_config::MerchantConfig;
use secrecy::{ExposeSecret, SecretString};

/// Merchant credentials sent as headers on every request
///
/// Neither value is ever logged or shown in `Debug` output.
#[derive(Clone)]
pub struct Merchant {
    id: SecretString,
    key: SecretString,
}

impl Merchant {
    /// Create credentials from the merchant id and key
    pub fn new(id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            id: SecretString::from(id.into()),
            key: SecretString::from(key.into()),
        }
    }

    pub(crate) fn id(&self) -> &str {
        self.id.expose_secret()
    }

    pub(crate) fn key(&self) -> &str {
        self.key.expose_secret()
    }
}

impl From<&MerchantConfig> for Merchant {
    fn from(config: &MerchantConfig) -> Self {
        Self {
            id: config.id.clone(),
            key: config.key.clone(),
        }
    }
}

impl fmt::Debug for Merchant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Merchant").finish_non_exhaustive()
    }
}
