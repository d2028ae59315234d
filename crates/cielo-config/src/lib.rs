#![allow(clippy::must_use_candidate)]

//! Configuration for the Cielo e-commerce client

mod env;
pub mod environment;
pub mod http;
mod loader;
pub mod logging;

use secrecy::SecretString;
use serde::Deserialize;

pub use environment::Environment;
pub use http::HttpConfig;
pub use logging::LoggingConfig;

/// Top-level client configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Merchant credentials sent on every request
    pub merchant: MerchantConfig,
    /// Target Cielo deployment
    #[serde(default)]
    pub environment: Environment,
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Merchant credentials
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MerchantConfig {
    /// `MerchantId` header value
    pub id: SecretString,
    /// `MerchantKey` header value
    pub key: SecretString,
}
