use serde::Deserialize;
use url::Url;

const PRODUCTION_API_URL: &str = "https://api.cieloecommerce.cielo.com.br/";
const PRODUCTION_API_QUERY_URL: &str = "https://apiquery.cieloecommerce.cielo.com.br/";
const SANDBOX_API_URL: &str = "https://apisandbox.cieloecommerce.cielo.com.br/";
const SANDBOX_API_QUERY_URL: &str = "https://apiquerysandbox.cieloecommerce.cielo.com.br/";

/// Cielo deployment the client talks to
///
/// Transactions (create, capture, cancel, tokenize) go to the API host while
/// reads go to the separate query host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Environment {
    /// Live merchant traffic
    #[default]
    Production,
    /// Cielo sandbox
    Sandbox,
    /// Explicit hosts, e.g. a local mock
    Custom {
        /// Base URL for transactional requests
        api_url: Url,
        /// Base URL for query requests
        api_query_url: Url,
    },
}

impl Environment {
    /// Base URL for transactional requests
    pub fn api_url(&self) -> &str {
        match self {
            Self::Production => PRODUCTION_API_URL,
            Self::Sandbox => SANDBOX_API_URL,
            Self::Custom { api_url, .. } => api_url.as_str(),
        }
    }

    /// Base URL for query requests
    pub fn api_query_url(&self) -> &str {
        match self {
            Self::Production => PRODUCTION_API_QUERY_URL,
            Self::Sandbox => SANDBOX_API_QUERY_URL,
            Self::Custom { api_query_url, .. } => api_query_url.as_str(),
        }
    }

    /// Point both hosts at the same base URL
    pub fn custom(base_url: Url) -> Self {
        Self::Custom {
            api_url: base_url.clone(),
            api_query_url: base_url,
        }
    }
}
