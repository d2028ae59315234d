use std::iter;

/// Client-specific result type
pub type Result<T> = std::result::Result<T, CieloClientError>;

/// Errors from the Cielo client
#[derive(Debug, thiserror::Error)]
pub enum CieloClientError {
    /// Network failure: connection, DNS, timeout or body read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response was flagged as gzip but could not be inflated
    #[error("failed to decompress response: {0}")]
    Decompress(#[source] std::io::Error),

    /// Request payload could not be serialized
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// Response body did not match the expected shape
    #[error("failed to parse response: {0}")]
    Parse(#[source] serde_json::Error),

    /// Cielo rejected the request
    #[error(transparent)]
    Api(#[from] CieloError),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CieloClientError {
    /// Whether the failure happened below the API layer
    ///
    /// Transport failures are never retried by the client; whether to retry
    /// is up to the caller.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Decompress(_))
    }

    /// The domain error chain, if Cielo rejected the request
    pub const fn as_api(&self) -> Option<&CieloError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }
}

/// Business rejection reported by Cielo
///
/// A 400 response carries a list of errors. They are folded into a chain
/// where each error wraps the one reported before it, so the outermost
/// error is the last one in the response and [`CieloError::chain`] walks
/// back to the first.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (code {code})")]
pub struct CieloError {
    code: i32,
    message: String,
    #[source]
    cause: Option<Box<CieloError>>,
}

impl CieloError {
    /// Code used when a 400 response lists no errors
    pub const NO_DETAIL_CODE: i32 = 0;

    /// Create an error wrapping an optional earlier one
    pub fn new(message: impl Into<String>, code: i32, cause: Option<Self>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: cause.map(Box::new),
        }
    }

    /// The 404 sentinel
    pub fn not_found() -> Self {
        Self::new("Not found", 404, None)
    }

    /// Stand-in for a 400 response whose error list is empty
    pub fn no_detail() -> Self {
        Self::new("no error detail provided", Self::NO_DETAIL_CODE, None)
    }

    /// Cielo error code
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// Human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The error reported before this one
    pub fn cause(&self) -> Option<&Self> {
        self.cause.as_deref()
    }

    /// Iterate from this error back to the first one reported
    pub fn chain(&self) -> impl Iterator<Item = &Self> {
        iter::successors(Some(self), |error| error.cause())
    }
}
