use std::fmt;

/// Which side of the exchange a payload belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Body sent to Cielo
    Request,
    /// Body received from Cielo
    Response,
}

impl Direction {
    /// Lowercase name used as a log field
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Response => "response",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for request and response bodies
///
/// The transport masks card data before calling [`PayloadLogger::log`];
/// implementations only ever see redacted text.
pub trait PayloadLogger: fmt::Debug + Send + Sync {
    /// Whether payloads should be produced at all
    ///
    /// Checked before a body is decoded for logging so a disabled sink costs
    /// nothing.
    fn enabled(&self) -> bool {
        true
    }

    /// Record one redacted payload
    fn log(&self, direction: Direction, payload: &str);
}

/// Emits payloads as `tracing` INFO events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingPayloadLogger;

impl PayloadLogger for TracingPayloadLogger {
    fn enabled(&self) -> bool {
        tracing::enabled!(tracing::Level::INFO)
    }

    fn log(&self, direction: Direction, payload: &str) {
        tracing::info!(direction = direction.as_str(), payload, "cielo payload");
    }
}
