//! Logging for Cielo client binaries
//!
//! Installs a `tracing-subscriber` registry so the client's payload and
//! transport events reach stderr

use cielo_config::LoggingConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global subscriber
///
/// `RUST_LOG` wins over the configured filter when it is set. Invalid
/// directives fall back to `info`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = build_filter(&config.filter);

    // stdout carries command output, so logs go to stderr
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_current_span(false);

        registry.with(fmt_layer).try_init()
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false);

        registry.with(fmt_layer).try_init()
    };

    result.map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    tracing::debug!(filter = %config.filter, json = config.json, "logging initialized");

    Ok(())
}

fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
