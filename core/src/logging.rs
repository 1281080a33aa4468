//! Tracing setup for pool hosts.
//!
//! The pool itself only emits events (`info!` on registration, interest and
//! claims, `debug!` on stake movements); the host decides where they go.
//! `RUST_LOG` overrides the configured level when set.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format for structured logs. Parsed from [`PoolConfig::log_format`].
///
/// [`PoolConfig::log_format`]: crate::PoolConfig::log_format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact single-line output for local development.
    Human,
    /// Newline-delimited JSON with event fields flattened into the object.
    Json,
}

/// Install the global tracing subscriber.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging(format: LogFormat, level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Human => registry.with(fmt::layer().compact().with_target(true)).init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().flatten_event(true))
            .init(),
    }
}
