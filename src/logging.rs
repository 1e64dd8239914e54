//! # Structured Logging Module
//!
//! Environment-aware structured logging for debugging interleaved session
//! timelines. Human-readable output in development, JSON in production.

use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use uuid::Uuid;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);

        let init_result = if environment == "production" {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_ansi(false)
                        .json()
                        .with_filter(EnvFilter::new(log_level)),
                )
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_ansi(true)
                        .with_filter(EnvFilter::new(log_level)),
                )
                .try_init()
        };

        // A global subscriber may already be set by the embedding server;
        // not an error, continue with the existing one.
        if init_result.is_err() {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        }

        tracing::info!(
            environment = %environment,
            "Structured logging initialized"
        );
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    environment_from(|key| std::env::var(key).ok())
}

fn environment_from(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup("ORDERTRACK_ENV")
        .or_else(|| lookup("APP_ENV"))
        .or_else(|| lookup("NODE_ENV"))
        .unwrap_or_else(|| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Log structured data for tracking operations
pub fn log_tracking_operation(
    operation: &str,
    connection_id: Option<Uuid>,
    order_id: Option<&str>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        connection_id = ?connection_id,
        order_id = order_id,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "📡 TRACKING_OPERATION"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_detection() {
        let env = environment_from(|key| {
            (key == "ORDERTRACK_ENV").then(|| "test_override".to_string())
        });
        assert_eq!(env, "test_override");

        let fallback =
            environment_from(|key| (key == "APP_ENV").then(|| "staging".to_string()));
        assert_eq!(fallback, "staging");

        assert_eq!(environment_from(|_| None), "development");
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(get_log_level("development"), "debug");
        assert_eq!(get_log_level("production"), "info");
        assert_eq!(get_log_level("unknown"), "debug");
    }
}
