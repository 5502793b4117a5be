//! Telemetry initialization
//!
//! Structured logging via `tracing`. The filter comes from `RUST_LOG` when
//! set, otherwise from configuration. JSON output is meant for log
//! shippers; the human-readable format is the default.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Filter used when `RUST_LOG` is not set
    /// (e.g. "info" or "application=debug,reqwest=warn")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit one JSON object per log line
    #[serde(default)]
    pub json_output: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json_output: false,
        }
    }
}

/// Errors during telemetry setup
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber is already installed
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),
}

/// Install the global tracing subscriber. Call once at startup.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let registry = tracing_subscriber::registry().with(filter);

    if config.json_output {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
    }

    tracing::debug!(filter = %config.log_filter, "Telemetry initialized");
    Ok(())
}
