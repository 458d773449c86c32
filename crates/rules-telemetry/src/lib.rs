//! # Rules Telemetry
//!
//! Logging and metrics for the token holder and rule registry.
//!
//! - Structured logs through `tracing` / `tracing-subscriber`
//!   (human-readable or JSON)
//! - Prometheus counters for sessions, executions and transfer batches
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rules_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     init_telemetry(&TelemetryConfig::from_env()).expect("Failed to init telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TR_SERVICE_NAME` | `token-rules` | Service name in logs |
//! | `TR_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `TR_JSON_LOGS` | `false` | JSON formatted logs |
//! | `TR_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, register_metrics, CONSTRAINT_REJECTIONS, RULE_EXECUTIONS, SESSIONS_AUTHORIZED,
    SESSIONS_REVOKED, TRANSFER_BATCHES, VERIFICATION_FAILURES,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracerInit(String),

    /// Prometheus registration or encoding failed.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// The configuration is invalid (e.g. a bad filter directive).
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics and install the global tracing subscriber.
///
/// # Errors
///
/// See [`TelemetryError`].
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    // Metrics first; they never depend on the subscriber.
    register_metrics()?;
    tracing_setup::init_tracing(config)
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
