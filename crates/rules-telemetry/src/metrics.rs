//! Prometheus metrics for the token-rules contracts.
//!
//! All metrics follow the naming convention: `tr_<concern>_<metric>_total`

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Opts, Registry, TextEncoder};
use std::sync::Once;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // SESSION METRICS (token holder)
    // =========================================================================

    /// Ephemeral keys authorized
    pub static ref SESSIONS_AUTHORIZED: Counter = Counter::new(
        "tr_sessions_authorized_total",
        "Total number of ephemeral keys authorized"
    ).expect("metric creation failed");

    /// Ephemeral keys revoked
    pub static ref SESSIONS_REVOKED: Counter = Counter::new(
        "tr_sessions_revoked_total",
        "Total number of ephemeral keys revoked"
    ).expect("metric creation failed");

    // =========================================================================
    // EXECUTION METRICS (token holder)
    // =========================================================================

    /// Signed executions by outcome
    pub static ref RULE_EXECUTIONS: CounterVec = CounterVec::new(
        Opts::new("tr_rule_executions_total", "Total signed rule executions"),
        &["outcome"]  // success / call_failed / rejected
    ).expect("metric creation failed");

    /// Signature / nonce / session verification failures
    pub static ref VERIFICATION_FAILURES: CounterVec = CounterVec::new(
        Opts::new("tr_verification_failures_total", "Total executable transaction verification failures"),
        &["reason"]  // inactive_key / bad_nonce
    ).expect("metric creation failed");

    // =========================================================================
    // REGISTRY METRICS
    // =========================================================================

    /// Transfer batches moved through the registry
    pub static ref TRANSFER_BATCHES: CounterVec = CounterVec::new(
        Opts::new("tr_transfer_batches_total", "Total transfer batches executed by the registry"),
        &["path"]  // execute / process
    ).expect("metric creation failed");

    /// Batches rejected by a global constraint
    pub static ref CONSTRAINT_REJECTIONS: Counter = Counter::new(
        "tr_constraint_rejections_total",
        "Total transfer batches rejected by global constraints"
    ).expect("metric creation failed");
}

static REGISTER: Once = Once::new();

/// Register all metrics with [`REGISTRY`].
///
/// Safe to call more than once; only the first call registers.
///
/// # Errors
///
/// Returns `TelemetryError::MetricsInit` if registration failed.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let mut result = Ok(());
    REGISTER.call_once(|| {
        let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
            // Sessions
            Box::new(SESSIONS_AUTHORIZED.clone()),
            Box::new(SESSIONS_REVOKED.clone()),
            // Execution
            Box::new(RULE_EXECUTIONS.clone()),
            Box::new(VERIFICATION_FAILURES.clone()),
            // Registry
            Box::new(TRANSFER_BATCHES.clone()),
            Box::new(CONSTRAINT_REJECTIONS.clone()),
        ];

        for metric in metrics {
            if let Err(e) = REGISTRY.register(metric) {
                result = Err(TelemetryError::MetricsInit(e.to_string()));
                return;
            }
        }
    });
    result
}

/// Encode all metrics as Prometheus text format.
///
/// # Errors
///
/// Returns `TelemetryError::MetricsInit` if encoding fails.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
