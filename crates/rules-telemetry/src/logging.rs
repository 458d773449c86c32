//! Structured log helpers.
//!
//! Every contract log line carries a `contract` field naming the emitting
//! component (`token_holder`, `rule_registry`, ...) so JSON output can be
//! filtered per component.

/// Log with a `contract` field.
#[macro_export]
macro_rules! log_event {
    (info, $contract:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            contract = $contract,
            $($($field)*,)?
            $msg
        )
    };

    (warn, $contract:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(
            contract = $contract,
            $($($field)*,)?
            $msg
        )
    };

    (debug, $contract:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(
            contract = $contract,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a rejected call with its revert reason.
#[macro_export]
macro_rules! log_revert {
    ($contract:expr, $operation:expr, $reason:expr $(, $($field:tt)*)?) => {
        tracing::warn!(
            contract = $contract,
            operation = $operation,
            reason = %$reason,
            $($($field)*,)?
            "Call reverted"
        )
    };
}
