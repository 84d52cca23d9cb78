//! Error types for simulator misuse.

use thiserror::Error;

/// Contract violations reported by [`MetricsSimulator`](super::MetricsSimulator).
///
/// Arithmetic inside the simulator is always clamped, so every variant here
/// describes a caller bug rather than a runtime condition to recover from.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// `step()` or `current_snapshot()` called before `initialize()`.
    #[error("simulator has not been initialized")]
    NotInitialized,

    /// `initialize()` called on a simulator that already owns gauges.
    #[error("simulator is already initialized")]
    AlreadyInitialized,

    /// `step()` called after `stop()`.
    #[error("simulator has been stopped")]
    Stopped,

    /// A gauge name that was never configured.
    #[error("unknown gauge: {0}")]
    UnknownGauge(String),

    /// A gauge configuration that cannot be simulated.
    #[error("invalid config for gauge '{gauge}': {reason}")]
    InvalidConfig { gauge: String, reason: String },

    /// Status thresholds that cannot classify consistently.
    #[error("invalid thresholds: {reason}")]
    InvalidThresholds { reason: String },

    /// `initialize()` called with an empty gauge list.
    #[error("at least one gauge must be configured")]
    NoGauges,
}
