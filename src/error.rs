//! Error types.
//!
//! The outcome paths themselves (`evaluate`, `apply_outcome`) never fail.
//! Errors only come from building an evaluator out of a bad configuration
//! and from moving a rating table in or out of its byte form.

/// Invalid victory configuration.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("victory checking is enabled but no optional victory condition is")]
    NoConditionsEnabled,

    #[error("achievement threshold must be a positive finite number, got {0}")]
    InvalidThreshold(f64),

    #[error("{condition} percentage out of range: {value}")]
    InvalidPercent { condition: &'static str, value: u32 },

    #[error("kill count target must be at least 1")]
    ZeroKillTarget,
}

/// Rating store snapshot failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to encode rating snapshot: {0}")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode rating snapshot: {0}")]
    Decode(#[source] bincode::Error),
}
