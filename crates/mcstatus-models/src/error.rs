//! Error types for the `mcstatus-models` crate.

/// Errors produced when decoding model types from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The status body decoded, but carries no boolean `online` field.
    #[error("status response has no boolean `online` field")]
    MissingOnlineField,

    /// The status body is not valid JSON or a field has the wrong shape.
    #[error("malformed status response: {0}")]
    MalformedStatus(String),
}
