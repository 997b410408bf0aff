//! SDK error types.
//!
//! [`SdkError`] is the single error type returned by every fallible
//! operation in the SDK. The `Display` text of each variant is written for
//! the end user; the underlying cause travels in `detail` and is only
//! logged.

/// Error type for all SDK operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SdkError {
    /// Invalid or missing configuration (bad URL, missing credential).
    #[error("configuration error: {0}")]
    Config(String),

    /// The status lookup could not complete, was rejected, or returned a
    /// body without a usable `online` field.
    #[error("Could not fetch server status for {address}. Please check the address and try again.")]
    Lookup {
        /// Address the user asked about.
        address: String,
        /// Underlying cause, for logs.
        detail: String,
    },

    /// The text-generation call failed or was rejected.
    #[error("Failed to generate AI description. The AI might be temporarily unavailable.")]
    Generation {
        /// Underlying cause, for logs.
        detail: String,
    },
}

impl SdkError {
    /// Underlying cause, when the variant carries one separately from the
    /// user-facing message.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Config(_) => None,
            Self::Lookup { detail, .. } | Self::Generation { detail } => Some(detail),
        }
    }
}
