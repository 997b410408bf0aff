//! Terminal configuration.
//!
//! Built from environment variables at startup; command-line flags in
//! `main` override individual fields afterwards.

use mcstatus_sdk::{
    DEFAULT_GEMINI_API_URL, DEFAULT_GEMINI_MODEL, DEFAULT_STATUS_API_URL, GeminiConfig,
};

/// Everything the terminal needs to reach its two remote services.
#[derive(Debug, Clone)]
pub struct TerminalConfig {
    /// Root of the status lookup API; the address is appended as a path
    /// segment.
    pub status_api_url: String,
    /// Description generator settings.
    pub gemini: GeminiConfig,
}

impl TerminalConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable         | Default                                            |
    /// |------------------|----------------------------------------------------|
    /// | `STATUS_API_URL` | `https://api.mcsrvstat.us/3`                       |
    /// | `API_KEY`        | unset                                              |
    /// | `GEMINI_MODEL`   | `gemini-2.5-flash`                                 |
    /// | `GEMINI_API_URL` | `https://generativelanguage.googleapis.com/v1beta` |
    ///
    /// Empty values count as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| var(name).filter(|v| !v.trim().is_empty());

        Self {
            status_api_url: get("STATUS_API_URL")
                .unwrap_or_else(|| DEFAULT_STATUS_API_URL.to_string()),
            gemini: GeminiConfig {
                api_key: get("API_KEY"),
                model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                api_url: get("GEMINI_API_URL")
                    .unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string()),
            },
        }
    }
}
