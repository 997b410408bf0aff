//! # mcstatus SDK
//!
//! Thin clients for the two remote services the status terminal talks to.
//!
//! * [`StatusClient`]: one `GET` against the mcsrvstat.us v3 API,
//!   normalized into a [`ServerStatus`](mcstatus_models::ServerStatus).
//! * [`GeminiClient`]: one `generateContent` call turning a status record
//!   into a short description.
//! * [`StatusLookup`] / [`DescriptionGenerator`]: the seams the terminal
//!   depends on, so tests can substitute fakes.
//! * [`SdkError`]: unified error type; its `Display` is the message shown
//!   to the user.
//!
//! Neither client retries or applies a timeout: every call is a single
//! attempt that resolves when the remote side answers.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use mcstatus_models::ServerAddress;
//! use mcstatus_sdk::{StatusClient, StatusLookup};
//!
//! # async fn run() -> Result<(), mcstatus_sdk::SdkError> {
//! let client = StatusClient::new(mcstatus_sdk::DEFAULT_STATUS_API_URL)?;
//! let status = client.lookup(&ServerAddress::new("play.example.com")).await?;
//! println!("online: {}", status.online);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod gemini;
pub mod prompt;
pub mod status;

pub use client::{DescriptionGenerator, StatusLookup};
pub use error::SdkError;
pub use gemini::{
    DEFAULT_GEMINI_API_URL, DEFAULT_GEMINI_MODEL, GeminiClient, GeminiConfig, UnavailableGenerator,
};
pub use prompt::build_prompt;
pub use status::{DEFAULT_STATUS_API_URL, StatusClient};

/// `User-Agent` sent with every outbound request.
pub const USER_AGENT: &str = concat!("mcstatus-terminal/", env!("CARGO_PKG_VERSION"));
