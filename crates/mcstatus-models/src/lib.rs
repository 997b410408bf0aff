#![deny(missing_docs)]

//! # mcstatus models
//!
//! Core data types shared by the status terminal and its remote clients.
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`transcript`] | `TranscriptEntry`, `EntryKind`, the append-only `Transcript` |
//! | [`status`] | `ServerAddress` and the normalized `ServerStatus` record |
//! | [`error`] | `ModelError` |

pub mod error;
pub mod status;
pub mod transcript;

// Re-export all public types at crate root for convenience.
pub use error::*;
pub use status::*;
pub use transcript::*;
