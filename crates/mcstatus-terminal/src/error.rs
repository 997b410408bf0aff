//! Command failures.
//!
//! Every variant is terminal for the current command only: the interpreter
//! turns it into a single `error` transcript entry using its `Display` text.

use mcstatus_sdk::SdkError;

use crate::command::CommandName;

/// Why a command produced an error entry instead of output.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// A required argument was missing. Detected before any remote call.
    #[error("Usage: {}", .0.usage())]
    Usage(CommandName),

    /// The status lookup or the description request failed.
    #[error(transparent)]
    Remote(#[from] SdkError),

    /// The server answered the lookup as offline.
    #[error("Server {0} is offline.")]
    Offline(String),

    /// `describe` was asked about an offline server.
    #[error("Cannot describe server {0} because it is offline.")]
    OfflineNotDescribable(String),

    /// The first token matched no command.
    #[error("command not found: {0}")]
    UnknownCommand(String),
}
