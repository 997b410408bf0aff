//! Command-line parsing for the interactive prompt.

use std::fmt;

use mcstatus_models::ServerAddress;

/// Names of the recognized commands, in help order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CommandName {
    Fetch,
    Describe,
    Help,
    Clear,
}

impl CommandName {
    /// Synopsis shown in help and usage errors.
    pub fn usage(self) -> &'static str {
        match self {
            Self::Fetch => "fetch <server_address>",
            Self::Describe => "describe <server_address>",
            Self::Help => "help",
            Self::Clear => "clear",
        }
    }

    /// One-line description shown in help.
    pub fn summary(self) -> &'static str {
        match self {
            Self::Fetch => "Get status of a Minecraft server.",
            Self::Describe => "Get an AI-generated description of a server.",
            Self::Help => "Shows this help message.",
            Self::Clear => "Clears the terminal screen.",
        }
    }
}

/// A parsed input line.
///
/// Address arguments are optional here; a missing one is reported by the
/// handler as a usage error. Tokens after the first argument are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Fetch(Option<ServerAddress>),
    Describe(Option<ServerAddress>),
    Help,
    Clear,
    /// First token as typed (case preserved).
    Unknown(String),
}

impl Command {
    /// Parse a line. Returns `None` for blank input.
    ///
    /// The line is split on runs of whitespace; the first token selects the
    /// command case-insensitively.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next()?;
        let address = tokens.next().map(ServerAddress::new);

        let command = match name.parse::<CommandName>() {
            Ok(CommandName::Fetch) => Self::Fetch(address),
            Ok(CommandName::Describe) => Self::Describe(address),
            Ok(CommandName::Help) => Self::Help,
            Ok(CommandName::Clear) => Self::Clear,
            Err(_) => Self::Unknown(name.to_string()),
        };
        Some(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(Some(a)) => write!(f, "fetch {a}"),
            Self::Describe(Some(a)) => write!(f, "describe {a}"),
            Self::Fetch(None) => f.write_str("fetch"),
            Self::Describe(None) => f.write_str("describe"),
            Self::Help => f.write_str("help"),
            Self::Clear => f.write_str("clear"),
            Self::Unknown(name) => write!(f, "{name} (unknown)"),
        }
    }
}
