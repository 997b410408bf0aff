//! Server status types.
//!
//! [`ServerStatus`] mirrors the subset of the mcsrvstat.us v3 response the
//! terminal displays. Control and formatting codes in the MOTD are already
//! stripped by the upstream API (`motd.clean`) and are consumed as-is.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

// ---------------------------------------------------------------------------
// ServerAddress
// ---------------------------------------------------------------------------

/// Address of a Minecraft server as typed by the user
/// (`host`, `host:port` or an IP literal).
///
/// # Examples
///
/// ```
/// use mcstatus_models::ServerAddress;
///
/// let addr = ServerAddress::new("play.example.com");
/// assert_eq!(addr.to_string(), "play.example.com");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerAddress(String);

impl ServerAddress {
    /// Create a new address from a string slice.
    pub fn new(address: &str) -> Self {
        Self(address.to_string())
    }

    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServerAddress {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ServerAddress {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for ServerAddress {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// ServerStatus
// ---------------------------------------------------------------------------

/// Player counts reported by an online server.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Players {
    /// Players currently connected.
    #[serde(default)]
    pub online: u32,
    /// Player slots.
    #[serde(default)]
    pub max: u32,
}

/// Message of the day, already stripped of formatting codes.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Motd {
    /// Plain-text lines, in order.
    #[serde(default)]
    pub clean: Vec<String>,
}

/// Normalized status of a Minecraft server.
///
/// Only `online` is required. When `online` is false the player, MOTD and
/// version fields are not live data and must not be presented as such.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerStatus {
    /// Whether the server answered the status ping.
    pub online: bool,
    /// Resolved IP address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// Resolved port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Hostname as reported by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Version label (free text, e.g. `"1.20.4"` or `"Paper 1.21"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Player counts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players: Option<Players>,
    /// Message of the day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motd: Option<Motd>,
    /// Whether a whitelist is enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whitelist: Option<bool>,
}

impl ServerStatus {
    /// Decode a raw status response body.
    ///
    /// The body must be a JSON object carrying a boolean `online` field;
    /// anything else is rejected. Unknown fields are ignored.
    pub fn from_json(body: &[u8]) -> Result<Self, ModelError> {
        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| ModelError::MalformedStatus(e.to_string()))?;

        if !value.get("online").is_some_and(serde_json::Value::is_boolean) {
            return Err(ModelError::MissingOnlineField);
        }

        serde_json::from_value(value).map_err(|e| ModelError::MalformedStatus(e.to_string()))
    }

    /// Name to show for this server: the reported hostname, or `fallback`
    /// (usually the address the user typed) when the API gave none.
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.hostname
            .as_deref()
            .filter(|h| !h.is_empty())
            .unwrap_or(fallback)
    }

    /// MOTD lines, or an empty slice when the server sent none.
    pub fn motd_lines(&self) -> &[String] {
        self.motd
            .as_ref()
            .map(|m| m.clean.as_slice())
            .unwrap_or_default()
    }

    /// Whether the server reports an enforced whitelist. Missing means no.
    pub fn is_whitelisted(&self) -> bool {
        self.whitelist.unwrap_or(false)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
