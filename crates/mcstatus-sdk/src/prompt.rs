//! Prompt construction for server descriptions.
//!
//! [`build_prompt`] is a pure function of the status record so the exact
//! text sent to the model can be asserted in tests.

use mcstatus_models::ServerStatus;

const NOT_AVAILABLE: &str = "Not available";

const INSTRUCTIONS: &str = "\
You are a Minecraft enthusiast who writes lively server reviews.
Using the server information below, write a short, inviting description for a player who is looking for a new server to join.
Interpret the data instead of repeating it: rather than \"Players: 100 / 200\", say something like \"a busy server with a big community\".
Reply with the description text only.";

/// Build the description prompt for `status`.
///
/// Embeds the MOTD (lines joined with spaces), player counts, version and
/// whitelist flag, substituting placeholders for missing values.
pub fn build_prompt(status: &ServerStatus) -> String {
    let motd = match status.motd_lines().join(" ") {
        joined if joined.trim().is_empty() => NOT_AVAILABLE.to_string(),
        joined => joined,
    };
    let players = match status.players {
        Some(p) => format!("{} / {}", p.online, p.max),
        None => "N/A / N/A".to_string(),
    };
    let version = status
        .version
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_AVAILABLE);
    let whitelisted = if status.is_whitelisted() { "Yes" } else { "No" };

    format!(
        "{INSTRUCTIONS}\n\n\
         Server data:\n\
         - Message of the day: {motd}\n\
         - Players: {players}\n\
         - Version: {version}\n\
         - Whitelisted: {whitelisted}\n"
    )
}
