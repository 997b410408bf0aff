//! Transcript types.
//!
//! The transcript is everything the terminal has ever shown, in display
//! order. Entries are immutable once created; the only way to remove them
//! is [`Transcript::clear`], which drops the whole sequence.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EntryKind
// ---------------------------------------------------------------------------

/// Rendering tag of a transcript entry.
///
/// The kind only selects a display style; it never changes behaviour.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntryKind {
    /// Echo of a line the user submitted.
    Input,
    /// Regular command output.
    Output,
    /// A failure surfaced to the user.
    Error,
    /// Server message-of-the-day block.
    Motd,
    /// Progress and banner notices.
    System,
    /// Help header.
    Help,
}

// ---------------------------------------------------------------------------
// TranscriptEntry
// ---------------------------------------------------------------------------

/// One line (or block) shown in the terminal.
///
/// # Examples
///
/// ```
/// use mcstatus_models::{EntryKind, TranscriptEntry};
///
/// let entry = TranscriptEntry::error("command not found: foo");
/// assert_eq!(entry.kind(), EntryKind::Error);
/// assert_eq!(entry.text(), "command not found: foo");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    kind: EntryKind,
    text: String,
}

impl TranscriptEntry {
    /// Create an entry of the given kind.
    pub fn new(kind: EntryKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Echo of a submitted line.
    pub fn input(text: impl Into<String>) -> Self {
        Self::new(EntryKind::Input, text)
    }

    /// Command output line.
    pub fn output(text: impl Into<String>) -> Self {
        Self::new(EntryKind::Output, text)
    }

    /// Error line.
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(EntryKind::Error, text)
    }

    /// MOTD block; may span several lines.
    pub fn motd(text: impl Into<String>) -> Self {
        Self::new(EntryKind::Motd, text)
    }

    /// System notice.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(EntryKind::System, text)
    }

    /// Help header line.
    pub fn help(text: impl Into<String>) -> Self {
        Self::new(EntryKind::Help, text)
    }

    /// The rendering tag.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// The literal text to display.
    pub fn text(&self) -> &str {
        &self.text
    }
}

// ---------------------------------------------------------------------------
// Transcript
// ---------------------------------------------------------------------------

/// Append-only ordered log of [`TranscriptEntry`] values.
///
/// There is deliberately no way to remove or rewrite a single entry.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// An empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry at the end.
    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    /// Replace the whole sequence with an empty one.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the transcript holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Iterate entries in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, TranscriptEntry> {
        self.entries.iter()
    }

    /// The most recently appended entry.
    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }
}

impl Extend<TranscriptEntry> for Transcript {
    fn extend<I: IntoIterator<Item = TranscriptEntry>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl FromIterator<TranscriptEntry> for Transcript {
    fn from_iter<I: IntoIterator<Item = TranscriptEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a TranscriptEntry;
    type IntoIter = std::slice::Iter<'a, TranscriptEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
