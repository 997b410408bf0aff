//! Session state: the transcript, the input buffer and the busy flag.
//!
//! A [`Session`] is owned by the interpreter and mutated only through it.
//! Presentations observe read-only snapshots.

use mcstatus_models::{Transcript, TranscriptEntry};

/// Banner shown when a session starts.
pub const WELCOME_TITLE: &str = "Minecraft Server Status Terminal v1.0";

/// Shown before the input line and before each echoed command.
pub const PROMPT: &str = "guest@terminal:~$ ";

/// Shown before the text of every `error` entry.
pub const ERROR_PREFIX: &str = "Error: ";

/// State of one interactive session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub(crate) transcript: Transcript,
    pub(crate) pending_input: String,
    pub(crate) busy: bool,
    pub(crate) clears: u64,
}

impl Session {
    /// A fresh session showing the welcome banner.
    pub fn new() -> Self {
        Self {
            transcript: Transcript::from_iter([
                TranscriptEntry::system(WELCOME_TITLE),
                TranscriptEntry::system("Type \"help\" to see a list of available commands."),
                TranscriptEntry::output(""),
            ]),
            ..Self::default()
        }
    }

    /// A session with an empty transcript.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Not-yet-submitted input.
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// True exactly while a command is executing.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Number of times the transcript has been cleared. Lets observers tell
    /// a clear followed by new entries apart from plain appends.
    pub fn clear_count(&self) -> u64 {
        self.clears
    }

    /// Apply a keystroke-level edit. Ignored while busy: the input surface is
    /// disabled until the running command finishes.
    pub(crate) fn apply_edit(&mut self, edit: InputEdit) {
        if self.busy {
            return;
        }
        match edit {
            InputEdit::Insert(c) => self.pending_input.push(c),
            InputEdit::Backspace => {
                self.pending_input.pop();
            }
            InputEdit::Replace(text) => self.pending_input = text,
        }
    }

    pub(crate) fn clear_transcript(&mut self) {
        self.transcript.clear();
        self.clears += 1;
    }
}

/// Edits to the pending input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEdit {
    Insert(char),
    Backspace,
    Replace(String),
}

/// Tracks which transcript entries an append-only observer has already
/// consumed.
#[derive(Debug, Default)]
pub struct TranscriptCursor {
    seen: usize,
    clears: u64,
}

impl TranscriptCursor {
    /// Entries added since the last call. A clear resets the cursor so the
    /// entries appended after it are reported from the start.
    pub fn advance<'a>(&mut self, session: &'a Session) -> &'a [TranscriptEntry] {
        if session.clear_count() != self.clears {
            self.clears = session.clear_count();
            self.seen = 0;
        }
        let entries = session.transcript.entries();
        let start = self.seen.min(entries.len());
        self.seen = entries.len();
        &entries[start..]
    }
}
