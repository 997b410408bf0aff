//! Line-oriented presentation: commands from stdin, transcript to stdout.
//!
//! Used with `--plain` for pipes and scripts. Each stdin line is submitted
//! in turn and runs to completion before the next is read. Progress entries
//! are printed while the command runs; everything a command appended is
//! printed before the next line is submitted.

use std::io::{self, Write};

use anyhow::Context;
use mcstatus_models::{EntryKind, TranscriptEntry};
use mcstatus_sdk::{DescriptionGenerator, StatusLookup};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::info;

use crate::interpreter::Interpreter;
use crate::session::{ERROR_PREFIX, PROMPT, Session, TranscriptCursor};

pub async fn run<L, D>(interpreter: Interpreter<L, D>) -> anyhow::Result<()>
where
    L: StatusLookup,
    D: DescriptionGenerator,
{
    let stdin = BufReader::new(tokio::io::stdin());
    drive(interpreter, stdin, io::stdout()).await
}

async fn drive<L, D, R, W>(
    mut interpreter: Interpreter<L, D>,
    input: R,
    mut out: W,
) -> anyhow::Result<()>
where
    L: StatusLookup,
    D: DescriptionGenerator,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut printer = Printer::new(interpreter.subscribe());
    printer.flush(&mut out)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let submit = interpreter.submit(&line);
        tokio::pin!(submit);
        loop {
            tokio::select! {
                () = &mut submit => break,
                Ok(()) = printer.changed() => printer.flush(&mut out)?,
            }
        }
        // Only `clear` removes entries, and it is a whole command: flushing
        // here means no appended entry is ever lost to a later clear.
        printer.flush(&mut out)?;
    }
    info!("end of input");
    Ok(())
}

/// Follows the session and prints each entry once.
struct Printer {
    session: watch::Receiver<Session>,
    cursor: TranscriptCursor,
}

impl Printer {
    fn new(session: watch::Receiver<Session>) -> Self {
        Self {
            session,
            cursor: TranscriptCursor::default(),
        }
    }

    async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.session.changed().await
    }

    fn flush(&mut self, out: &mut impl Write) -> io::Result<()> {
        let fresh = self.cursor.advance(&self.session.borrow_and_update()).to_vec();
        write_entries(out, &fresh)?;
        out.flush()
    }
}

fn write_entries(out: &mut impl Write, entries: &[TranscriptEntry]) -> io::Result<()> {
    for entry in entries {
        match entry.kind() {
            EntryKind::Input => writeln!(out, "{PROMPT}{}", entry.text())?,
            EntryKind::Error => writeln!(out, "{ERROR_PREFIX}{}", entry.text())?,
            EntryKind::Motd => {
                for line in entry.text().lines() {
                    writeln!(out, "  {line}")?;
                }
            }
            _ => writeln!(out, "{}", entry.text())?,
        }
    }
    Ok(())
}
