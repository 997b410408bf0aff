//! Command Interpreter.
//!
//! The interpreter owns the [`Session`] inside a `watch` channel: every
//! mutation goes through [`watch::Sender::send_modify`], so presentations
//! holding a receiver are notified after each step and only ever see
//! read-only snapshots.
//!
//! Commands are strictly serialized. [`Interpreter::submit`] takes
//! `&mut self`, and the request loop in [`Interpreter::run`] drops every
//! request that arrives while a command is in flight.

use mcstatus_models::{ServerAddress, ServerStatus, TranscriptEntry};
use mcstatus_sdk::{DescriptionGenerator, StatusLookup};
use strum::IntoEnumIterator;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::command::{Command, CommandName};
use crate::error::CommandError;
use crate::session::{InputEdit, Session};

/// Requests a presentation sends to the running interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionRequest {
    /// Edit the pending input buffer.
    Edit(InputEdit),
    /// Submit the pending input buffer as a command line.
    Submit,
}

pub struct Interpreter<L, D> {
    state: watch::Sender<Session>,
    lookup: L,
    generator: D,
}

impl<L, D> Interpreter<L, D>
where
    L: StatusLookup,
    D: DescriptionGenerator,
{
    /// Interpreter over a fresh session (welcome banner shown).
    pub fn new(lookup: L, generator: D) -> Self {
        Self::with_session(Session::new(), lookup, generator)
    }

    pub fn with_session(session: Session, lookup: L, generator: D) -> Self {
        let (state, _) = watch::channel(session);
        Self {
            state,
            lookup,
            generator,
        }
    }

    /// Observe the session. The receiver is notified after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Current session snapshot. Do not hold across an `.await`.
    pub fn session(&self) -> watch::Ref<'_, Session> {
        self.state.borrow()
    }

    pub fn edit(&mut self, edit: InputEdit) {
        self.state.send_modify(|s| s.apply_edit(edit));
    }

    /// Execute one raw input line to completion.
    ///
    /// Blank lines append a single empty `input` entry and dispatch nothing.
    /// Otherwise the trimmed line is echoed, the input buffer cleared, and
    /// the command runs with the busy flag set; the flag is reset whether
    /// the command succeeds or fails.
    pub async fn submit(&mut self, raw: &str) {
        if let Some(command) = self.begin(raw) {
            self.execute(command).await;
            self.finish();
        }
    }

    /// Serve requests until every sender is dropped.
    ///
    /// Requests that arrive while a command is running are discarded when it
    /// completes, before the busy flag is cleared: a submission made while
    /// busy is never executed.
    pub async fn run(mut self, mut requests: mpsc::UnboundedReceiver<SessionRequest>) {
        while let Some(request) = requests.recv().await {
            match request {
                SessionRequest::Edit(edit) => self.edit(edit),
                SessionRequest::Submit => {
                    let line = self.session().pending_input().to_string();
                    let Some(command) = self.begin(&line) else {
                        continue;
                    };
                    self.execute(command).await;

                    let mut dropped = 0usize;
                    while requests.try_recv().is_ok() {
                        dropped += 1;
                    }
                    if dropped > 0 {
                        debug!(dropped, "discarded requests received while busy");
                    }
                    self.finish();
                }
            }
        }
        debug!("session request channel closed");
    }

    fn begin(&mut self, raw: &str) -> Option<Command> {
        let line = raw.trim();
        let Some(command) = Command::parse(line) else {
            self.append(TranscriptEntry::input(""));
            return None;
        };

        self.state.send_modify(|s| {
            s.transcript.push(TranscriptEntry::input(line));
            s.pending_input.clear();
            s.busy = true;
        });
        debug!(command = %command, "dispatching command");
        Some(command)
    }

    fn finish(&mut self) {
        self.state.send_modify(|s| s.busy = false);
    }

    async fn execute(&self, command: Command) {
        let result = match command {
            Command::Fetch(address) => self.fetch(address.as_ref()).await,
            Command::Describe(address) => self.describe(address.as_ref()).await,
            Command::Help => {
                self.append_all(help_entries());
                Ok(())
            }
            Command::Clear => {
                self.state.send_modify(Session::clear_transcript);
                Ok(())
            }
            Command::Unknown(name) => Err(CommandError::UnknownCommand(name)),
        };

        if let Err(err) = result {
            debug!(error = %err, "command failed");
            self.append(TranscriptEntry::error(err.to_string()));
        }
    }

    async fn fetch(&self, address: Option<&ServerAddress>) -> Result<(), CommandError> {
        let address = address.ok_or(CommandError::Usage(CommandName::Fetch))?;
        self.append(TranscriptEntry::system(format!("Fetching data for {address}...")));

        let status = self.lookup.lookup(address).await?;
        if !status.online {
            let name = status.display_name(address.as_str());
            info!(address = %address, "server is offline");
            return Err(CommandError::Offline(name.to_string()));
        }

        self.append_all(status_entries(&status));
        Ok(())
    }

    async fn describe(&self, address: Option<&ServerAddress>) -> Result<(), CommandError> {
        let address = address.ok_or(CommandError::Usage(CommandName::Describe))?;
        self.append(TranscriptEntry::system(format!(
            "Fetching data for {address} to generate description..."
        )));

        let status = self.lookup.lookup(address).await?;
        if !status.online {
            let name = status.display_name(address.as_str());
            return Err(CommandError::OfflineNotDescribable(name.to_string()));
        }

        self.append(TranscriptEntry::system("AI is thinking... please wait."));
        let description = self.generator.describe(&status).await?;
        self.append_all([
            TranscriptEntry::output("AI-Generated Description:"),
            TranscriptEntry::output(description),
        ]);
        Ok(())
    }

    fn append(&self, entry: TranscriptEntry) {
        self.state.send_modify(|s| s.transcript.push(entry));
    }

    fn append_all(&self, entries: impl IntoIterator<Item = TranscriptEntry>) {
        self.state.send_modify(|s| s.transcript.extend(entries));
    }
}

/// Output block for an online server.
fn status_entries(status: &ServerStatus) -> Vec<TranscriptEntry> {
    let players = status.players.unwrap_or_default();
    let mut entries = vec![
        TranscriptEntry::output("Status: Online"),
        TranscriptEntry::output(format!(
            "Host: {}",
            status.hostname.as_deref().filter(|h| !h.is_empty()).unwrap_or("N/A")
        )),
        TranscriptEntry::output(format!(
            "Version: {}",
            status.version.as_deref().filter(|v| !v.is_empty()).unwrap_or("N/A")
        )),
        TranscriptEntry::output(format!("Players: {} / {}", players.online, players.max)),
        TranscriptEntry::output(format!(
            "Whitelisted: {}",
            if status.is_whitelisted() { "Yes" } else { "No" }
        )),
    ];

    let motd = status.motd_lines();
    if !motd.is_empty() {
        entries.push(TranscriptEntry::output("MOTD:"));
        entries.push(TranscriptEntry::motd(motd.join("\n")));
    }
    entries
}

/// The fixed help block: a header then one line per command.
pub fn help_entries() -> Vec<TranscriptEntry> {
    std::iter::once(TranscriptEntry::help("Available commands:"))
        .chain(CommandName::iter().map(|name| {
            TranscriptEntry::output(format!("  {:<26}- {}", name.usage(), name.summary()))
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mcstatus_models::{EntryKind, Motd, Players};
    use mcstatus_sdk::SdkError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Lookup backed by fixed fixtures; optionally held until released.
    #[derive(Clone, Default)]
    struct FakeLookup {
        calls: Arc<AtomicUsize>,
        gate: Option<Arc<Notify>>,
    }

    impl FakeLookup {
        fn gated(gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StatusLookup for FakeLookup {
        async fn lookup(&self, address: &ServerAddress) -> Result<ServerStatus, SdkError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match address.as_str() {
                "play.example.com" => Ok(ServerStatus {
                    online: true,
                    hostname: Some("play.example.com".into()),
                    version: Some("1.20".into()),
                    players: Some(Players { online: 5, max: 20 }),
                    whitelist: Some(false),
                    motd: Some(Motd {
                        clean: vec!["Welcome!".into()],
                    }),
                    ..Default::default()
                }),
                "multi.example.com" => Ok(ServerStatus {
                    online: true,
                    whitelist: Some(true),
                    motd: Some(Motd {
                        clean: vec!["Line one".into(), "Line two".into()],
                    }),
                    ..Default::default()
                }),
                "bare.example.com" => Ok(ServerStatus {
                    online: true,
                    motd: Some(Motd { clean: vec![] }),
                    ..Default::default()
                }),
                "dead.example.com" => Ok(ServerStatus {
                    online: false,
                    hostname: Some("dead.example.com".into()),
                    ..Default::default()
                }),
                "nameless.example.com" => Ok(ServerStatus::default()),
                other => Err(SdkError::Lookup {
                    address: other.to_string(),
                    detail: "connection refused".into(),
                }),
            }
        }
    }

    #[derive(Clone)]
    struct FakeGenerator {
        calls: Arc<AtomicUsize>,
        reply: Result<String, SdkError>,
    }

    impl FakeGenerator {
        fn replying(text: &str) -> Self {
            Self {
                calls: Arc::default(),
                reply: Ok(text.to_string()),
            }
        }

        fn failing() -> Self {
            Self {
                calls: Arc::default(),
                reply: Err(SdkError::Generation {
                    detail: "API key not valid".into(),
                }),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DescriptionGenerator for FakeGenerator {
        async fn describe(&self, _status: &ServerStatus) -> Result<String, SdkError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn interpreter() -> Interpreter<FakeLookup, FakeGenerator> {
        Interpreter::with_session(
            Session::empty(),
            FakeLookup::default(),
            FakeGenerator::replying("A cozy survival server."),
        )
    }

    fn entries<L, D>(interp: &Interpreter<L, D>) -> Vec<(EntryKind, String)>
    where
        L: StatusLookup,
        D: DescriptionGenerator,
    {
        interp
            .session()
            .transcript()
            .iter()
            .map(|e| (e.kind(), e.text().to_string()))
            .collect()
    }

    fn e(kind: EntryKind, text: &str) -> (EntryKind, String) {
        (kind, text.to_string())
    }

    #[tokio::test]
    async fn blank_line_appends_one_empty_input() {
        for raw in ["", "   ", "\t \t"] {
            let mut interp = interpreter();
            interp.submit(raw).await;
            assert_eq!(entries(&interp), [e(EntryKind::Input, "")]);
            assert_eq!(interp.lookup.calls(), 0);
            assert!(!interp.session().is_busy());
        }
    }

    #[tokio::test]
    async fn fetch_online_server() {
        let mut interp = interpreter();
        interp.submit("fetch play.example.com").await;

        assert_eq!(
            entries(&interp),
            [
                e(EntryKind::Input, "fetch play.example.com"),
                e(EntryKind::System, "Fetching data for play.example.com..."),
                e(EntryKind::Output, "Status: Online"),
                e(EntryKind::Output, "Host: play.example.com"),
                e(EntryKind::Output, "Version: 1.20"),
                e(EntryKind::Output, "Players: 5 / 20"),
                e(EntryKind::Output, "Whitelisted: No"),
                e(EntryKind::Output, "MOTD:"),
                e(EntryKind::Motd, "Welcome!"),
            ]
        );
        assert!(!interp.session().is_busy());
    }

    #[tokio::test]
    async fn fetch_echo_is_trimmed() {
        let mut interp = interpreter();
        interp.submit("   fetch   play.example.com  ").await;
        assert_eq!(
            entries(&interp)[0],
            e(EntryKind::Input, "fetch   play.example.com")
        );
    }

    #[tokio::test]
    async fn fetch_defaults_for_missing_fields() {
        let mut interp = interpreter();
        interp.submit("fetch bare.example.com").await;

        assert_eq!(
            entries(&interp)[2..],
            [
                e(EntryKind::Output, "Status: Online"),
                e(EntryKind::Output, "Host: N/A"),
                e(EntryKind::Output, "Version: N/A"),
                e(EntryKind::Output, "Players: 0 / 0"),
                e(EntryKind::Output, "Whitelisted: No"),
            ]
        );
    }

    #[tokio::test]
    async fn fetch_joins_multi_line_motd() {
        let mut interp = interpreter();
        interp.submit("fetch multi.example.com").await;

        let all = entries(&interp);
        assert_eq!(all[6], e(EntryKind::Output, "Whitelisted: Yes"));
        assert_eq!(all.last().unwrap(), &e(EntryKind::Motd, "Line one\nLine two"));
    }

    #[tokio::test]
    async fn fetch_offline_server() {
        let mut interp = interpreter();
        interp.submit("fetch dead.example.com").await;

        assert_eq!(
            entries(&interp),
            [
                e(EntryKind::Input, "fetch dead.example.com"),
                e(EntryKind::System, "Fetching data for dead.example.com..."),
                e(EntryKind::Error, "Server dead.example.com is offline."),
            ]
        );
    }

    #[tokio::test]
    async fn offline_without_hostname_uses_address() {
        let mut interp = interpreter();
        interp.submit("fetch nameless.example.com").await;
        assert_eq!(
            entries(&interp).last().unwrap(),
            &e(EntryKind::Error, "Server nameless.example.com is offline.")
        );
    }

    #[tokio::test]
    async fn fetch_lookup_failure() {
        let mut interp = interpreter();
        interp.submit("fetch nowhere.example.com").await;

        assert_eq!(
            entries(&interp)[1..],
            [
                e(EntryKind::System, "Fetching data for nowhere.example.com..."),
                e(
                    EntryKind::Error,
                    "Could not fetch server status for nowhere.example.com. Please check the address and try again."
                ),
            ]
        );
        assert!(!interp.session().is_busy());
    }

    #[tokio::test]
    async fn missing_address_is_a_usage_error_without_remote_calls() {
        let mut interp = interpreter();
        interp.submit("fetch").await;
        interp.submit("describe").await;

        assert_eq!(
            entries(&interp),
            [
                e(EntryKind::Input, "fetch"),
                e(EntryKind::Error, "Usage: fetch <server_address>"),
                e(EntryKind::Input, "describe"),
                e(EntryKind::Error, "Usage: describe <server_address>"),
            ]
        );
        assert_eq!(interp.lookup.calls(), 0);
        assert_eq!(interp.generator.calls(), 0);
    }

    #[tokio::test]
    async fn describe_online_server() {
        let mut interp = interpreter();
        interp.submit("describe play.example.com").await;

        assert_eq!(
            entries(&interp),
            [
                e(EntryKind::Input, "describe play.example.com"),
                e(
                    EntryKind::System,
                    "Fetching data for play.example.com to generate description..."
                ),
                e(EntryKind::System, "AI is thinking... please wait."),
                e(EntryKind::Output, "AI-Generated Description:"),
                e(EntryKind::Output, "A cozy survival server."),
            ]
        );
        assert_eq!(interp.lookup.calls(), 1);
        assert_eq!(interp.generator.calls(), 1);
    }

    #[tokio::test]
    async fn describe_offline_server_skips_generation() {
        let mut interp = interpreter();
        interp.submit("describe dead.example.com").await;

        assert_eq!(
            entries(&interp).last().unwrap(),
            &e(
                EntryKind::Error,
                "Cannot describe server dead.example.com because it is offline."
            )
        );
        assert_eq!(interp.generator.calls(), 0);
    }

    #[tokio::test]
    async fn describe_lookup_failure_stops_before_generation() {
        let mut interp = interpreter();
        interp.submit("describe nowhere.example.com").await;

        let all = entries(&interp);
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].0, EntryKind::Error);
        assert_eq!(interp.generator.calls(), 0);
    }

    #[tokio::test]
    async fn describe_generation_failure() {
        let mut interp = Interpreter::with_session(
            Session::empty(),
            FakeLookup::default(),
            FakeGenerator::failing(),
        );
        interp.submit("describe play.example.com").await;

        assert_eq!(
            entries(&interp)[2..],
            [
                e(EntryKind::System, "AI is thinking... please wait."),
                e(
                    EntryKind::Error,
                    "Failed to generate AI description. The AI might be temporarily unavailable."
                ),
            ]
        );
        assert!(!interp.session().is_busy());
    }

    #[tokio::test]
    async fn help_is_always_the_same_five_entries() {
        let mut interp = interpreter();
        interp.submit("help").await;
        let first = entries(&interp)[1..].to_vec();

        interp.submit("fetch play.example.com").await;
        let before = entries(&interp).len();
        interp.submit("HELP").await;
        let second = entries(&interp)[before + 1..].to_vec();

        assert_eq!(first.len(), 5);
        assert_eq!(first, second);
        assert_eq!(first[0], e(EntryKind::Help, "Available commands:"));
        assert!(first[1].1.starts_with("  fetch <server_address>"));
        assert!(first[2].1.starts_with("  describe <server_address>"));
        assert!(first[3].1.starts_with("  help"));
        assert!(first[4].1.starts_with("  clear"));
        assert!(first[1..].iter().all(|(k, _)| *k == EntryKind::Output));
    }

    #[tokio::test]
    async fn clear_empties_the_transcript_including_its_echo() {
        let mut interp = Interpreter::new(FakeLookup::default(), FakeGenerator::replying("x"));
        interp.submit("help").await;
        assert!(interp.session().transcript().len() > 5);

        interp.submit("clear").await;
        assert!(interp.session().transcript().is_empty());
        assert!(!interp.session().is_busy());

        interp.submit("clear").await;
        assert!(interp.session().transcript().is_empty());
        assert_eq!(interp.session().clear_count(), 2);
    }

    #[tokio::test]
    async fn unknown_command() {
        let mut interp = interpreter();
        interp.submit("unknowncmd foo").await;
        assert_eq!(
            entries(&interp),
            [
                e(EntryKind::Input, "unknowncmd foo"),
                e(EntryKind::Error, "command not found: unknowncmd"),
            ]
        );
    }

    #[tokio::test]
    async fn submit_clears_pending_input() {
        let mut interp = interpreter();
        interp.edit(InputEdit::Replace("help".into()));
        interp.submit("help").await;
        assert_eq!(interp.session().pending_input(), "");
    }

    #[tokio::test]
    async fn observers_see_busy_then_idle() {
        let gate = Arc::new(Notify::new());
        let mut interp = Interpreter::with_session(
            Session::empty(),
            FakeLookup::gated(gate.clone()),
            FakeGenerator::replying("x"),
        );
        let mut session = interp.subscribe();

        let observer = tokio::spawn(async move {
            session.wait_for(Session::is_busy).await.unwrap();
            let during = session.borrow().transcript().len();
            gate.notify_one();
            session.wait_for(|s| !s.is_busy()).await.unwrap();
            during
        });

        interp.submit("fetch play.example.com").await;
        // Echo and the progress notice were visible while the lookup was held.
        assert_eq!(observer.await.unwrap(), 2);
    }

    #[tokio::test]
    async fn run_executes_submitted_input() {
        let interp = interpreter();
        let mut session = interp.subscribe();
        let (tx, rx) = mpsc::unbounded_channel();
        let driver = tokio::spawn(interp.run(rx));

        for c in "help".chars() {
            tx.send(SessionRequest::Edit(InputEdit::Insert(c))).unwrap();
        }
        tx.send(SessionRequest::Submit).unwrap();
        drop(tx);
        driver.await.unwrap();

        let snapshot = session.borrow_and_update();
        assert_eq!(snapshot.transcript().len(), 6);
        assert_eq!(snapshot.transcript().entries()[0].text(), "help");
        assert_eq!(snapshot.pending_input(), "");
    }

    #[tokio::test]
    async fn submissions_while_busy_are_dropped() {
        let gate = Arc::new(Notify::new());
        let lookup = FakeLookup::gated(gate.clone());
        let calls = lookup.calls.clone();
        let interp =
            Interpreter::with_session(Session::empty(), lookup, FakeGenerator::replying("x"));
        let mut session = interp.subscribe();
        let (tx, rx) = mpsc::unbounded_channel();
        let driver = tokio::spawn(interp.run(rx));

        tx.send(SessionRequest::Edit(InputEdit::Replace(
            "fetch play.example.com".into(),
        )))
        .unwrap();
        tx.send(SessionRequest::Submit).unwrap();
        session.wait_for(Session::is_busy).await.unwrap();

        // Arrives while the lookup is suspended.
        tx.send(SessionRequest::Edit(InputEdit::Replace("fetch other.example.com".into())))
            .unwrap();
        tx.send(SessionRequest::Submit).unwrap();
        gate.notify_one();

        session.wait_for(|s| !s.is_busy()).await.unwrap();
        drop(tx);
        driver.await.unwrap();

        let snapshot = session.borrow();
        let inputs: Vec<_> = snapshot
            .transcript()
            .iter()
            .filter(|e| e.kind() == EntryKind::Input)
            .map(TranscriptEntry::text)
            .collect();
        assert_eq!(inputs, ["fetch play.example.com"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(snapshot.pending_input(), "");
    }

    #[test]
    fn help_block_shape() {
        let help = help_entries();
        assert_eq!(help.len(), 5);
        assert_eq!(
            help[1].text(),
            "  fetch <server_address>    - Get status of a Minecraft server."
        );
    }
}
