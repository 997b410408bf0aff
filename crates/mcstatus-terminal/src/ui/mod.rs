//! Full-screen presentation.
//!
//! The interpreter runs as its own task (the session driver). The UI only
//! reads the session through a `watch` receiver and sends
//! [`SessionRequest`](crate::interpreter::SessionRequest)s back.

pub mod terminal;

pub use terminal::TerminalApp;

use mcstatus_sdk::{DescriptionGenerator, StatusLookup};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::interpreter::Interpreter;
use crate::tui::{self, Action, EventHandler, Tui};

pub trait AppController {
    fn update(&mut self, action: Action);
    fn render(&mut self, f: &mut ratatui::Frame);
    fn should_quit(&self) -> bool;
}

/// Run the TUI until the user quits.
pub async fn run<L, D>(interpreter: Interpreter<L, D>, tick_rate: u64) -> anyhow::Result<()>
where
    L: StatusLookup + 'static,
    D: DescriptionGenerator + 'static,
{
    let session = interpreter.subscribe();
    let (requests, request_rx) = mpsc::unbounded_channel();
    let driver = tokio::spawn(interpreter.run(request_rx));

    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(tick_rate);

    // Every published snapshot triggers a redraw.
    let notify = events.get_sender();
    let mut changes = session.clone();
    let forwarder = tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            if notify.send(Action::SessionChanged).is_err() {
                break;
            }
        }
    });

    info!(tick_rate, "terminal UI started");
    let mut app = TerminalApp::new(session, requests);
    let result = event_loop(&mut terminal, &mut events, &mut app).await;

    tui::restore()?;
    forwarder.abort();
    driver.abort();
    debug!("terminal UI stopped");
    result
}

async fn event_loop(
    terminal: &mut Tui,
    events: &mut EventHandler,
    app: &mut impl AppController,
) -> anyhow::Result<()> {
    terminal.draw(|f| app.render(f))?;
    while let Some(action) = events.next_async().await {
        app.update(action);
        if app.should_quit() {
            break;
        }
        terminal.draw(|f| app.render(f))?;
    }
    Ok(())
}
