use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mcstatus_models::{EntryKind, TranscriptEntry};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::{mpsc::UnboundedSender, watch};

use super::AppController;
use crate::interpreter::SessionRequest;
use crate::session::{ERROR_PREFIX, InputEdit, PROMPT, Session, WELCOME_TITLE};
use crate::tui::Action;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const MOTD_INDENT: &str = "  ";

pub struct TerminalApp {
    session: watch::Receiver<Session>,
    requests: UnboundedSender<SessionRequest>,
    spinner: usize,
    should_quit: bool,
}

impl TerminalApp {
    pub fn new(
        session: watch::Receiver<Session>,
        requests: UnboundedSender<SessionRequest>,
    ) -> Self {
        Self {
            session,
            requests,
            spinner: 0,
            should_quit: false,
        }
    }

    fn send(&mut self, request: SessionRequest) {
        // Driver gone: nothing left to talk to.
        if self.requests.send(request).is_err() {
            self.should_quit = true;
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if key.code == KeyCode::Esc || (ctrl && key.code == KeyCode::Char('c')) {
            self.should_quit = true;
            return;
        }

        // Input is disabled while a command runs.
        if self.session.borrow().is_busy() {
            return;
        }

        match key.code {
            KeyCode::Char(c) if !ctrl => self.send(SessionRequest::Edit(InputEdit::Insert(c))),
            KeyCode::Backspace => self.send(SessionRequest::Edit(InputEdit::Backspace)),
            KeyCode::Enter => self.send(SessionRequest::Submit),
            _ => {}
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect, busy: bool) {
        let state = if busy {
            Span::styled(
                format!("BUSY {}", SPINNER[self.spinner]),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                "READY",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )
        };

        let header = Paragraph::new(Line::from(vec![Span::raw("Status: "), state]))
            .block(Block::default().borders(Borders::ALL).title(WELCOME_TITLE));
        f.render_widget(header, area);
    }
}

/// Prefix, prefix style and text style for each entry kind.
fn entry_style(kind: EntryKind) -> (&'static str, Style, Style) {
    let plain = Style::default();
    match kind {
        EntryKind::Input => (PROMPT, plain.fg(Color::Green), plain),
        EntryKind::Output => ("", plain, plain),
        EntryKind::Error => {
            let red = plain.fg(Color::Red);
            (ERROR_PREFIX, red, red)
        }
        EntryKind::System => ("", plain, plain.fg(Color::Yellow)),
        EntryKind::Help => ("", plain, plain.fg(Color::Blue).add_modifier(Modifier::BOLD)),
        EntryKind::Motd => {
            let cyan = plain.fg(Color::Cyan);
            (MOTD_INDENT, cyan, cyan)
        }
    }
}

/// Screen rows for one entry at `width` columns.
///
/// Embedded newlines start new rows and long rows are wrapped. The prefix
/// goes on the first row; continuation rows are indented to line up under
/// the text.
fn entry_lines(entry: &TranscriptEntry, width: usize) -> Vec<Line<'static>> {
    let (prefix, prefix_style, text_style) = entry_style(entry.kind());
    let prefix_width = prefix.chars().count();
    let indent = " ".repeat(prefix_width);

    wrap_text(entry.text(), width.saturating_sub(prefix_width))
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let lead = if i == 0 { prefix.to_string() } else { indent.clone() };
            Line::from(vec![
                Span::styled(lead, prefix_style),
                Span::styled(row, text_style),
            ])
        })
        .collect()
}

/// Split `text` into rows of at most `width` characters.
///
/// Breaks at the last space that fits and consumes it; a word longer than
/// the row is cut. Empty text still yields one (empty) row.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let mut rest = line.strip_suffix('\r').unwrap_or(line);
        while rest.chars().count() > width {
            let cut = rest.char_indices().nth(width).map_or(rest.len(), |(i, _)| i);
            let (row, next) = if rest[cut..].starts_with(' ') {
                (&rest[..cut], &rest[cut + 1..])
            } else if let Some(space) = rest[..cut].rfind(' ').filter(|&i| i > 0) {
                (&rest[..space], &rest[space + 1..])
            } else {
                (&rest[..cut], &rest[cut..])
            };
            rows.push(row.to_string());
            rest = next;
        }
        rows.push(rest.to_string());
    }
    rows
}

/// First line to show so the last `total` lines end at the bottom of `height`.
fn scroll_offset(total: usize, height: u16) -> u16 {
    u16::try_from(total.saturating_sub(usize::from(height))).unwrap_or(u16::MAX)
}

impl AppController for TerminalApp {
    fn update(&mut self, action: Action) {
        match action {
            Action::Key(key) => self.handle_key(key),
            Action::Tick => {
                if self.session.borrow().is_busy() {
                    self.spinner = (self.spinner + 1) % SPINNER.len();
                }
            }
            Action::Resize(..) | Action::SessionChanged => {}
        }
    }

    fn render(&mut self, f: &mut Frame) {
        let session = self.session.borrow().clone();
        let busy = session.is_busy();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(f.area());

        self.render_header(f, chunks[0], busy);

        // Rows are pre-wrapped to the inner width so the scroll offset
        // counts exactly what is drawn.
        let width = usize::from(chunks[1].width.saturating_sub(2));
        let lines: Vec<Line> = session
            .transcript()
            .iter()
            .flat_map(|entry| entry_lines(entry, width))
            .collect();
        let offset = scroll_offset(lines.len(), chunks[1].height.saturating_sub(2));
        let transcript = Paragraph::new(lines)
            .scroll((offset, 0))
            .block(Block::default().borders(Borders::ALL).title("Transcript"));
        f.render_widget(transcript, chunks[1]);

        let pending = session.pending_input();
        let (title, style) = if busy {
            ("Input (waiting...)", Style::default().fg(Color::DarkGray))
        } else {
            ("Input", Style::default())
        };
        let input = Paragraph::new(Line::from(vec![
            Span::styled(PROMPT, Style::default().fg(Color::Green)),
            Span::raw(pending.to_string()),
        ]))
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(input, chunks[2]);

        if !busy {
            let typed = PROMPT.chars().count() + pending.chars().count();
            let typed = u16::try_from(typed).unwrap_or(u16::MAX);
            f.set_cursor_position((
                chunks[2].x.saturating_add(1).saturating_add(typed),
                chunks[2].y + 1,
            ));
        }
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }
}
