//! Terminal chat view
//!
//! Single-screen client: transcript on top, input line below, status bar
//! at the bottom. The event loop multiplexes terminal events and API
//! replies over one `select!`, so the UI stays responsive while a request
//! is in flight.

pub mod markdown;
pub mod text;
pub mod themes;

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use unicode_width::UnicodeWidthStr;

use crate::api::{GenerativeClient, FAILED_REPLY};
use crate::session::{Author, SessionStore, StoredMessage};
use markdown::RenderCache;
use text::wrap_lines;
use themes::Theme;

/// Placeholder shown while a reply is in flight
const PENDING_REPLY: &str = "...";

/// A finished API round-trip, delivered back to the event loop
struct Reply {
    text: String,
}

struct App {
    client: GenerativeClient,
    store: SessionStore,
    theme: Theme,
    cache: RenderCache,
    input: String,
    /// Rows scrolled up from the bottom of the transcript
    scroll_offset: usize,
    /// Transcript viewport height at the last draw - the PgUp/PgDn step
    page_rows: usize,
    waiting: bool,
    should_quit: bool,
    reply_tx: mpsc::UnboundedSender<Reply>,
}

impl App {
    fn new(
        client: GenerativeClient,
        store: SessionStore,
        theme: Theme,
        reply_tx: mpsc::UnboundedSender<Reply>,
    ) -> Self {
        Self {
            client,
            store,
            theme,
            cache: RenderCache::new(),
            input: String::new(),
            scroll_offset: 0,
            page_rows: 1,
            waiting: false,
            should_quit: false,
            reply_tx,
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        themes::save_preferred(&self.theme);
    }

    fn persist(&self) {
        if let Err(err) = self.store.save() {
            tracing::warn!(error = %err, "failed to save sessions");
        }
    }

    fn send_message(&mut self) {
        if self.waiting {
            return;
        }
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return;
        }
        self.input.clear();

        let session = self.store.current_mut();
        session.title_from(&text);
        session
            .messages
            .push(StoredMessage::new(Author::User, text.clone()));
        self.persist();

        self.push_pending();
        self.spawn_request(text);
    }

    /// Drop the last assistant reply and ask again for the message before it
    fn regenerate(&mut self) {
        if self.waiting {
            return;
        }
        let Some(text) = self.take_regenerate_target() else {
            return;
        };
        self.persist();

        self.push_pending();
        self.spawn_request(text);
    }

    /// Pop a trailing assistant reply and return the user message to re-send
    fn take_regenerate_target(&mut self) -> Option<String> {
        let session = self.store.current_mut();
        if !matches!(
            session.messages.last().map(|message| message.author),
            Some(Author::Assistant)
        ) {
            return None;
        }
        session.messages.pop();

        session
            .messages
            .iter()
            .rev()
            .find(|message| message.author == Author::User)
            .map(|message| message.text.clone())
    }

    /// Append the in-flight placeholder to the transcript
    fn push_pending(&mut self) {
        self.store
            .current_mut()
            .messages
            .push(StoredMessage::new(Author::Assistant, PENDING_REPLY));
        self.waiting = true;
        self.scroll_offset = 0;
    }

    /// Run the request off the UI task; errors degrade to the fallback reply
    fn spawn_request(&self, text: String) {
        let client = self.client.clone();
        let tx = self.reply_tx.clone();
        tokio::spawn(async move {
            let reply = match client.generate(&text).await {
                Ok(reply) => reply,
                Err(err) => {
                    tracing::warn!(error = %err, "generate request failed");
                    FAILED_REPLY.to_string()
                }
            };
            // The receiver lives as long as the event loop
            let _ = tx.send(Reply { text: reply });
        });
    }

    /// Replace the pending placeholder with the real reply
    fn apply_reply(&mut self, reply: Reply) {
        self.waiting = false;
        self.scroll_offset = 0;

        let session = self.store.current_mut();
        let pending = session
            .messages
            .iter()
            .rposition(|message| message.author == Author::Assistant && message.text == PENDING_REPLY);
        match pending {
            Some(index) => session.messages[index].text = reply.text,
            None => session
                .messages
                .push(StoredMessage::new(Author::Assistant, reply.text)),
        }
        self.persist();
    }
}

/// Run the chat view until the user quits
pub async fn run(client: GenerativeClient, store: SessionStore, theme: Theme) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (reply_tx, reply_rx) = mpsc::unbounded_channel();
    let mut app = App::new(client, store, theme, reply_tx);

    let result = run_loop(&mut terminal, &mut app, reply_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    mut reply_rx: mpsc::UnboundedReceiver<Reply>,
) -> Result<()> {
    let mut events = EventStream::new();

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, app))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => handle_key(app, key),
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    tracing::warn!(error = %err, "terminal event error");
                }
                None => break,
            },
            Some(reply) = reply_rx.recv() => app.apply_reply(reply),
        }
    }

    app.persist();
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('c') if ctrl => app.should_quit = true,
        KeyCode::Char('d') if ctrl => app.toggle_theme(),
        KeyCode::Char('r') if ctrl => app.regenerate(),
        KeyCode::Enter => app.send_message(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::PageUp => {
            app.scroll_offset = app.scroll_offset.saturating_add(app.page_rows);
        }
        KeyCode::PageDown => {
            app.scroll_offset = app.scroll_offset.saturating_sub(app.page_rows);
        }
        KeyCode::End => app.scroll_offset = 0,
        KeyCode::Char(c) if !ctrl => app.input.push(c),
        _ => {}
    }
}

fn draw(frame: &mut Frame, app: &mut App) {
    let areas = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .split(frame.area());

    draw_transcript(frame, app, areas[0]);
    draw_input(frame, app, areas[1]);
    draw_status(frame, app, areas[2]);
}

/// Build the full transcript as wrapped rows: a bold role label above each
/// message, assistant text through the markdown renderer, user text plain
fn transcript_rows(app: &mut App, width: usize) -> Vec<Line<'static>> {
    let App {
        store,
        cache,
        theme,
        ..
    } = app;
    cache.check(theme, width);

    let mut rows: Vec<Line<'static>> = Vec::new();
    for message in &store.current().messages {
        let (label, color) = match message.author {
            Author::User => ("You", theme.user_msg_color),
            Author::Assistant => ("Assistant", theme.assistant_msg_color),
        };
        rows.push(Line::from(Span::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));

        match message.author {
            // Failed round-trips are stored as the fallback string; style
            // them as an error instead of feeding them to the renderer
            Author::Assistant if message.text == FAILED_REPLY => {
                rows.push(Line::from(Span::styled(
                    FAILED_REPLY,
                    Style::default().fg(theme.error_color),
                )));
            }
            Author::Assistant => {
                let lines = cache.get_or_render(&message.text, theme, width);
                rows.extend(lines.iter().cloned());
            }
            Author::User => {
                let lines: Vec<Line<'static>> = message
                    .text
                    .split('\n')
                    .map(|part| {
                        Line::from(Span::styled(
                            part.to_string(),
                            Style::default().fg(theme.text_color),
                        ))
                    })
                    .collect();
                rows.extend(wrap_lines(&lines, width));
            }
        }

        rows.push(Line::default());
    }

    rows
}

fn draw_transcript(frame: &mut Frame, app: &mut App, area: Rect) {
    let width = (area.width as usize).max(1);
    let height = area.height as usize;
    app.page_rows = height.max(1);

    let rows = transcript_rows(app, width);

    let max_offset = rows.len().saturating_sub(height);
    if app.scroll_offset > max_offset {
        app.scroll_offset = max_offset;
    }
    let start = rows.len().saturating_sub(height + app.scroll_offset);
    let end = (start + height).min(rows.len());
    let visible = rows[start..end].to_vec();

    let paragraph = Paragraph::new(Text::from(visible)).style(
        Style::default()
            .bg(app.theme.bg_color)
            .fg(app.theme.text_color),
    );
    frame.render_widget(paragraph, area);
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let (content, style) = if app.input.is_empty() {
        (
            "Send a message...".to_string(),
            Style::default().fg(theme.input_placeholder_color),
        )
    } else {
        (app.input.clone(), Style::default().fg(theme.text_color))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.input_border_color))
        .title("Message");
    let paragraph = Paragraph::new(content)
        .style(style.bg(theme.bg_color))
        .block(block);
    frame.render_widget(paragraph, area);

    // Cursor sits after the typed text, clamped inside the box
    let cursor_x = (area.x as usize + 1 + UnicodeWidthStr::width(app.input.as_str()))
        .min(area.right().saturating_sub(2) as usize) as u16;
    frame.set_cursor_position((cursor_x, area.y + 1));
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let state = if app.waiting { "waiting for reply" } else { "ready" };
    let status = format!(
        " {} \u{00b7} {} \u{00b7} {} \u{00b7} {}",
        app.store.current().title,
        app.client.model(),
        theme.name,
        state
    );
    let hints = "  Enter send \u{00b7} ^R regen \u{00b7} ^D theme \u{00b7} PgUp/PgDn scroll \u{00b7} Esc quit";

    let line = Line::from(vec![
        Span::styled(status, Style::default().fg(theme.title_color)),
        Span::styled(hints, Style::default().fg(theme.dim_color)),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.bg_color)),
        area,
    );
}
