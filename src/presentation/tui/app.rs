use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use tokio::sync::{mpsc, watch};

use crate::application::services::monitor::HistoryReader;
use crate::domain::entities::sample::MetricSample;
use crate::domain::ports::sink::SinkEvent;
use crate::presentation::tui::widgets::charts::render_charts;
use crate::presentation::tui::widgets::event_panel::render_event_panel;

const MAX_RECENT_EVENTS: usize = 50;
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Dashboard state. Owns its copies of the data; the monitor is only reached
/// through the reader, the event channel and the generation counter.
pub struct App {
    reader: HistoryReader,
    events_rx: mpsc::Receiver<SinkEvent>,
    generation: watch::Receiver<u64>,

    samples: Vec<MetricSample>,
    /// Newest first
    events: VecDeque<SinkEvent>,

    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(
        reader: HistoryReader,
        events_rx: mpsc::Receiver<SinkEvent>,
        generation: watch::Receiver<u64>,
    ) -> Self {
        Self {
            reader,
            events_rx,
            generation,
            samples: Vec::new(),
            events: VecDeque::with_capacity(MAX_RECENT_EVENTS),
            should_quit: false,
        }
    }

    /// Pull new history (only when the generation moved) and drain pending events.
    fn refresh_data(&mut self) {
        // A dropped monitor still leaves the last history readable
        let changed = self.generation.has_changed().unwrap_or(true);
        if changed {
            self.generation.borrow_and_update();
            self.samples = self.reader.snapshot();
        }

        while let Ok(event) = self.events_rx.try_recv() {
            self.events.push_front(event);
        }
        self.events.truncate(MAX_RECENT_EVENTS);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            self.should_quit = true;
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [header_area, chart_area, event_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(8),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_header(frame, header_area);
        render_charts(frame, &self.samples, self.reader.thresholds(), chart_area);
        render_event_panel(frame, &self.events, event_area);
        Self::render_status_bar(frame, status_area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let timestamp = self.samples.last().map_or_else(
            || "--:--:--".to_string(),
            |s| s.timestamp().format("%H:%M:%S").to_string(),
        );

        let header = Line::from(vec![
            Span::styled(
                " VMWATCH ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("│ "),
            Span::styled(
                format!("{} samples", self.samples.len()),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(" │ "),
            Span::styled(timestamp, Style::default().fg(Color::DarkGray)),
        ]);

        frame.render_widget(Paragraph::new(header), area);
    }

    fn render_status_bar(frame: &mut Frame, area: Rect) {
        let key_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        let bar = Line::from(vec![
            Span::styled(" q", key_style),
            Span::raw("/"),
            Span::styled("Esc", key_style),
            Span::raw(":quit and report"),
        ]);

        frame.render_widget(
            Paragraph::new(bar).style(Style::default().bg(Color::DarkGray)),
            area,
        );
    }
}

/// Restore the terminal to its normal state.
fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        eprintln!("Failed to disable raw mode: {e}");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen) {
        eprintln!("Failed to leave alternate screen: {e}");
    }
}

/// Launch the interactive dashboard. Blocks until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup, rendering, or event handling fails.
pub fn run_tui(mut app: App) -> anyhow::Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("Failed to enter alternate screen");
    }

    // Restore the terminal even on panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_hook(info);
    }));

    let backend = CrosstermBackend::new(stdout);
    let result = Terminal::new(backend)
        .context("Failed to create terminal")
        .and_then(|mut terminal| {
            let result = run_app_loop(&mut terminal, &mut app);
            let _ = terminal.show_cursor();
            result
        });

    restore_terminal();
    let _ = std::panic::take_hook();

    result
}

fn run_app_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        app.refresh_data();
        terminal.draw(|frame| app.draw(frame))?;

        if event::poll(POLL_INTERVAL)? {
            if let CrosstermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
