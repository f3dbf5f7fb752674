use std::collections::VecDeque;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::domain::entities::alert::AlertKind;
use crate::domain::ports::sink::SinkEvent;

const fn kind_color(kind: AlertKind) -> Color {
    match kind {
        AlertKind::Cpu => Color::Red,
        AlertKind::Memory => Color::LightRed,
        AlertKind::Storage => Color::Yellow,
        AlertKind::NetworkSent => Color::Cyan,
    }
}

fn event_item(event: &SinkEvent) -> ListItem<'static> {
    let timestamp = event.timestamp().format("%H:%M:%S").to_string();
    let (headline, style, detail) = match event {
        SinkEvent::Alert(alert) => (
            alert.kind.title().to_string(),
            Style::default().fg(kind_color(alert.kind)),
            alert.message(),
        ),
        SinkEvent::SamplerFailure { error, .. } => (
            "Sampling skipped".to_string(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            error.to_string(),
        ),
    };

    let line = Line::from(vec![
        Span::styled(format!("{timestamp} "), Style::default().fg(Color::DarkGray)),
        Span::styled(headline, style),
        Span::styled(
            format!("  {detail}"),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);
    ListItem::new(line)
}

/// Recent sink events, newest first.
pub fn render_event_panel(frame: &mut Frame, events: &VecDeque<SinkEvent>, area: Rect) {
    let block = Block::default()
        .title("Events")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let items: Vec<ListItem<'_>> = if events.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No alerts",
            Style::default().fg(Color::Green),
        )))]
    } else {
        events.iter().map(event_item).collect()
    };

    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::entities::alert::Alert;
    use crate::domain::ports::sampler::SamplerError;
    use chrono::Utc;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(events: &VecDeque<SinkEvent>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 8)).expect("terminal");
        terminal
            .draw(|frame| render_event_panel(frame, events, frame.area()))
            .expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_kind_color_mapping() {
        assert_eq!(kind_color(AlertKind::Cpu), Color::Red);
        assert_eq!(kind_color(AlertKind::Memory), Color::LightRed);
        assert_eq!(kind_color(AlertKind::Storage), Color::Yellow);
        assert_eq!(kind_color(AlertKind::NetworkSent), Color::Cyan);
    }

    #[test]
    fn test_render_empty() {
        assert!(draw(&VecDeque::new()).contains("No alerts"));
    }

    #[test]
    fn test_render_alert_and_failure() {
        let mut events = VecDeque::new();
        events.push_front(SinkEvent::Alert(Alert {
            kind: AlertKind::Memory,
            measured_value: 93.5,
            threshold: 90.0,
            timestamp: Utc::now(),
        }));
        events.push_front(SinkEvent::SamplerFailure {
            timestamp: Utc::now(),
            error: SamplerError::Unsupported("no filesystem mounted at /".into()),
        });

        let text = draw(&events);
        assert!(text.contains("High Memory Usage Alert"));
        assert!(text.contains("Memory usage is 93.5%."));
        assert!(text.contains("Sampling skipped"));
        assert!(!text.contains("No alerts"));
    }
}
