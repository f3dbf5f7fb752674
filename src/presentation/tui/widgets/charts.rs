use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType};
use ratatui::Frame;

use crate::domain::entities::sample::MetricSample;
use crate::domain::value_objects::thresholds::ThresholdSet;
use crate::presentation::cli::formatters::status_fmt::format_bytes;

fn threshold_color(value: f64, threshold: f64) -> Color {
    if value > threshold {
        Color::Red
    } else if value > threshold * 0.8 {
        Color::Yellow
    } else {
        Color::Green
    }
}

#[allow(clippy::cast_precision_loss)]
fn series(samples: &[MetricSample], metric: impl Fn(&MetricSample) -> f64) -> Vec<(f64, f64)> {
    samples
        .iter()
        .enumerate()
        .map(|(i, s)| (i as f64, metric(s)))
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn x_bounds(len: usize) -> [f64; 2] {
    [0.0, len.saturating_sub(1).max(1) as f64]
}

fn axis_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// CPU, memory, network and storage charts over the history, in a 2x2 grid.
pub fn render_charts(
    frame: &mut Frame,
    samples: &[MetricSample],
    thresholds: &ThresholdSet,
    area: Rect,
) {
    let [top, bottom] = Layout::vertical([Constraint::Percentage(50); 2]).areas(area);
    let [cpu_area, memory_area] = Layout::horizontal([Constraint::Percentage(50); 2]).areas(top);
    let [network_area, storage_area] =
        Layout::horizontal([Constraint::Percentage(50); 2]).areas(bottom);

    render_percent_chart(
        frame,
        "CPU",
        &series(samples, MetricSample::cpu_percent),
        thresholds.cpu_percent,
        Color::Cyan,
        cpu_area,
    );
    render_percent_chart(
        frame,
        "Memory",
        &series(samples, MetricSample::memory_percent),
        thresholds.memory_percent,
        Color::Magenta,
        memory_area,
    );
    render_network_chart(frame, samples, thresholds.network_sent_bytes, network_area);
    render_percent_chart(
        frame,
        "Storage",
        &series(samples, MetricSample::storage_percent),
        thresholds.storage_percent,
        Color::Blue,
        storage_area,
    );
}

fn render_percent_chart(
    frame: &mut Frame,
    title: &str,
    points: &[(f64, f64)],
    threshold: f64,
    color: Color,
    area: Rect,
) {
    let latest = points.last().map(|&(_, v)| v);
    let title_text = latest.map_or_else(|| format!(" {title} "), |v| format!(" {title} {v:.1}% "));
    let title_color = latest.map_or(Color::DarkGray, |v| threshold_color(v, threshold));

    let x = x_bounds(points.len());
    let limit = [(x[0], threshold), (x[1], threshold)];

    let datasets = vec![
        Dataset::default()
            .name(title)
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(points),
        Dataset::default()
            .name("limit")
            .marker(Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::DIM))
            .data(&limit),
    ];

    let chart = Chart::new(datasets)
        .block(Block::bordered().title(Span::styled(
            title_text,
            Style::default()
                .fg(title_color)
                .add_modifier(Modifier::BOLD),
        )))
        .x_axis(Axis::default().bounds(x).style(axis_style()))
        .y_axis(
            Axis::default()
                .bounds([0.0, 100.0])
                .labels(["0", "50", "100"])
                .style(axis_style()),
        )
        .legend_position(None);

    frame.render_widget(chart, area);
}

/// Cumulative sent and received counters. Only the sent counter has a limit.
#[allow(clippy::cast_precision_loss)]
fn render_network_chart(frame: &mut Frame, samples: &[MetricSample], limit: u64, area: Rect) {
    let sent = series(samples, |s| s.network_bytes_sent() as f64);
    let received = series(samples, |s| s.network_bytes_received() as f64);

    let peak = samples
        .iter()
        .map(|s| s.network_bytes_sent().max(s.network_bytes_received()))
        .max()
        .unwrap_or(0)
        .max(limit);
    let y_max = (peak as f64 * 1.1).max(1.0);

    let x = x_bounds(samples.len());
    let limit_line = [(x[0], limit as f64), (x[1], limit as f64)];

    let title_text = samples.last().map_or_else(
        || " Network ".to_string(),
        |s| {
            format!(
                " Network ↑{} ↓{} ",
                format_bytes(s.network_bytes_sent()),
                format_bytes(s.network_bytes_received())
            )
        },
    );
    let title_color = samples.last().map_or(Color::DarkGray, |s| {
        if s.network_bytes_sent() > limit {
            Color::Red
        } else {
            Color::Green
        }
    });

    let datasets = vec![
        Dataset::default()
            .name("sent")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&sent),
        Dataset::default()
            .name("recv")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&received),
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::DIM))
            .data(&limit_line),
    ];

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let top_label = format_bytes(y_max as u64);

    let chart = Chart::new(datasets)
        .block(Block::bordered().title(Span::styled(
            title_text,
            Style::default()
                .fg(title_color)
                .add_modifier(Modifier::BOLD),
        )))
        .x_axis(Axis::default().bounds(x).style(axis_style()))
        .y_axis(
            Axis::default()
                .bounds([0.0, y_max])
                .labels(["0".to_string(), top_label])
                .style(axis_style()),
        );

    frame.render_widget(chart, area);
}
