use colored::Colorize;

use crate::domain::entities::alert::{Alert, AlertKind};
use crate::domain::ports::sink::{AlertSink, NotificationError, SinkEvent};

/// Prints each event as one colored line on stdout.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl TerminalSink {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl AlertSink for TerminalSink {
    fn deliver(&self, event: &SinkEvent) -> Result<(), NotificationError> {
        println!("{}", format_event(event));
        Ok(())
    }
}

/// One-line rendering of an event: alerts in yellow/red, sampler failures dimmed.
#[must_use]
pub fn format_event(event: &SinkEvent) -> String {
    match event {
        SinkEvent::Alert(alert) => {
            let time = alert.timestamp.format("%H:%M:%S");
            format!(
                "{} {} {}",
                format!("[{time}]").dimmed(),
                kind_badge(alert),
                alert.message()
            )
        }
        SinkEvent::SamplerFailure { timestamp, error } => {
            let time = timestamp.format("%H:%M:%S");
            format!(
                "{} {} {}",
                format!("[{time}]").dimmed(),
                "Sampling skipped".magenta().bold(),
                error.to_string().dimmed()
            )
        }
    }
}

fn kind_badge(alert: &Alert) -> String {
    let title = alert.kind.title();
    match alert.kind {
        AlertKind::Cpu | AlertKind::Memory => title.red().bold().to_string(),
        AlertKind::Storage | AlertKind::NetworkSent => title.yellow().bold().to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::ports::sampler::SamplerError;
    use chrono::{TimeZone, Utc};

    fn disable_colors() {
        colored::control::set_override(false);
    }

    fn make_alert(kind: AlertKind, measured_value: f64) -> Alert {
        Alert {
            kind,
            measured_value,
            threshold: 90.0,
            timestamp: Utc
                .with_ymd_and_hms(2024, 5, 1, 12, 30, 5)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[test]
    fn formats_alert_line() {
        disable_colors();
        let line = format_event(&SinkEvent::Alert(make_alert(AlertKind::Cpu, 97.0)));
        assert_eq!(line, "[12:30:05] High CPU Usage Alert CPU usage is 97.0%.");
    }

    #[test]
    fn formats_sampler_failure_line() {
        disable_colors();
        let line = format_event(&SinkEvent::SamplerFailure {
            timestamp: make_alert(AlertKind::Cpu, 0.0).timestamp,
            error: SamplerError::Unavailable("disk".into()),
        });
        assert_eq!(
            line,
            "[12:30:05] Sampling skipped failed to read system metrics: disk"
        );
    }

    #[test]
    fn deliver_succeeds_for_every_kind() {
        disable_colors();
        let sink = TerminalSink::new();
        for kind in [
            AlertKind::Cpu,
            AlertKind::Memory,
            AlertKind::Storage,
            AlertKind::NetworkSent,
        ] {
            assert!(sink
                .deliver(&SinkEvent::Alert(make_alert(kind, 99.0)))
                .is_ok());
        }
    }
}
