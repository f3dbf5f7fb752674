use anyhow::Context;
use tokio::sync::mpsc;

use crate::application::services::monitor::MonitorLoop;
use crate::domain::ports::sink::SinkEvent;
use crate::presentation::cli::commands::run::print_report;
use crate::presentation::tui::app::{run_tui, App};

/// Run the monitor behind the interactive dashboard.
///
/// The dashboard runs on a blocking thread; the monitor keeps its own cadence
/// on the runtime. Quitting the dashboard stops the monitor and prints the
/// history report.
///
/// # Errors
///
/// Returns an error if the monitor cannot start, the terminal cannot be set
/// up, or the loop ended on an invariant violation.
pub async fn run_watch(
    monitor: &MonitorLoop,
    events: mpsc::Receiver<SinkEvent>,
) -> anyhow::Result<()> {
    let app = App::new(monitor.reader(), events, monitor.subscribe());
    monitor.start().await.context("Failed to start monitor")?;

    let ui = tokio::task::spawn_blocking(move || run_tui(app)).await;
    // Stop before surfacing UI errors so the loop never outlives the dashboard
    let stopped = monitor.stop().await;

    ui.context("Dashboard thread panicked")??;
    stopped.context("Monitor loop failed")?;

    print_report(&monitor.reader());
    Ok(())
}
