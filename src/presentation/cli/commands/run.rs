use anyhow::Context;
use tokio::sync::watch;

use crate::application::services::monitor::{HistoryReader, MonitorLoop};
use crate::presentation::cli::formatters::status_fmt::print_section_header;
use crate::presentation::cli::formatters::summary_fmt::format_conclusions;
use crate::presentation::cli::formatters::table_fmt::format_history_table;

/// Run the monitor without a UI, then print the history report.
///
/// With `ticks = Some(n)` the loop stops after `n` recorded samples; otherwise
/// it runs until SIGINT (Ctrl+C). `Some(0)` skips the loop entirely, so only
/// the final sample taken by `stop()` is recorded.
///
/// # Errors
///
/// Returns an error if the monitor cannot start, the Ctrl+C handler cannot be
/// installed, or the loop ended on an invariant violation.
pub async fn run_headless(monitor: &MonitorLoop, ticks: Option<u64>) -> anyhow::Result<()> {
    if ticks != Some(0) {
        let generation = monitor.subscribe();
        monitor.start().await.context("Failed to start monitor")?;
        wait_for_stop(generation, ticks).await?;
    }

    let last = monitor.stop().await.context("Monitor loop failed")?;
    if let Some(last) = last {
        tracing::debug!(
            "Final sample {}, {} alert(s)",
            if last.recorded() { "recorded" } else { "skipped" },
            last.alerts_count
        );
    }

    print_report(&monitor.reader());
    Ok(())
}

async fn wait_for_stop(mut generation: watch::Receiver<u64>, ticks: Option<u64>) -> anyhow::Result<()> {
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let Some(ticks) = ticks else {
        shutdown.await.context("Failed to listen for Ctrl+C")?;
        tracing::info!("Interrupt received, stopping");
        return Ok(());
    };

    let target = generation.borrow_and_update().saturating_add(ticks);
    tokio::select! {
        reached = generation.wait_for(|g| *g >= target) => {
            reached.map(|_| ()).context("Monitor dropped its generation counter")?;
            tracing::info!("Recorded {ticks} sample(s), stopping");
        }
        interrupted = &mut shutdown => {
            interrupted.context("Failed to listen for Ctrl+C")?;
            tracing::info!("Interrupt received, stopping");
        }
    }
    Ok(())
}

/// Print the history table followed by its conclusions.
pub fn print_report(reader: &HistoryReader) {
    let samples = reader.snapshot();
    let summary = reader.summarize();

    print_section_header("\nHistory");
    println!("{}", format_history_table(&samples));
    println!();
    println!("{}", format_conclusions(&summary, reader.thresholds()));
}
