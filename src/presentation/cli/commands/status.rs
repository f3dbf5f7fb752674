use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;

use crate::application::services::monitor::MonitorSettings;
use crate::application::services::sampling::BoundedSampler;
use crate::domain::entities::alert::Alert;
use crate::domain::entities::sample::MetricSample;
use crate::domain::ports::sampler::Sampler;
use crate::domain::rules::ThresholdPolicy;
use crate::presentation::cli::formatters::status_fmt::{
    colorize_percent, format_bytes, print_section_header, progress_bar,
};

#[derive(Serialize)]
struct StatusOutput {
    sample: MetricSample,
    alerts: Vec<Alert>,
}

/// Take one sample, evaluate it and print it.
///
/// The sample goes through the same timeout and range checks as a monitor tick.
///
/// # Errors
///
/// Returns an error if sampling fails or times out, or JSON serialization fails.
pub async fn run_status(
    sampler: Arc<dyn Sampler>,
    policy: &ThresholdPolicy,
    settings: &MonitorSettings,
    json: bool,
) -> anyhow::Result<()> {
    let sample = BoundedSampler::new(sampler, settings.sampler_timeout, settings.strictness)
        .sample()
        .await
        .context("Failed to read system metrics")?;
    let alerts = policy.evaluate(&sample);

    if json {
        let output = StatusOutput { sample, alerts };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_status(&sample, &alerts, policy);
    Ok(())
}

fn print_status(sample: &MetricSample, alerts: &[Alert], policy: &ThresholdPolicy) {
    let thresholds = policy.thresholds();

    println!("{}", "vmwatch: System Status".bold().cyan());
    println!("{}", "━".repeat(50));
    println!(
        "{}",
        sample.timestamp().format("%Y-%m-%d %H:%M:%S UTC").to_string().dimmed()
    );

    let gauges = [
        ("\nCPU", sample.cpu_percent(), thresholds.cpu_percent),
        ("\nMemory", sample.memory_percent(), thresholds.memory_percent),
        ("\nStorage", sample.storage_percent(), thresholds.storage_percent),
    ];
    for (title, value, threshold) in gauges {
        print_section_header(title);
        println!(
            "  {} {}",
            progress_bar(value, 30, threshold),
            colorize_percent(value, threshold)
        );
    }

    print_section_header("\nNetwork");
    println!(
        "  Sent: {}  Received: {}",
        format_bytes(sample.network_bytes_sent()),
        format_bytes(sample.network_bytes_received())
    );

    println!();
    if alerts.is_empty() {
        println!("{}", "No thresholds exceeded".green().bold());
    } else {
        for alert in alerts {
            println!("{} {}", alert.kind.title().red().bold(), alert.message());
        }
    }
}
