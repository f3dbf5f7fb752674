use crate::domain::entities::sample::MetricSample;

/// Renders the history as an aligned table, oldest row first.
///
/// Network columns show the cumulative counters exactly as sampled.
#[must_use]
pub fn format_history_table(samples: &[MetricSample]) -> String {
    let header = format!(
        "{:<10} {:>7} {:>9} {:>14} {:>14} {:>10}",
        "Time", "CPU %", "Memory %", "Net sent", "Net recv", "Storage %"
    );
    let separator = "─".repeat(header.chars().count());

    let mut rows = Vec::with_capacity(samples.len() + 2);
    rows.push(header);
    rows.push(separator);

    for s in samples {
        rows.push(format!(
            "{:<10} {:>7.1} {:>9.1} {:>14} {:>14} {:>10.1}",
            s.timestamp().format("%H:%M:%S"),
            s.cpu_percent(),
            s.memory_percent(),
            s.network_bytes_sent(),
            s.network_bytes_received(),
            s.storage_percent()
        ));
    }

    rows.join("\n")
}
