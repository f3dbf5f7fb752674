use colored::Colorize;

use crate::domain::entities::summary::Summary;
use crate::domain::value_objects::thresholds::ThresholdSet;

const MEMORY_PREVENTION: &str = "Stop or optimize memory-intensive processes.";

/// Conclusions drawn from a history summary.
#[must_use]
pub fn format_conclusions(summary: &Summary, thresholds: &ThresholdSet) -> String {
    let mut lines = vec![format!("{}", "Conclusions".bold().cyan())];

    let Some(max_memory) = summary.max_memory_percent else {
        lines.push("No samples recorded.".dimmed().to_string());
        return lines.join("\n");
    };

    if summary.high_memory_detected {
        lines.push(format!("{}", "High Memory Utilization Detected".red().bold()));
        lines.push(format!(
            "  Maximum memory usage: {max_memory:.1}% (threshold {:.1}%)",
            thresholds.memory_percent
        ));
        lines.push(format!(
            "  Suggested Prevention Measure: {}",
            MEMORY_PREVENTION.yellow()
        ));
    } else {
        lines.push(format!(
            "{} (maximum {max_memory:.1}%)",
            "Memory utilization within limits".green()
        ));
    }

    if let Some(cpu) = summary.max_cpu_percent {
        lines.push(format!("  Peak CPU usage: {cpu:.1}%"));
    }
    if let Some(storage) = summary.max_storage_percent {
        lines.push(format!("  Peak storage usage: {storage:.1}%"));
    }
    lines.push(format!("  Samples analysed: {}", summary.sample_count));

    lines.join("\n")
}
