use colored::{ColoredString, Colorize};

/// Bar of `width` cells, filled in proportion to `value` (a percentage).
#[must_use]
pub fn progress_bar(value: f64, width: usize, threshold: f64) -> String {
    let ratio = (value / 100.0).clamp(0.0, 1.0);
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let bar_filled = "█".repeat(filled);
    let bar_empty = "░".repeat(empty);

    let colored_bar = if value > threshold {
        bar_filled.red().bold()
    } else if value > threshold * 0.8 {
        bar_filled.yellow()
    } else {
        bar_filled.green()
    };

    format!("{colored_bar}{bar_empty}")
}

/// `value` as `"42.0%"`, red above `threshold`, yellow within 80% of it.
#[must_use]
pub fn colorize_percent(value: f64, threshold: f64) -> ColoredString {
    let text = format!("{value:.1}%");
    if value > threshold {
        text.red().bold()
    } else if value > threshold * 0.8 {
        text.yellow()
    } else {
        text.green()
    }
}

/// Byte count in the largest binary unit that keeps it above 1.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

pub fn print_section_header(title: &str) {
    println!("{}", title.bold().cyan());
    let display_width = title.chars().count();
    println!("{}", "─".repeat(display_width).cyan());
}
