use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use vmwatch::application::config::AppConfig;
use vmwatch::application::services::monitor::MonitorLoop;
use vmwatch::domain::ports::sampler::Sampler;
use vmwatch::domain::ports::sink::AlertSink;
use vmwatch::domain::rules::ThresholdPolicy;
use vmwatch::infrastructure::collectors::sysinfo_sampler::SysinfoSampler;
use vmwatch::infrastructure::notifications::channel::ChannelSink;
use vmwatch::infrastructure::notifications::composite::CompositeSink;
use vmwatch::infrastructure::notifications::terminal::TerminalSink;
use vmwatch::infrastructure::notifications::tracing_sink::TracingSink;
use vmwatch::presentation::cli::app::{Cli, Commands, LoopArgs};
use vmwatch::presentation::cli::commands::config::run_config;
use vmwatch::presentation::cli::commands::run::run_headless;
use vmwatch::presentation::cli::commands::status::run_status;
use vmwatch::presentation::cli::commands::watch::run_watch;

fn print_banner() {
    println!("{}", "━".repeat(40).cyan());
    println!("{}", "  vmwatch: host resource monitor".bold().cyan());
    println!("{}", "━".repeat(40).cyan());
}

/// Logs go to stderr. `RUST_LOG` wins over the defaults; the dashboard is
/// quiet by default so log lines do not tear the screen.
fn setup_tracing(verbose: bool, dashboard: bool) {
    let default = match (verbose, dashboard) {
        (true, _) => "debug",
        (false, true) => "off",
        (false, false) => "info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_monitor(
    config: &AppConfig,
    sampler: Arc<dyn Sampler>,
    sink: Arc<dyn AlertSink>,
) -> anyhow::Result<MonitorLoop> {
    let (thresholds, settings) = config.monitor_parts().context("Invalid configuration")?;
    MonitorLoop::new(sampler, thresholds, sink, &settings).context("Invalid configuration")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let dashboard = matches!(cli.command, None | Some(Commands::Watch { .. }));

    setup_tracing(cli.verbose, dashboard);

    let config_path = match cli.config {
        Some(ref path) => path.clone(),
        None => AppConfig::config_path()?,
    };
    let mut config = if cli.config.is_some() {
        AppConfig::load_from(&config_path)?
    } else {
        AppConfig::load_or_create(&config_path)?
    };

    let overrides = match cli.command {
        Some(Commands::Watch { overrides } | Commands::Run { overrides, .. }) => overrides,
        _ => LoopArgs::default(),
    };
    overrides.apply(&mut config);

    // Manual DI: main.rs is the only place that knows concrete types
    let sampler: Arc<dyn Sampler> =
        Arc::new(SysinfoSampler::new(config.general.storage_mount.as_str()));

    match cli.command {
        Some(Commands::Status { json }) => {
            let (thresholds, settings) =
                config.monitor_parts().context("Invalid configuration")?;
            let policy = ThresholdPolicy::new(thresholds).context("Invalid configuration")?;
            run_status(sampler, &policy, &settings, json).await?;
        }
        Some(Commands::Run { ticks, .. }) => {
            let mut sinks: Vec<Arc<dyn AlertSink>> = vec![Arc::new(TracingSink)];
            if config.notifications.terminal {
                sinks.push(Arc::new(TerminalSink::new()));
            }
            let monitor = build_monitor(&config, sampler, Arc::new(CompositeSink::new(sinks)))?;
            print_banner();
            run_headless(&monitor, ticks).await?;
        }
        Some(Commands::Config) => {
            run_config(&config, &config_path)?;
        }
        Some(Commands::Watch { .. }) | None => {
            let (channel, events) = ChannelSink::bounded(config.notifications.event_buffer);
            let sinks: Vec<Arc<dyn AlertSink>> = vec![Arc::new(channel), Arc::new(TracingSink)];
            let monitor = build_monitor(&config, sampler, Arc::new(CompositeSink::new(sinks)))?;
            run_watch(&monitor, events).await?;
        }
    }

    Ok(())
}
