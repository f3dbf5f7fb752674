use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::application::config::AppConfig;

/// vmwatch: host resource monitor
///
/// Samples CPU, memory, network and storage usage on a fixed cadence,
/// raises threshold alerts and keeps a bounded history of readings.
#[derive(Parser, Debug)]
#[command(name = "vmwatch")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute (defaults to `watch`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Overrides for the monitor loop, layered on top of the config file.
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopArgs {
    /// Sampling interval in seconds
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Number of samples kept in history
    #[arg(long)]
    pub capacity: Option<usize>,
}

impl LoopArgs {
    /// Write the given overrides into `config`; absent flags leave it untouched.
    pub fn apply(self, config: &mut AppConfig) {
        if let Some(interval) = self.interval {
            config.general.interval_secs = interval;
        }
        if let Some(capacity) = self.capacity {
            config.general.history_capacity = capacity;
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive dashboard
    #[command(alias = "w")]
    Watch {
        #[command(flatten)]
        overrides: LoopArgs,
    },

    /// Monitor without a UI and print a report on exit
    #[command(alias = "r")]
    Run {
        /// Stop after this many loop samples (default: until Ctrl-C)
        #[arg(short, long)]
        ticks: Option<u64>,

        #[command(flatten)]
        overrides: LoopArgs,
    },

    /// Take one sample and show it
    #[command(alias = "s")]
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    #[command(alias = "c")]
    Config,
}
