//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Faint grid lines and travelling light streaks as a terminal background.
#[derive(Debug, Default, Parser)]
#[command(name = "gridstreak", version, about)]
pub struct Cli {
    /// Read configuration from this file instead of the default location.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seed for projectile randomness; a fixed seed replays the same scene.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Target frames per second.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Append log output to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    pub print_config: bool,
}
