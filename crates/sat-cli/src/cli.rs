//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Time-entry satisfaction report.
///
/// Weights logged hours with configurable rules and shows how much of the
/// recent period went to satisfying work, day by day.
#[derive(Debug, Parser)]
#[command(name = "sat", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Report on the last week instead of the last month.
    #[arg(short, long)]
    pub week: bool,

    /// Height of the sparkline in text rows.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=8))]
    pub rows: u8,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Read time entries from a Redmine CSV export instead of the server.
    #[arg(short, long, value_name = "CSV")]
    pub input: Option<PathBuf>,

    /// Path to config file (TOML, or JSON with a `.json` extension).
    pub config: PathBuf,

    /// Passphrase unmasking the API key stored in the config.
    #[arg(required_unless_present = "input")]
    pub passphrase: Option<String>,
}
