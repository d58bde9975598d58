use std::path::Path;

use anyhow::{Context, Result, ensure};
use chrono::Local;
use clap::Parser;
use sat_core::TimeEntry;
use tracing_subscriber::EnvFilter;

use sat_cli::commands::report::{self, Period, ReportOptions};
use sat_cli::{Cli, Config};

/// Reads entries from a local Redmine CSV export.
fn read_entries(path: &Path) -> Result<Vec<TimeEntry>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    sat_redmine::parse_time_entries(&text)
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    ensure!(
        cli.config.is_file(),
        "config file not found: {}",
        cli.config.display()
    );
    let config = Config::load_from(Some(&cli.config)).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    let rules = config.rules().context("invalid rules in configuration")?;

    let entries = match (&cli.input, &cli.passphrase) {
        (Some(path), _) => read_entries(path)?,
        (None, Some(passphrase)) => {
            let period = if cli.week { Period::Week } else { Period::Month };
            let (start, end) = report::period_window(period, Local::now().date_naive());
            report::fetch_entries(&config, passphrase, start, end)?
        }
        (None, None) => anyhow::bail!("a passphrase is required to unmask the API key"),
    };
    tracing::debug!(count = entries.len(), "loaded time entries");

    let options = ReportOptions {
        rows: usize::from(cli.rows),
        json: cli.json,
    };
    report::run(&mut std::io::stdout().lock(), &rules, &entries, options)
}
