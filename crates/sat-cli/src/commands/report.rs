//! Satisfaction report over a recent period.
//!
//! Evaluates time entries against the configured rules, then prints a daily
//! sparkline and the global ratio (human-readable) or the same data as JSON.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use sat_core::sparkline::format_rows;
use sat_core::{FirstMatch, Rule, RuleEvaluator, StampedHoursAccumulator, TimeEntry};
use sat_redmine::{Client, Query};
use serde::Serialize;

use crate::Config;
use crate::credentials::unmask_api_key;

const DATE_FORMAT: &str = "%Y-%m-%d";
const NOT_ENOUGH_DATA: &str = "Not enough data";

/// Report period type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
}

impl Period {
    pub const fn days(self) -> u64 {
        match self {
            Self::Week => 7,
            Self::Month => 31,
        }
    }
}

/// Output options for [`run`].
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Sparkline height in text rows.
    pub rows: usize,
    pub json: bool,
}

/// Computed report data.
#[derive(Debug)]
pub struct ReportData {
    pub calendar: StampedHoursAccumulator,
    /// Global ratio, `None` when no hours were logged.
    pub satisfaction: Option<f64>,
}

// ========== Period Calculation ==========

/// Days covered by `period`, ending today inclusive.
pub fn period_window(period: Period, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today.checked_sub_days(Days::new(period.days())).unwrap_or(NaiveDate::MIN);
    (start, today)
}

// ========== Entry Retrieval ==========

/// Downloads the configured user's time entries for `start..=end`.
pub fn fetch_entries(
    config: &Config,
    passphrase: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<TimeEntry>> {
    let host = config
        .host
        .as_deref()
        .context("missing Redmine host (set SAT_HOST or `host` in the config)")?;
    let masked = config
        .api_key
        .as_deref()
        .context("missing API key (set SAT_API_KEY or `api_key` in the config)")?;
    let api_key = unmask_api_key(masked, passphrase)?;

    let client = Client::new(host, api_key).context("failed to create Redmine client")?;
    let query = Query::new(config.user.clone(), start, end);
    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    runtime
        .block_on(client.fetch_entries(&query))
        .context("failed to fetch time entries")
}

// ========== Evaluation ==========

pub fn generate_report_data(rules: &[Rule], entries: &[TimeEntry]) -> Result<ReportData> {
    if !matches!(rules.last(), Some(Rule::MatchAny { .. })) {
        tracing::warn!("rules do not end with a catch-all; unmatched entries will fail the report");
    }

    let calendar: StampedHoursAccumulator = RuleEvaluator::new(FirstMatch)
        .satisfaction(rules, entries)
        .context("failed to evaluate time entries")?;
    let satisfaction = calendar.period_hours_accumulator().satisfaction().ok();
    tracing::debug!(days = calendar.period_days(), ?satisfaction, "report computed");

    Ok(ReportData {
        calendar,
        satisfaction,
    })
}

// ========== Output Formatting ==========

/// Formats the report for terminal display.
///
/// Without any logged hours there are no period bounds to label, so the
/// sparkline line is left out and only `Not enough data` is printed.
pub fn format_report(data: &ReportData, rows: usize) -> String {
    let mut output = String::new();

    if let (Some(start), Some(end)) = (data.calendar.period_start(), data.calendar.period_end()) {
        output.push_str(&format_rows(
            &start.format(DATE_FORMAT).to_string(),
            data.calendar.period_data(),
            &end.format(DATE_FORMAT).to_string(),
            rows,
        ));
        output.push('\n');
    }

    match data.satisfaction {
        Some(ratio) => {
            let percent = ratio * 100.0;
            output.push_str(&format!("Global satisfaction over this period: {percent:.1}%\n"));
        }
        None => {
            output.push_str(NOT_ENOUGH_DATA);
            output.push('\n');
        }
    }

    output
}

/// JSON output structure.
#[derive(Debug, Serialize)]
struct JsonReport {
    period_start: Option<NaiveDate>,
    period_end: Option<NaiveDate>,
    days: Vec<JsonDay>,
    satisfaction: Option<f64>,
}

#[derive(Debug, Serialize)]
struct JsonDay {
    date: NaiveDate,
    satisfaction: Option<f64>,
}

/// Formats the report as pretty-printed JSON.
pub fn format_report_json(data: &ReportData) -> Result<String> {
    let report = JsonReport {
        period_start: data.calendar.period_start(),
        period_end: data.calendar.period_end(),
        days: data
            .calendar
            .daily()
            .map(|(date, satisfaction)| JsonDay { date, satisfaction })
            .collect(),
        satisfaction: data.satisfaction,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Command Entry Point ==========

pub fn run<W: Write>(
    writer: &mut W,
    rules: &[Rule],
    entries: &[TimeEntry],
    options: ReportOptions,
) -> Result<()> {
    let data = generate_report_data(rules, entries)?;

    if options.json {
        writeln!(writer, "{}", format_report_json(&data)?)?;
    } else {
        write!(writer, "{}", format_report(&data, options.rows))?;
    }

    Ok(())
}
