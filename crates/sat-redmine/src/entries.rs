//! Parsing Redmine's `time_entries.csv` export.

use std::sync::LazyLock;

use chrono::NaiveDate;
use csv::StringRecord;
use regex::Regex;
use sat_core::TimeEntry;

use crate::RedmineError;

/// Issue cells look like `Task #71869: Do this`.
static ISSUE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\d+):").unwrap());

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Positions of the columns an entry is built from.
#[derive(Debug, Clone, Copy)]
struct Columns {
    issue: usize,
    hours: usize,
    activity: usize,
    comment: usize,
    date: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, RedmineError> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == column)
                .ok_or(RedmineError::MissingColumn { column })
        };
        Ok(Self {
            issue: find("Issue")?,
            hours: find("Hours")?,
            activity: find("Activity")?,
            comment: find("Comment")?,
            date: find("Date")?,
        })
    }

    fn entry(self, record: &StringRecord, line: u64) -> Result<TimeEntry, RedmineError> {
        let cell = |idx: usize| record.get(idx).unwrap_or_default();
        let invalid = |reason: String| RedmineError::InvalidRow { line, reason };

        let issue = cell(self.issue);
        let issue_id = ISSUE_RE
            .captures(issue)
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| invalid(format!("no issue number in {issue:?}")))?;

        let hours = cell(self.hours);
        let duration: f64 = hours
            .trim()
            .parse()
            .map_err(|_| invalid(format!("invalid hours {hours:?}")))?;

        let date = cell(self.date);
        let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
            .map_err(|_| invalid(format!("invalid date {date:?}")))?;

        TimeEntry::new(
            issue_id,
            duration,
            cell(self.activity),
            cell(self.comment),
            date,
        )
        .map_err(|source| RedmineError::InvalidEntry { line, source })
    }
}

/// Parses a Redmine time-entry CSV export.
///
/// The `Issue`, `Hours`, `Activity`, `Comment` and `Date` columns are
/// required, in any order; other columns are ignored.
pub fn parse_time_entries(text: &str) -> Result<Vec<TimeEntry>, RedmineError> {
    let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());
    let columns = Columns::locate(reader.headers()?)?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);
        entries.push(columns.entry(&record, line)?);
    }
    tracing::debug!(count = entries.len(), "parsed time entries");
    Ok(entries)
}
