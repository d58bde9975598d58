//! Redmine integration for satisfaction reports.
//!
//! Provides:
//! - Fetching a user's time entries as Redmine's CSV export
//! - Parsing that export into validated [`TimeEntry`] values

mod entries;

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use sat_core::{TimeEntry, ValidationError};
use thiserror::Error;

pub use entries::parse_time_entries;

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const EXPORT_PATH: &str = "time_entries.csv";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Columns requested from the export.
const EXPORT_COLUMNS: [&str; 7] = [
    "project", "spent_on", "user", "activity", "issue", "comments", "hours",
];

/// Redmine client errors.
#[derive(Debug, Error)]
pub enum RedmineError {
    /// The provided API key was invalid.
    #[error("invalid API key: {reason}")]
    InvalidApiKey { reason: &'static str },
    /// The Redmine host was not configured.
    #[error("missing Redmine host URL")]
    MissingHost,
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Redmine returned an error response.
    #[error("Redmine returned status {status}: {body}")]
    Api { status: u16, body: String },
    /// The export was not well-formed CSV.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    /// A required column is absent from the header row.
    #[error("'{column}' column is missing")]
    MissingColumn { column: &'static str },
    /// A row could not be interpreted.
    #[error("line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },
    /// A row describes an invalid time entry.
    #[error("line {line}: {source}")]
    InvalidEntry {
        line: u64,
        #[source]
        source: ValidationError,
    },
}

/// Which entries to export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Redmine user filter; `me` is the owner of the API key.
    pub user: String,
    /// First day, inclusive.
    pub start: NaiveDate,
    /// Last day, inclusive.
    pub end: NaiveDate,
}

impl Query {
    pub fn new(user: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            user: user.into(),
            start,
            end,
        }
    }

    /// Query-string pairs selecting the columns and filters, without the key.
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params: Vec<(&'static str, String)> = EXPORT_COLUMNS
            .iter()
            .map(|column| ("c[]", (*column).to_string()))
            .collect();
        params.extend([
            ("f[]", "user_id".to_string()),
            ("f[]", "spent_on".to_string()),
            ("f[]", String::new()),
            ("op[spent_on]", "><".to_string()),
            ("op[user_id]", "=".to_string()),
            ("v[spent_on][]", self.start.format(DATE_FORMAT).to_string()),
            ("v[spent_on][]", self.end.format(DATE_FORMAT).to_string()),
            ("v[user_id][]", self.user.clone()),
        ]);
        params
    }
}

/// Redmine API client.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client for the Redmine instance at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL or API key is empty or whitespace-only, or
    /// if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, RedmineError> {
        let base_url = base_url.into();
        let api_key = api_key.into();

        if base_url.trim().is_empty() {
            return Err(RedmineError::MissingHost);
        }
        if api_key.is_empty() {
            return Err(RedmineError::InvalidApiKey {
                reason: "API key cannot be empty",
            });
        }
        if api_key.trim().is_empty() {
            return Err(RedmineError::InvalidApiKey {
                reason: "API key cannot be whitespace-only",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(RedmineError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn export_url(&self) -> String {
        format!("{}/{EXPORT_PATH}", self.base_url)
    }

    /// Downloads the CSV export for `query`.
    pub async fn time_entries_csv(&self, query: &Query) -> Result<String, RedmineError> {
        let url = self.export_url();
        tracing::debug!(%url, start = %query.start, end = %query.end, "requesting time entries");

        let response = self
            .http
            .get(&url)
            .query(&query.params())
            .query(&[("key", &self.api_key)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RedmineError::Api {
                status: status.as_u16(),
                body,
            });
        }
        tracing::debug!(bytes = body.len(), "received time entries");
        Ok(body)
    }

    /// Downloads and parses the time entries for `query`.
    pub async fn fetch_entries(&self, query: &Query) -> Result<Vec<TimeEntry>, RedmineError> {
        let body = self.time_entries_csv(query).await?;
        parse_time_entries(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> Query {
        Query::new(
            "me",
            NaiveDate::from_ymd_opt(2017, 5, 30).unwrap(),
            NaiveDate::from_ymd_opt(2017, 6, 30).unwrap(),
        )
    }

    #[test]
    fn test_client_rejects_empty_key() {
        let err = Client::new("http://redmine.example.com", "").unwrap_err();
        assert_eq!(err.to_string(), "invalid API key: API key cannot be empty");
    }

    #[test]
    fn test_client_rejects_whitespace_key() {
        assert!(matches!(
            Client::new("http://redmine.example.com", "   "),
            Err(RedmineError::InvalidApiKey { .. })
        ));
    }

    #[test]
    fn test_client_rejects_missing_host() {
        assert!(matches!(Client::new(" ", "abc"), Err(RedmineError::MissingHost)));
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = Client::new("http://redmine.example.com", "secret-key").unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_export_url_strips_trailing_slash() {
        let client = Client::new("http://redmine.example.com/", "abc").unwrap();
        assert_eq!(client.export_url(), "http://redmine.example.com/time_entries.csv");
    }

    fn values<'a>(params: &'a [(&'static str, String)], key: &str) -> Vec<&'a str> {
        params
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn test_query_params() {
        let params = query().params();
        let values = |key| values(&params, key);

        assert_eq!(
            values("c[]"),
            ["project", "spent_on", "user", "activity", "issue", "comments", "hours"]
        );
        assert_eq!(values("f[]"), ["user_id", "spent_on", ""]);
        assert_eq!(values("op[spent_on]"), ["><"]);
        assert_eq!(values("op[user_id]"), ["="]);
        assert_eq!(values("v[spent_on][]"), ["2017-05-30", "2017-06-30"]);
        assert_eq!(values("v[user_id][]"), ["me"]);
        assert!(values("key").is_empty());
    }
}
