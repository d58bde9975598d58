//! Logged units of work.

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::{ValidationError, non_blank};

/// One logged unit of work.
///
/// Entries are validated once at construction and are immutable afterwards,
/// so every `TimeEntry` in circulation is known to be well-formed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeEntry {
    issue_id: String,
    duration: f64,
    category: String,
    comment: String,
    date: NaiveDate,
}

impl TimeEntry {
    /// Creates a new entry after validation.
    ///
    /// `issue_id` and `category` must be non-blank; `duration` is in hours and
    /// must be finite and non-negative. The comment is free text.
    pub fn new(
        issue_id: impl Into<String>,
        duration: f64,
        category: impl Into<String>,
        comment: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let issue_id = non_blank("issue_id", issue_id.into())?;
        if !duration.is_finite() {
            return Err(ValidationError::NonFiniteDuration { value: duration });
        }
        if duration < 0.0 {
            return Err(ValidationError::NegativeDuration { value: duration });
        }
        let category = non_blank("category", category.into())?;

        Ok(Self {
            issue_id,
            duration,
            category,
            comment: comment.into(),
            date,
        })
    }

    pub fn issue_id(&self) -> &str {
        &self.issue_id
    }

    /// Hours spent.
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub const fn date(&self) -> NaiveDate {
        self.date
    }
}
