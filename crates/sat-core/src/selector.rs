//! Picking the rule that governs an entry.

use chrono::NaiveDate;
use thiserror::Error;

use crate::entry::TimeEntry;
use crate::rule::Rule;

/// No rule in the list applies to an entry.
///
/// Rule lists are expected to end with a catch-all [`Rule::MatchAny`]; this
/// error surfaces lists that are not total instead of guessing a weight.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no rule matched entry for issue #{issue_id} ({category}) on {date}")]
    NoRuleMatched {
        issue_id: String,
        category: String,
        date: NaiveDate,
    },
}

impl SelectionError {
    fn no_rule_matched(entry: &TimeEntry) -> Self {
        Self::NoRuleMatched {
            issue_id: entry.issue_id().to_string(),
            category: entry.category().to_string(),
            date: entry.date(),
        }
    }
}

/// Strategy for choosing one rule out of an ordered list.
pub trait Selector {
    fn select<'r>(&self, rules: &'r [Rule], entry: &TimeEntry) -> Result<&'r Rule, SelectionError>;
}

/// Selects the first rule, in list order, whose predicate matches.
///
/// List order is therefore the tie-break between overlapping rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMatch;

impl Selector for FirstMatch {
    fn select<'r>(&self, rules: &'r [Rule], entry: &TimeEntry) -> Result<&'r Rule, SelectionError> {
        rules
            .iter()
            .find(|rule| rule.matches(entry).is_some())
            .ok_or_else(|| SelectionError::no_rule_matched(entry))
    }
}
