//! Rules that judge how "good" a time entry is.
//!
//! A rule pairs a predicate over a [`TimeEntry`] with a [`Weight`]. The set of
//! predicates is closed, so rules are an enum dispatched by `match`.

use serde::{Deserialize, Serialize};

use crate::entry::TimeEntry;
use crate::types::{ValidationError, Weight, non_blank};

/// A predicate + weight pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Matches every entry.
    MatchAny { weight: Weight },
    /// Matches entries logged against one issue.
    MatchIssueId { issue_id: String, weight: Weight },
    /// Matches entries logged under one activity category.
    MatchCategory { category: String, weight: Weight },
}

impl Rule {
    pub fn match_any(weight: f64) -> Result<Self, ValidationError> {
        Ok(Self::MatchAny {
            weight: Weight::new(weight)?,
        })
    }

    pub fn match_issue_id(
        issue_id: impl Into<String>,
        weight: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self::MatchIssueId {
            issue_id: non_blank("issue_id", issue_id.into())?,
            weight: Weight::new(weight)?,
        })
    }

    pub fn match_category(
        category: impl Into<String>,
        weight: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self::MatchCategory {
            category: non_blank("category", category.into())?,
            weight: Weight::new(weight)?,
        })
    }

    /// The weight this rule assigns to the entries it matches.
    pub const fn weight(&self) -> Weight {
        match self {
            Self::MatchAny { weight }
            | Self::MatchIssueId { weight, .. }
            | Self::MatchCategory { weight, .. } => *weight,
        }
    }

    /// Returns the rule's weight if it applies to `entry`, `None` otherwise.
    pub fn matches(&self, entry: &TimeEntry) -> Option<Weight> {
        let hit = match self {
            Self::MatchAny { .. } => true,
            Self::MatchIssueId { issue_id, .. } => entry.issue_id() == issue_id,
            Self::MatchCategory { category, .. } => entry.category() == category,
        };
        hit.then(|| self.weight())
    }
}

/// A rule as written in a configuration file.
///
/// Each record holds exactly one of `{issue_id, weight}`, `{category, weight}`
/// or `{weight}`. Records with extra or missing keys do not deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSpec {
    IssueId(IssueIdSpec),
    Category(CategorySpec),
    Any(AnySpec),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IssueIdSpec {
    pub issue_id: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategorySpec {
    pub category: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnySpec {
    pub weight: f64,
}

impl TryFrom<RuleSpec> for Rule {
    type Error = ValidationError;

    fn try_from(spec: RuleSpec) -> Result<Self, Self::Error> {
        match spec {
            RuleSpec::IssueId(IssueIdSpec { issue_id, weight }) => {
                Self::match_issue_id(issue_id, weight)
            }
            RuleSpec::Category(CategorySpec { category, weight }) => {
                Self::match_category(category, weight)
            }
            RuleSpec::Any(AnySpec { weight }) => Self::match_any(weight),
        }
    }
}

/// Validates configured rule records, preserving their order.
pub fn parse_rules(specs: impl IntoIterator<Item = RuleSpec>) -> Result<Vec<Rule>, ValidationError> {
    specs.into_iter().map(Rule::try_from).collect()
}
