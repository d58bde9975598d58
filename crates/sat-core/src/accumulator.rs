//! Aggregates with a neutral element and an associative merge.
//!
//! The [`Accumulator`] trait is the extension point of rule evaluation: the
//! evaluator only ever calls [`Accumulator::neutral`],
//! [`Accumulator::from_rule_and_entry`] and [`Accumulator::update`], so a new
//! aggregation strategy is added by implementing the trait.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::entry::TimeEntry;
use crate::rule::Rule;

/// A monoid over values lifted from matched (rule, entry) pairs.
///
/// Implementations must keep `update` associative and commutative, and
/// `update(neutral())` must leave the receiver unchanged.
pub trait Accumulator: Sized {
    /// Fresh identity value.
    fn neutral() -> Self;

    /// Merges `other` into `self`.
    fn update(&mut self, other: Self);

    /// Lifts one entry and the rule that governs it.
    fn from_rule_and_entry(rule: &Rule, entry: &TimeEntry) -> Self;
}

/// A satisfaction ratio was requested over zero hours.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("not enough data: no hours logged")]
pub struct InsufficientData;

/// Weighted ("good") hours against total hours.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct HoursAccumulator {
    good: f64,
    total: f64,
}

impl HoursAccumulator {
    /// Both tallies must be non-negative hours.
    pub fn new(good: f64, total: f64) -> Self {
        debug_assert!(
            good >= 0.0 && total >= 0.0,
            "hours must be non-negative, got good={good} total={total}"
        );
        Self { good, total }
    }

    pub const fn good(&self) -> f64 {
        self.good
    }

    pub const fn total(&self) -> f64 {
        self.total
    }

    /// Ratio of good hours to total hours.
    pub fn satisfaction(&self) -> Result<f64, InsufficientData> {
        if self.total == 0.0 {
            return Err(InsufficientData);
        }
        Ok(self.good / self.total)
    }
}

impl Accumulator for HoursAccumulator {
    fn neutral() -> Self {
        Self::new(0.0, 0.0)
    }

    fn update(&mut self, other: Self) {
        self.good += other.good;
        self.total += other.total;
    }

    fn from_rule_and_entry(rule: &Rule, entry: &TimeEntry) -> Self {
        Self::new(rule.weight().value() * entry.duration(), entry.duration())
    }
}

/// Hours tallied separately for each activity category.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CategoryHoursAccumulator {
    categories: BTreeMap<String, HoursAccumulator>,
}

impl CategoryHoursAccumulator {
    pub fn get(&self, category: &str) -> Option<&HoursAccumulator> {
        self.categories.get(category)
    }

    /// Categories in lexical order with their tallies.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HoursAccumulator)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Accumulator for CategoryHoursAccumulator {
    fn neutral() -> Self {
        Self::default()
    }

    fn update(&mut self, other: Self) {
        for (category, hours) in other.categories {
            self.categories
                .entry(category)
                .or_insert_with(HoursAccumulator::neutral)
                .update(hours);
        }
    }

    fn from_rule_and_entry(rule: &Rule, entry: &TimeEntry) -> Self {
        let mut categories = BTreeMap::new();
        categories.insert(
            entry.category().to_string(),
            HoursAccumulator::from_rule_and_entry(rule, entry),
        );
        Self { categories }
    }
}
