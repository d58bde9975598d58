//! Folding a batch of entries into one aggregate.

use crate::accumulator::Accumulator;
use crate::entry::TimeEntry;
use crate::rule::Rule;
use crate::selector::{FirstMatch, SelectionError, Selector};

/// Drives a [`Selector`] and an [`Accumulator`] over a batch of entries.
#[derive(Debug, Clone, Default)]
pub struct RuleEvaluator<S = FirstMatch> {
    selector: S,
}

impl<S: Selector> RuleEvaluator<S> {
    pub const fn new(selector: S) -> Self {
        Self { selector }
    }

    /// Aggregates `entries` into an `A`, judging each by the rule selected
    /// from `rules`.
    ///
    /// Entries are folded in input order. The first entry without a matching
    /// rule aborts the evaluation and no partial aggregate is returned.
    pub fn satisfaction<A: Accumulator>(
        &self,
        rules: &[Rule],
        entries: &[TimeEntry],
    ) -> Result<A, SelectionError> {
        let mut acc = A::neutral();
        for entry in entries {
            let rule = self.selector.select(rules, entry)?;
            tracing::trace!(
                issue_id = entry.issue_id(),
                category = entry.category(),
                date = %entry.date(),
                weight = rule.weight().value(),
                "rule selected"
            );
            acc.update(A::from_rule_and_entry(rule, entry));
        }
        tracing::debug!(entries = entries.len(), rules = rules.len(), "entries evaluated");
        Ok(acc)
    }
}
