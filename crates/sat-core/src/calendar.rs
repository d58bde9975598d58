//! Calendar-indexed accumulation and daily time-series reconstruction.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::accumulator::{Accumulator, HoursAccumulator};
use crate::entry::TimeEntry;
use crate::rule::Rule;

/// Sentinel emitted by [`StampedHoursAccumulator::period_data`] for days
/// without usable data. It lies outside \[0.0, 1.0\] so renderers can tell it
/// apart from a real ratio.
pub const NO_DATA: f64 = -1.0;

/// One [`HoursAccumulator`] per calendar day.
///
/// The map is sparse: a missing day means no entries were logged that day,
/// which is different from a day whose ratio is zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StampedHoursAccumulator {
    days: BTreeMap<NaiveDate, HoursAccumulator>,
}

impl StampedHoursAccumulator {
    /// An accumulator holding a single bucket.
    pub fn single(date: NaiveDate, hours: HoursAccumulator) -> Self {
        let mut days = BTreeMap::new();
        days.insert(date, hours);
        Self { days }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&HoursAccumulator> {
        self.days.get(&date)
    }

    /// Buckets in date order.
    pub fn buckets(&self) -> impl Iterator<Item = (NaiveDate, &HoursAccumulator)> {
        self.days.iter().map(|(date, hours)| (*date, hours))
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// First day with a bucket.
    pub fn period_start(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    /// Last day with a bucket.
    pub fn period_end(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }

    /// All buckets folded into one tally.
    pub fn period_hours_accumulator(&self) -> HoursAccumulator {
        let mut result = HoursAccumulator::neutral();
        for hours in self.days.values() {
            result.update(*hours);
        }
        result
    }

    /// Every calendar day from [`period_start`](Self::period_start) to
    /// [`period_end`](Self::period_end) inclusive, with its satisfaction.
    ///
    /// Days without a bucket, or whose bucket has zero total hours, yield
    /// `None`. Empty when the accumulator is empty.
    pub fn daily(&self) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        let range = self.period_start().zip(self.period_end());
        range
            .into_iter()
            .flat_map(|(start, stop)| start.iter_days().take_while(move |day| *day <= stop))
            .map(|day| {
                let ratio = self
                    .days
                    .get(&day)
                    .and_then(|hours| hours.satisfaction().ok());
                (day, ratio)
            })
    }

    /// Dense daily ratios with [`NO_DATA`] filling the gaps.
    ///
    /// Has `(end - start).num_days() + 1` elements, one per calendar day.
    pub fn period_data(&self) -> Vec<f64> {
        self.daily()
            .map(|(_, ratio)| ratio.unwrap_or(NO_DATA))
            .collect()
    }

    /// Number of calendar days covered by the period, gaps included.
    pub fn period_days(&self) -> usize {
        match (self.period_start(), self.period_end()) {
            (Some(start), Some(stop)) => stop
                .signed_duration_since(start)
                .num_days()
                .try_into()
                .map_or(0, |days: usize| days + 1),
            _ => 0,
        }
    }
}

impl Accumulator for StampedHoursAccumulator {
    fn neutral() -> Self {
        Self::default()
    }

    fn update(&mut self, other: Self) {
        for (date, hours) in other.days {
            self.days
                .entry(date)
                .or_insert_with(HoursAccumulator::neutral)
                .update(hours);
        }
    }

    /// A zero-hour entry lifts to the empty map, so it never widens the period.
    fn from_rule_and_entry(rule: &Rule, entry: &TimeEntry) -> Self {
        if entry.duration() == 0.0 {
            return Self::neutral();
        }
        Self::single(entry.date(), HoursAccumulator::from_rule_and_entry(rule, entry))
    }
}
