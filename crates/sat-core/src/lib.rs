//! Core domain logic for time-entry satisfaction.
//!
//! This crate contains the fundamental types and logic for:
//! - Rules: weighting time entries by issue, category, or as a catch-all
//! - Evaluation: folding entries into pluggable accumulators
//! - Calendar reconstruction: dense per-day ratios from sparse buckets
//! - Sparklines: rendering ratio series as block glyphs

mod accumulator;
mod calendar;
mod entry;
mod evaluator;
pub mod rule;
mod selector;
pub mod sparkline;
mod types;

pub use accumulator::{Accumulator, CategoryHoursAccumulator, HoursAccumulator, InsufficientData};
pub use calendar::{NO_DATA, StampedHoursAccumulator};
pub use entry::TimeEntry;
pub use evaluator::RuleEvaluator;
pub use rule::{Rule, RuleSpec, parse_rules};
pub use selector::{FirstMatch, SelectionError, Selector};
pub use types::{ValidationError, Weight};
