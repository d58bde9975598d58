//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors raised while constructing entries and rules.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty or whitespace-only.
    #[error("{field} must be non-blank")]
    Blank { field: &'static str },

    /// A duration was below zero.
    #[error("duration must be >= 0, got {value}")]
    NegativeDuration { value: f64 },

    /// A duration was NaN or infinite.
    #[error("duration must be a finite number, got {value}")]
    NonFiniteDuration { value: f64 },

    /// The weight value was out of range.
    #[error("weight must be between 0.0 and 1.0, got {value}")]
    WeightOutOfRange { value: f64 },
}

/// Rejects empty and whitespace-only text.
pub(crate) fn non_blank(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(value)
}

/// How "good" an hour of matched work is, in the range \[0.0, 1.0\].
///
/// Unlike lenient external scores, a weight is never clamped: out-of-range
/// values are rejected both at construction and during deserialization.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Weight(f64);

impl Weight {
    /// The maximum weight (1.0).
    pub const MAX: Self = Self(1.0);

    /// The minimum weight (0.0).
    pub const MIN: Self = Self(0.0);

    /// Creates a new weight after validation.
    ///
    /// Returns an error if the value is outside \[0.0, 1.0\] or is NaN.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if value.is_nan() || !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::WeightOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Returns the inner f64 value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for Weight {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Weight> for f64 {
    fn from(w: Weight) -> Self {
        w.0
    }
}

impl Serialize for Weight {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Weight {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
