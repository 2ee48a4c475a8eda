//! Validation failures surfaced to callers.
//!
//! These are never retried or silently corrected.

use thiserror::Error;

/// Input rejected before it reaches scoring, ranking or comparison.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The four match weights did not sum to 1.0 within tolerance.
    #[error("weights must sum to 1.0 (±{tolerance}), got {sum}")]
    WeightsDoNotSumToOne {
        /// Actual sum of the supplied weights.
        sum: f64,
        /// Accepted deviation from 1.0.
        tolerance: f64,
    },
    /// A single weight was outside `[0.0, 1.0]` or not finite.
    #[error("{name} weight must be between 0.0 and 1.0, got {value}")]
    WeightOutOfRange {
        /// Weight name.
        name: &'static str,
        /// Value supplied.
        value: f64,
    },
    /// Minimum safety score above 100.
    #[error("minimum safety score must be at most 100, got {0}")]
    MinSafetyOutOfRange(u8),
    /// A budget was negative or not finite.
    #[error("{name} must be a finite non-negative amount, got {value}")]
    InvalidBudget {
        /// Budget name.
        name: &'static str,
        /// Value supplied.
        value: f64,
    },
    /// Comparison needs at least two distinct areas.
    #[error("at least 2 distinct areas are required for comparison, got {supplied}")]
    TooFewAreas {
        /// Number of distinct identities supplied.
        supplied: usize,
    },
    /// A result limit was zero, negative or not a number.
    #[error("limit must be a positive integer, got '{0}'")]
    InvalidLimit(String),
}
