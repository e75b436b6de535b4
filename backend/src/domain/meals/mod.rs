//! Meal records and the metrics derived from a user's meal history.
//!
//! A meal belongs to exactly one user for its whole life. Updates replace the
//! descriptive fields only; identity, owner, and creation time are fixed at
//! insert.

mod meal;
mod metrics;

pub use meal::{Meal, MealDescription, MealDraft, MealId, MealName, from_epoch_millis};
pub use metrics::MealMetrics;

/// Validation errors raised by meal constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MealValidationError {
    #[error("meal id must be a valid UUID")]
    InvalidId,
    #[error("meal timestamp {millis} is outside the supported range")]
    TimestampOutOfRange { millis: i64 },
}
