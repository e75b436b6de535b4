//! Driving port for meal mutations.
//!
//! Requests carry the resolved owner so the service can scope every write.

use async_trait::async_trait;

use crate::domain::{Error, MealDraft, MealId, UserId};

/// Request to record a meal for `owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMealRequest {
    pub owner: UserId,
    pub meal: MealDraft,
}

/// Response from recording a meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateMealResponse {
    pub meal_id: MealId,
}

/// Request to replace the fields of one of `owner`'s meals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMealRequest {
    pub owner: UserId,
    pub meal_id: MealId,
    pub meal: MealDraft,
}

/// Request to delete one of `owner`'s meals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteMealRequest {
    pub owner: UserId,
    pub meal_id: MealId,
}

/// Driving port for meal write operations.
///
/// Meals owned by another user are reported as
/// [`crate::domain::ErrorCode::NotFound`], exactly like missing ones.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealCommand: Send + Sync {
    /// Record a meal and return its fresh id.
    async fn create_meal(&self, request: CreateMealRequest) -> Result<CreateMealResponse, Error>;

    /// Replace name, description, timestamp, and diet flag.
    async fn update_meal(&self, request: UpdateMealRequest) -> Result<(), Error>;

    /// Delete a meal.
    async fn delete_meal(&self, request: DeleteMealRequest) -> Result<(), Error>;
}
