//! Driving port for meal reads and metrics.

use async_trait::async_trait;

use crate::domain::{Error, Meal, MealId, MealMetrics, UserId};

/// Request to fetch one of `owner`'s meals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetMealRequest {
    pub owner: UserId,
    pub meal_id: MealId,
}

/// Response for a single meal lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetMealResponse {
    pub meal: Meal,
}

/// Request scoped to every meal of `owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerMealsRequest {
    pub owner: UserId,
}

/// Response listing meals in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMealsResponse {
    pub meals: Vec<Meal>,
}

/// Response carrying aggregate metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealMetricsResponse {
    pub metrics: MealMetrics,
}

/// Driving port for meal read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealQuery: Send + Sync {
    /// Fetch one meal; someone else's meal is `NotFound`.
    async fn get_meal(&self, request: GetMealRequest) -> Result<GetMealResponse, Error>;

    /// List the owner's meals ordered by creation time.
    async fn list_meals(&self, request: OwnerMealsRequest) -> Result<ListMealsResponse, Error>;

    /// Compute totals and the best on-diet streak from one history read.
    async fn meal_metrics(&self, request: OwnerMealsRequest) -> Result<MealMetricsResponse, Error>;
}
