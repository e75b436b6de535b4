//! Meal domain service implementing the meal command and query ports.
//!
//! Every operation is scoped to the requesting owner. A meal that exists but
//! belongs to another user yields the same `NotFound` as a missing one.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    CreateMealRequest, CreateMealResponse, DeleteMealRequest, GetMealRequest, GetMealResponse,
    ListMealsResponse, MealCommand, MealMetricsResponse, MealQuery, MealRepository,
    MealRepositoryError, OwnerMealsRequest, UpdateMealRequest,
};
use crate::domain::{Error, Meal, MealId, MealMetrics, UserId};

fn map_repository_error(error: MealRepositoryError) -> Error {
    match error {
        MealRepositoryError::Connection { message } => {
            warn!(%message, "meal repository unavailable");
            Error::service_unavailable(format!("meal repository unavailable: {message}"))
        }
        MealRepositoryError::Query { message } => {
            Error::internal(format!("meal repository error: {message}"))
        }
    }
}

fn meal_not_found(meal_id: &MealId) -> Error {
    Error::not_found(format!("meal {meal_id} not found"))
}

/// Meal service implementing [`MealCommand`] and [`MealQuery`].
#[derive(Clone)]
pub struct MealService<R> {
    meal_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> MealService<R> {
    /// Create a meal service.
    ///
    /// `clock` stamps `created_at` on new meals, which fixes their position in
    /// streak ordering.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use daily_diet::domain::MealService;
    /// use daily_diet::outbound::memory::InMemoryMealRepository;
    ///
    /// let service = MealService::new(
    ///     Arc::new(InMemoryMealRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(meal_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { meal_repo, clock }
    }
}

impl<R> MealService<R>
where
    R: MealRepository,
{
    /// Creation time for the owner's next meal.
    ///
    /// Stays strictly after the owner's latest meal even if the clock steps
    /// backwards or repeats a tick.
    async fn next_created_at(&self, owner: &UserId) -> Result<DateTime<Utc>, Error> {
        let now = self.clock.utc();
        let latest = self
            .meal_repo
            .latest_created_at(owner)
            .await
            .map_err(map_repository_error)?;
        Ok(match latest {
            Some(latest) if latest >= now => latest + Duration::milliseconds(1),
            _ => now,
        })
    }

    async fn owned_history(&self, request: &OwnerMealsRequest) -> Result<Vec<Meal>, Error> {
        self.meal_repo
            .list_for_owner(&request.owner)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> MealCommand for MealService<R>
where
    R: MealRepository,
{
    async fn create_meal(&self, request: CreateMealRequest) -> Result<CreateMealResponse, Error> {
        let CreateMealRequest { owner, meal } = request;
        let created_at = self.next_created_at(&owner).await?;
        let meal = Meal::record(owner, meal, created_at);

        self.meal_repo
            .insert(&meal)
            .await
            .map_err(map_repository_error)?;

        info!(meal_id = %meal.id(), user_id = %meal.owner(), "meal recorded");
        Ok(CreateMealResponse { meal_id: meal.id() })
    }

    async fn update_meal(&self, request: UpdateMealRequest) -> Result<(), Error> {
        let UpdateMealRequest {
            owner,
            meal_id,
            meal,
        } = request;

        self.meal_repo
            .update_for_owner(&meal_id, &owner, &meal)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| meal_not_found(&meal_id))?;

        info!(%meal_id, user_id = %owner, "meal updated");
        Ok(())
    }

    async fn delete_meal(&self, request: DeleteMealRequest) -> Result<(), Error> {
        let DeleteMealRequest { owner, meal_id } = request;

        let deleted = self
            .meal_repo
            .delete_for_owner(&meal_id, &owner)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(meal_not_found(&meal_id));
        }

        info!(%meal_id, user_id = %owner, "meal deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> MealQuery for MealService<R>
where
    R: MealRepository,
{
    async fn get_meal(&self, request: GetMealRequest) -> Result<GetMealResponse, Error> {
        let GetMealRequest { owner, meal_id } = request;
        let meal = self
            .meal_repo
            .find_for_owner(&meal_id, &owner)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| meal_not_found(&meal_id))?;

        Ok(GetMealResponse { meal })
    }

    async fn list_meals(&self, request: OwnerMealsRequest) -> Result<ListMealsResponse, Error> {
        let meals = self.owned_history(&request).await?;
        Ok(ListMealsResponse { meals })
    }

    async fn meal_metrics(&self, request: OwnerMealsRequest) -> Result<MealMetricsResponse, Error> {
        let history = self.owned_history(&request).await?;
        Ok(MealMetricsResponse {
            metrics: MealMetrics::from_history(&history),
        })
    }
}

#[cfg(test)]
#[path = "meal_service_tests.rs"]
mod tests;
