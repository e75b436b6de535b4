//! In-memory `MealRepository`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{MealRepository, MealRepositoryError};
use crate::domain::{Meal, MealDraft, MealId, UserId};

/// Meal store keyed by id. Every lookup also checks the owner.
#[derive(Debug, Default)]
pub struct InMemoryMealRepository {
    meals: Mutex<HashMap<MealId, Meal>>,
}

impl InMemoryMealRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<MealId, Meal>>, MealRepositoryError> {
        self.meals
            .lock()
            .map_err(|_| MealRepositoryError::query("meal store lock poisoned"))
    }
}

#[async_trait]
impl MealRepository for InMemoryMealRepository {
    async fn insert(&self, meal: &Meal) -> Result<(), MealRepositoryError> {
        let mut meals = self.lock()?;
        if meals.contains_key(&meal.id()) {
            return Err(MealRepositoryError::query(format!(
                "meal {} already exists",
                meal.id()
            )));
        }
        meals.insert(meal.id(), meal.clone());
        Ok(())
    }

    async fn find_for_owner(
        &self,
        id: &MealId,
        owner: &UserId,
    ) -> Result<Option<Meal>, MealRepositoryError> {
        Ok(self
            .lock()?
            .get(id)
            .filter(|meal| meal.owner() == owner)
            .cloned())
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Meal>, MealRepositoryError> {
        let mut owned: Vec<Meal> = self
            .lock()?
            .values()
            .filter(|meal| meal.owner() == owner)
            .cloned()
            .collect();
        owned.sort_by_key(|meal| (meal.created_at(), meal.id()));
        Ok(owned)
    }

    async fn latest_created_at(
        &self,
        owner: &UserId,
    ) -> Result<Option<DateTime<Utc>>, MealRepositoryError> {
        Ok(self
            .lock()?
            .values()
            .filter(|meal| meal.owner() == owner)
            .map(Meal::created_at)
            .max())
    }

    async fn update_for_owner(
        &self,
        id: &MealId,
        owner: &UserId,
        details: &MealDraft,
    ) -> Result<Option<Meal>, MealRepositoryError> {
        let mut meals = self.lock()?;
        let Some(slot) = meals.get_mut(id).filter(|meal| meal.owner() == owner) else {
            return Ok(None);
        };
        *slot = slot.clone().with_details(details.clone());
        Ok(Some(slot.clone()))
    }

    async fn delete_for_owner(
        &self,
        id: &MealId,
        owner: &UserId,
    ) -> Result<bool, MealRepositoryError> {
        let mut meals = self.lock()?;
        let owned = meals.get(id).is_some_and(|meal| meal.owner() == owner);
        if owned {
            meals.remove(id);
        }
        Ok(owned)
    }
}
