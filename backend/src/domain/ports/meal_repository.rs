//! Port for meal persistence scoped by owner.
//!
//! Every read and write takes the owning user so adapters filter by owner in
//! the same statement; a meal belonging to someone else is indistinguishable
//! from a missing one.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Meal, MealDraft, MealId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by meal repository adapters.
    pub enum MealRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "meal repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "meal repository query failed: {message}",
    }
}

/// Port for reading and writing meals.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealRepository: Send + Sync {
    /// Persist a new meal.
    async fn insert(&self, meal: &Meal) -> Result<(), MealRepositoryError>;

    /// Find one meal owned by `owner`.
    async fn find_for_owner(
        &self,
        id: &MealId,
        owner: &UserId,
    ) -> Result<Option<Meal>, MealRepositoryError>;

    /// List all meals owned by `owner`, ordered by creation time and then id.
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Meal>, MealRepositoryError>;

    /// Latest `created_at` among meals owned by `owner`, if any.
    async fn latest_created_at(
        &self,
        owner: &UserId,
    ) -> Result<Option<DateTime<Utc>>, MealRepositoryError>;

    /// Replace the descriptive fields of a meal owned by `owner`.
    ///
    /// Returns the updated meal, or `None` when no owned meal matched.
    async fn update_for_owner(
        &self,
        id: &MealId,
        owner: &UserId,
        details: &MealDraft,
    ) -> Result<Option<Meal>, MealRepositoryError>;

    /// Delete a meal owned by `owner`. Returns whether a row was removed.
    async fn delete_for_owner(
        &self,
        id: &MealId,
        owner: &UserId,
    ) -> Result<bool, MealRepositoryError>;
}
