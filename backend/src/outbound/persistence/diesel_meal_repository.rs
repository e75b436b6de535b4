//! PostgreSQL-backed `MealRepository` implementation using Diesel ORM.
//!
//! Every statement filters on both `id` and `user_id`, so ownership is
//! enforced by the database query rather than by a read-then-check.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MealRepository, MealRepositoryError};
use crate::domain::{
    Meal, MealDescription, MealDraft, MealId, MealName, UserId, from_epoch_millis,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{MealRow, MealUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::meals;

/// Diesel-backed implementation of the meal repository port.
#[derive(Clone)]
pub struct DieselMealRepository {
    pool: DbPool,
}

impl DieselMealRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MealRepositoryError {
    map_basic_pool_error(error, MealRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> MealRepositoryError {
    map_basic_diesel_error(
        error,
        MealRepositoryError::query,
        MealRepositoryError::connection,
    )
}

fn meal_to_row(meal: &Meal) -> MealRow {
    MealRow {
        id: *meal.id().as_uuid(),
        name: meal.name().as_ref().to_owned(),
        description: meal.description().as_ref().to_owned(),
        is_on_diet: meal.is_on_diet(),
        datetime: meal.occurred_at().timestamp_millis(),
        created_at: meal.created_at(),
        user_id: *meal.owner().as_uuid(),
    }
}

fn draft_to_update(details: &MealDraft) -> MealUpdate<'_> {
    MealUpdate {
        name: details.name().as_ref(),
        description: details.description().as_ref(),
        is_on_diet: details.is_on_diet(),
        datetime: details.occurred_at().timestamp_millis(),
    }
}

/// Convert a database row into a validated domain meal.
fn row_to_meal(row: MealRow) -> Result<Meal, MealRepositoryError> {
    let MealRow {
        id,
        name,
        description,
        is_on_diet,
        datetime,
        created_at,
        user_id,
    } = row;

    let invalid = |err: crate::domain::MealValidationError| {
        MealRepositoryError::query(format!("invalid meal row {id}: {err}"))
    };
    let details = MealDraft::new(
        MealName::new(name),
        MealDescription::new(description),
        from_epoch_millis(datetime).map_err(invalid)?,
        is_on_diet,
    );

    Ok(Meal::new(
        MealId::from_uuid(id),
        UserId::from_uuid(user_id),
        details,
        created_at,
    ))
}

#[async_trait]
impl MealRepository for DieselMealRepository {
    async fn insert(&self, meal: &Meal) -> Result<(), MealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(meals::table)
            .values(&meal_to_row(meal))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_for_owner(
        &self,
        id: &MealId,
        owner: &UserId,
    ) -> Result<Option<Meal>, MealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = meals::table
            .filter(meals::id.eq(id.as_uuid()))
            .filter(meals::user_id.eq(owner.as_uuid()))
            .select(MealRow::as_select())
            .first::<MealRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_meal).transpose()
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Meal>, MealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MealRow> = meals::table
            .filter(meals::user_id.eq(owner.as_uuid()))
            .order((meals::criated_at.asc(), meals::id.asc()))
            .select(MealRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_meal).collect()
    }

    async fn latest_created_at(
        &self,
        owner: &UserId,
    ) -> Result<Option<DateTime<Utc>>, MealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        meals::table
            .filter(meals::user_id.eq(owner.as_uuid()))
            .select(diesel::dsl::max(meals::criated_at))
            .get_result::<Option<DateTime<Utc>>>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn update_for_owner(
        &self,
        id: &MealId,
        owner: &UserId,
        details: &MealDraft,
    ) -> Result<Option<Meal>, MealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(
            meals::table
                .filter(meals::id.eq(id.as_uuid()))
                .filter(meals::user_id.eq(owner.as_uuid())),
        )
        .set(&draft_to_update(details))
        .returning(MealRow::as_returning())
        .get_result::<MealRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_meal).transpose()
    }

    async fn delete_for_owner(
        &self,
        id: &MealId,
        owner: &UserId,
    ) -> Result<bool, MealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            meals::table
                .filter(meals::id.eq(id.as_uuid()))
                .filter(meals::user_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
