//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer; repositories convert them
//! into domain values.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{meals, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub session_id: Option<String>,
}

/// Insertable struct for registering users.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub session_id: Option<&'a str>,
}

/// Row struct for reading and inserting meals.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = meals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MealRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub is_on_diet: bool,
    pub datetime: i64,
    #[diesel(column_name = criated_at)]
    pub created_at: DateTime<Utc>,
    pub user_id: Uuid,
}

/// Changeset replacing the caller-editable meal fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = meals)]
pub(crate) struct MealUpdate<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub is_on_diet: bool,
    pub datetime: i64,
}
