//! Meal HTTP handlers.
//!
//! ```text
//! POST   /meals
//! GET    /meals
//! GET    /meals/metrics
//! GET    /meals/{id}
//! PUT    /meals/{id}
//! DELETE /meals/{id}
//! ```
//!
//! Every handler takes the caller's [`UserContext`], so an unauthenticated
//! request is rejected before any meal storage is touched. `/meals/metrics`
//! must be registered ahead of `/meals/{id}`.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::{
    CreateMealRequest, DeleteMealRequest, GetMealRequest, OwnerMealsRequest, UpdateMealRequest,
};
use crate::domain::{
    Error, Meal, MealDescription, MealDraft, MealMetrics, MealName, UserContext,
    from_epoch_millis,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    DATETIME, invalid_timestamp_error, meal_validation_error, parse_meal_id,
};

/// When the meal was eaten: an RFC 3339 string or epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum MealTimestamp {
    /// Milliseconds since the Unix epoch.
    #[schema(example = 1_767_258_000_000_i64)]
    EpochMillis(i64),
    /// RFC 3339 timestamp.
    #[schema(example = "2026-01-01T09:00:00Z")]
    Rfc3339(String),
}

impl MealTimestamp {
    fn into_datetime(self) -> Result<DateTime<Utc>, Error> {
        match self {
            Self::EpochMillis(millis) => from_epoch_millis(millis).map_err(meal_validation_error),
            Self::Rfc3339(raw) => DateTime::parse_from_rfc3339(&raw)
                .map(|timestamp| timestamp.with_timezone(&Utc))
                .map_err(|_| invalid_timestamp_error(DATETIME, &raw)),
        }
    }
}

/// Request body for creating or replacing a meal.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealRequestBody {
    #[schema(example = "Porridge")]
    pub name: String,
    #[schema(example = "Oats with banana")]
    pub description: String,
    pub datetime: MealTimestamp,
    pub is_on_diet: bool,
}

impl TryFrom<MealRequestBody> for MealDraft {
    type Error = Error;

    fn try_from(body: MealRequestBody) -> Result<Self, Self::Error> {
        let occurred_at = body.datetime.into_datetime()?;
        Ok(MealDraft::new(
            MealName::new(body.name),
            MealDescription::new(body.description),
            occurred_at,
            body.is_on_diet,
        ))
    }
}

/// Meal as returned to its owner.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub is_on_diet: bool,
    #[schema(format = "date-time")]
    pub datetime: String,
    #[schema(format = "date-time")]
    pub created_at: String,
}

fn rfc3339(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<&Meal> for MealResponseBody {
    fn from(meal: &Meal) -> Self {
        Self {
            id: meal.id().to_string(),
            user_id: meal.owner().to_string(),
            name: meal.name().to_string(),
            description: meal.description().as_ref().to_owned(),
            is_on_diet: meal.is_on_diet(),
            datetime: rfc3339(meal.occurred_at()),
            created_at: rfc3339(meal.created_at()),
        }
    }
}

/// Response for `POST /meals`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreatedMealBody {
    #[schema(format = "uuid")]
    pub id: String,
}

/// Response for `GET /meals`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MealListBody {
    pub meals: Vec<MealResponseBody>,
}

/// Response for `GET /meals/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MealEnvelopeBody {
    pub meal: MealResponseBody,
}

/// Response for `GET /meals/metrics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealMetricsBody {
    pub total_meals: u64,
    pub total_on_diet: u64,
    pub total_off_diet: u64,
    /// Longest run of consecutive on-diet meals, in creation order.
    pub best_sequence: u64,
}

impl From<MealMetrics> for MealMetricsBody {
    fn from(metrics: MealMetrics) -> Self {
        Self {
            total_meals: metrics.total_meals(),
            total_on_diet: metrics.total_on_diet(),
            total_off_diet: metrics.total_off_diet(),
            best_sequence: metrics.best_sequence(),
        }
    }
}

/// Record a meal for the authenticated user.
#[utoipa::path(
    post,
    path = "/meals",
    request_body = MealRequestBody,
    responses(
        (status = 201, description = "Meal recorded", body = CreatedMealBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "createMeal",
    security(("SessionCookie" = []))
)]
#[post("/meals")]
pub async fn create_meal(
    state: web::Data<HttpState>,
    user: UserContext,
    payload: web::Json<MealRequestBody>,
) -> ApiResult<HttpResponse> {
    let meal = MealDraft::try_from(payload.into_inner())?;
    let created = state
        .meals
        .create_meal(CreateMealRequest {
            owner: user.user_id().clone(),
            meal,
        })
        .await?;

    Ok(HttpResponse::Created().json(CreatedMealBody {
        id: created.meal_id.to_string(),
    }))
}

/// List the authenticated user's meals in creation order.
#[utoipa::path(
    get,
    path = "/meals",
    responses(
        (status = 200, description = "Owned meals", body = MealListBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "listMeals",
    security(("SessionCookie" = []))
)]
#[get("/meals")]
pub async fn list_meals(
    state: web::Data<HttpState>,
    user: UserContext,
) -> ApiResult<web::Json<MealListBody>> {
    let listed = state
        .meals_query
        .list_meals(OwnerMealsRequest {
            owner: user.user_id().clone(),
        })
        .await?;

    Ok(web::Json(MealListBody {
        meals: listed.meals.iter().map(MealResponseBody::from).collect(),
    }))
}

/// Summarise the authenticated user's meal history.
#[utoipa::path(
    get,
    path = "/meals/metrics",
    responses(
        (status = 200, description = "Meal metrics", body = MealMetricsBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "mealMetrics",
    security(("SessionCookie" = []))
)]
#[get("/meals/metrics")]
pub async fn meal_metrics(
    state: web::Data<HttpState>,
    user: UserContext,
) -> ApiResult<web::Json<MealMetricsBody>> {
    let response = state
        .meals_query
        .meal_metrics(OwnerMealsRequest {
            owner: user.user_id().clone(),
        })
        .await?;

    Ok(web::Json(MealMetricsBody::from(response.metrics)))
}

/// Fetch one of the authenticated user's meals.
#[utoipa::path(
    get,
    path = "/meals/{id}",
    params(("id" = String, Path, format = "uuid", description = "Meal identifier")),
    responses(
        (status = 200, description = "Meal", body = MealEnvelopeBody),
        (status = 400, description = "Invalid meal id", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Meal not found", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "getMeal",
    security(("SessionCookie" = []))
)]
#[get("/meals/{id}")]
pub async fn get_meal(
    state: web::Data<HttpState>,
    user: UserContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MealEnvelopeBody>> {
    let meal_id = parse_meal_id(&path)?;
    let found = state
        .meals_query
        .get_meal(GetMealRequest {
            owner: user.user_id().clone(),
            meal_id,
        })
        .await?;

    Ok(web::Json(MealEnvelopeBody {
        meal: MealResponseBody::from(&found.meal),
    }))
}

/// Replace the editable fields of one of the authenticated user's meals.
#[utoipa::path(
    put,
    path = "/meals/{id}",
    params(("id" = String, Path, format = "uuid", description = "Meal identifier")),
    request_body = MealRequestBody,
    responses(
        (status = 204, description = "Meal updated"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Meal not found", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "updateMeal",
    security(("SessionCookie" = []))
)]
#[put("/meals/{id}")]
pub async fn update_meal(
    state: web::Data<HttpState>,
    user: UserContext,
    path: web::Path<String>,
    payload: web::Json<MealRequestBody>,
) -> ApiResult<HttpResponse> {
    let meal_id = parse_meal_id(&path)?;
    let meal = MealDraft::try_from(payload.into_inner())?;
    state
        .meals
        .update_meal(UpdateMealRequest {
            owner: user.user_id().clone(),
            meal_id,
            meal,
        })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Delete one of the authenticated user's meals.
///
/// A meal owned by someone else is reported as missing and left untouched.
#[utoipa::path(
    delete,
    path = "/meals/{id}",
    params(("id" = String, Path, format = "uuid", description = "Meal identifier")),
    responses(
        (status = 204, description = "Meal deleted"),
        (status = 400, description = "Invalid meal id", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Meal not found", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "deleteMeal",
    security(("SessionCookie" = []))
)]
#[delete("/meals/{id}")]
pub async fn delete_meal(
    state: web::Data<HttpState>,
    user: UserContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let meal_id = parse_meal_id(&path)?;
    state
        .meals
        .delete_meal(DeleteMealRequest {
            owner: user.user_id().clone(),
            meal_id,
        })
        .await?;
    debug!(%meal_id, "meal removed by owner");

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "meals_tests.rs"]
mod tests;
