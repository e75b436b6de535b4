//! Tests for the meal service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockMealRepository;
use crate::domain::{ErrorCode, MealDescription, MealDraft, MealName, UserId};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 8, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

#[fixture]
fn owner() -> UserId {
    UserId::random()
}

fn draft(name: &str, is_on_diet: bool) -> MealDraft {
    MealDraft::new(
        MealName::new(name),
        MealDescription::default(),
        fixture_timestamp(),
        is_on_diet,
    )
}

fn service(repo: MockMealRepository) -> MealService<MockMealRepository> {
    MealService::new(Arc::new(repo), fixture_clock())
}

#[rstest]
#[tokio::test]
async fn create_meal_stamps_owner_and_clock(owner: UserId) {
    let expected_owner = owner.clone();
    let mut repo = MockMealRepository::new();
    repo.expect_latest_created_at()
        .with(eq(owner.clone()))
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_insert()
        .times(1)
        .withf(move |meal| {
            meal.owner() == &expected_owner && meal.created_at() == fixture_timestamp()
        })
        .return_once(|_| Ok(()));

    let response = service(repo)
        .create_meal(CreateMealRequest {
            owner,
            meal: draft("Salad", true),
        })
        .await
        .expect("create succeeds");

    assert_ne!(response.meal_id.as_uuid(), &uuid::Uuid::nil());
}

#[rstest]
#[tokio::test]
async fn create_meal_maps_connection_error_to_service_unavailable(owner: UserId) {
    let mut repo = MockMealRepository::new();
    repo.expect_latest_created_at().return_once(|_| Ok(None));
    repo.expect_insert()
        .return_once(|_| Err(MealRepositoryError::connection("pool unavailable")));

    let error = service(repo)
        .create_meal(CreateMealRequest {
            owner,
            meal: draft("Salad", true),
        })
        .await
        .expect_err("service unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[case::clock_repeats_a_tick(Duration::zero())]
#[case::clock_stepped_backwards(Duration::minutes(5))]
#[tokio::test]
async fn create_meal_stays_after_the_latest_meal(
    owner: UserId,
    #[case] ahead_of_clock: Duration,
) {
    let latest = fixture_timestamp() + ahead_of_clock;
    let expected = latest + Duration::milliseconds(1);
    let mut repo = MockMealRepository::new();
    repo.expect_latest_created_at()
        .return_once(move |_| Ok(Some(latest)));
    repo.expect_insert()
        .times(1)
        .withf(move |meal| meal.created_at() == expected)
        .return_once(|_| Ok(()));

    service(repo)
        .create_meal(CreateMealRequest {
            owner,
            meal: draft("Salad", true),
        })
        .await
        .expect("create succeeds");
}

#[rstest]
#[tokio::test]
async fn create_meal_uses_the_clock_when_it_is_ahead(owner: UserId) {
    let mut repo = MockMealRepository::new();
    repo.expect_latest_created_at()
        .return_once(|_| Ok(Some(fixture_timestamp() - Duration::hours(1))));
    repo.expect_insert()
        .times(1)
        .withf(|meal| meal.created_at() == fixture_timestamp())
        .return_once(|_| Ok(()));

    service(repo)
        .create_meal(CreateMealRequest {
            owner,
            meal: draft("Salad", true),
        })
        .await
        .expect("create succeeds");
}

#[rstest]
#[tokio::test]
async fn get_meal_scopes_lookup_to_owner(owner: UserId) {
    let meal = Meal::record(owner.clone(), draft("Soup", true), fixture_timestamp());
    let meal_id = meal.id();
    let mut repo = MockMealRepository::new();
    repo.expect_find_for_owner()
        .with(eq(meal_id), eq(owner.clone()))
        .times(1)
        .return_once(move |_, _| Ok(Some(meal)));

    let response = service(repo)
        .get_meal(GetMealRequest { owner, meal_id })
        .await
        .expect("owned meal found");

    assert_eq!(response.meal.id(), meal_id);
}

#[rstest]
#[tokio::test]
async fn get_meal_reports_foreign_or_missing_as_not_found(owner: UserId) {
    let mut repo = MockMealRepository::new();
    repo.expect_find_for_owner()
        .times(1)
        .return_once(|_, _| Ok(None));

    let error = service(repo)
        .get_meal(GetMealRequest {
            owner,
            meal_id: MealId::random(),
        })
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_meal_returns_not_found_when_nothing_matched(owner: UserId) {
    let mut repo = MockMealRepository::new();
    repo.expect_update_for_owner()
        .times(1)
        .return_once(|_, _, _| Ok(None));

    let error = service(repo)
        .update_meal(UpdateMealRequest {
            owner,
            meal_id: MealId::random(),
            meal: draft("Cake", false),
        })
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_meal_passes_owner_and_details(owner: UserId) {
    let meal_id = MealId::random();
    let details = draft("Cake", false);
    let updated = Meal::new(meal_id, owner.clone(), details.clone(), fixture_timestamp());
    let mut repo = MockMealRepository::new();
    repo.expect_update_for_owner()
        .with(eq(meal_id), eq(owner.clone()), eq(details.clone()))
        .times(1)
        .return_once(move |_, _, _| Ok(Some(updated)));

    service(repo)
        .update_meal(UpdateMealRequest {
            owner,
            meal_id,
            meal: details,
        })
        .await
        .expect("update succeeds");
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_meal_enforces_ownership(
    owner: UserId,
    #[case] removed: bool,
    #[case] expected_error: Option<ErrorCode>,
) {
    let meal_id = MealId::random();
    let mut repo = MockMealRepository::new();
    repo.expect_delete_for_owner()
        .with(eq(meal_id), eq(owner.clone()))
        .times(1)
        .return_once(move |_, _| Ok(removed));

    let result = service(repo)
        .delete_meal(DeleteMealRequest { owner, meal_id })
        .await;

    assert_eq!(result.err().map(|error| error.code()), expected_error);
}

#[rstest]
#[tokio::test]
async fn list_meals_returns_repository_order(owner: UserId) {
    let meals = vec![
        Meal::record(owner.clone(), draft("Breakfast", true), fixture_timestamp()),
        Meal::record(owner.clone(), draft("Lunch", false), fixture_timestamp()),
    ];
    let expected: Vec<MealId> = meals.iter().map(Meal::id).collect();
    let mut repo = MockMealRepository::new();
    repo.expect_list_for_owner()
        .times(1)
        .return_once(move |_| Ok(meals));

    let response = service(repo)
        .list_meals(OwnerMealsRequest { owner })
        .await
        .expect("list succeeds");

    let listed: Vec<MealId> = response.meals.iter().map(Meal::id).collect();
    assert_eq!(listed, expected);
}

#[rstest]
#[tokio::test]
async fn metrics_use_a_single_history_read(owner: UserId) {
    let meals: Vec<Meal> = [true, true, false, true]
        .into_iter()
        .map(|flag| Meal::record(owner.clone(), draft("Meal", flag), fixture_timestamp()))
        .collect();
    let mut repo = MockMealRepository::new();
    repo.expect_list_for_owner()
        .times(1)
        .return_once(move |_| Ok(meals));

    let response = service(repo)
        .meal_metrics(OwnerMealsRequest { owner })
        .await
        .expect("metrics succeed");

    let metrics = response.metrics;
    assert_eq!(metrics.total_meals(), 4);
    assert_eq!(metrics.total_on_diet(), 3);
    assert_eq!(metrics.total_off_diet(), 1);
    assert_eq!(metrics.best_sequence(), 2);
}

#[rstest]
#[tokio::test]
async fn metrics_are_zero_for_empty_history(owner: UserId) {
    let mut repo = MockMealRepository::new();
    repo.expect_list_for_owner().return_once(|_| Ok(Vec::new()));

    let response = service(repo)
        .meal_metrics(OwnerMealsRequest { owner })
        .await
        .expect("metrics succeed");

    assert_eq!(response.metrics, MealMetrics::default());
}

#[rstest]
#[tokio::test]
async fn query_errors_map_to_internal(owner: UserId) {
    let mut repo = MockMealRepository::new();
    repo.expect_list_for_owner()
        .return_once(|_| Err(MealRepositoryError::query("broken sql")));

    let error = service(repo)
        .list_meals(OwnerMealsRequest { owner })
        .await
        .expect_err("internal");

    assert_eq!(error.code(), ErrorCode::InternalError);
}
