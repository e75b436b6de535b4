//! Builders wiring repository adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::{info, warn};

use daily_diet::domain::ports::{MealRepository, UserRepository};
use daily_diet::domain::{MealService, UserAccountService};
use daily_diet::inbound::http::state::HttpState;
use daily_diet::outbound::memory::{InMemoryMealRepository, InMemoryUserRepository};
use daily_diet::outbound::persistence::{DieselMealRepository, DieselUserRepository};

use super::ServerConfig;

/// Build both account and meal services over the given repositories.
///
/// One service instance backs each command/query pair so that both halves see
/// the same storage.
fn build_state_over<U, M>(users: U, meals: M) -> web::Data<HttpState>
where
    U: UserRepository + 'static,
    M: MealRepository + 'static,
{
    let accounts = Arc::new(UserAccountService::new(Arc::new(users)));
    let meals = Arc::new(MealService::new(Arc::new(meals), Arc::new(DefaultClock)));
    web::Data::new(HttpState::new(
        accounts.clone(),
        accounts,
        meals.clone(),
        meals,
    ))
}

/// Build the HTTP state, using Diesel repositories when a pool is configured
/// and in-memory repositories otherwise.
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    match &config.db_pool {
        Some(pool) => {
            info!("serving from PostgreSQL");
            build_state_over(
                DieselUserRepository::new(pool.clone()),
                DieselMealRepository::new(pool.clone()),
            )
        }
        None => {
            warn!("serving from in-memory storage; data is lost on restart");
            build_state_over(
                InMemoryUserRepository::default(),
                InMemoryMealRepository::default(),
            )
        }
    }
}
