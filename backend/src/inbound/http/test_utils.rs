//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use mockable::DefaultClock;

use crate::domain::{MealService, UserAccountService};
use crate::inbound::http::session::session_middleware;
use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryMealRepository, InMemoryUserRepository};

/// Build a session middleware configured for tests.
///
/// Generates a fresh key per invocation and disables the `Secure` flag for
/// plain-HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    session_middleware(
        &SessionSettings {
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        },
        1,
    )
}

/// HTTP state wired to fresh in-memory repositories.
pub fn in_memory_state() -> web::Data<HttpState> {
    let accounts = Arc::new(UserAccountService::new(Arc::new(
        InMemoryUserRepository::default(),
    )));
    let meals = Arc::new(MealService::new(
        Arc::new(InMemoryMealRepository::default()),
        Arc::new(DefaultClock),
    ));
    web::Data::new(HttpState::new(
        accounts.clone(),
        accounts,
        meals.clone(),
        meals,
    ))
}
