//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{MealCommand, MealQuery, SessionResolver, UserRegistration};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn UserRegistration>,
    pub sessions: Arc<dyn SessionResolver>,
    pub meals: Arc<dyn MealCommand>,
    pub meals_query: Arc<dyn MealQuery>,
}

impl HttpState {
    /// Bundle the driving ports used by the handlers.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use daily_diet::domain::{MealService, UserAccountService};
    /// use daily_diet::inbound::http::state::HttpState;
    /// use daily_diet::outbound::memory::{InMemoryMealRepository, InMemoryUserRepository};
    /// use mockable::DefaultClock;
    ///
    /// let accounts = Arc::new(UserAccountService::new(Arc::new(
    ///     InMemoryUserRepository::default(),
    /// )));
    /// let meals = Arc::new(MealService::new(
    ///     Arc::new(InMemoryMealRepository::default()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(accounts.clone(), accounts, meals.clone(), meals);
    /// let _resolver = state.sessions.clone();
    /// ```
    pub fn new(
        registration: Arc<dyn UserRegistration>,
        sessions: Arc<dyn SessionResolver>,
        meals: Arc<dyn MealCommand>,
        meals_query: Arc<dyn MealQuery>,
    ) -> Self {
        Self {
            registration,
            sessions,
            meals,
            meals_query,
        }
    }
}
