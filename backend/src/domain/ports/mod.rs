//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters. Driving
//! ports (`UserRegistration`, `SessionResolver`, `MealCommand`, `MealQuery`)
//! are implemented by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod meal_command;
mod meal_query;
mod meal_repository;
mod session_resolver;
mod user_registration;
mod user_repository;

#[cfg(test)]
pub use meal_command::MockMealCommand;
pub use meal_command::{
    CreateMealRequest, CreateMealResponse, DeleteMealRequest, MealCommand, UpdateMealRequest,
};
#[cfg(test)]
pub use meal_query::MockMealQuery;
pub use meal_query::{
    GetMealRequest, GetMealResponse, ListMealsResponse, MealMetricsResponse, MealQuery,
    OwnerMealsRequest,
};
#[cfg(test)]
pub use meal_repository::MockMealRepository;
pub use meal_repository::{MealRepository, MealRepositoryError};
#[cfg(test)]
pub use session_resolver::MockSessionResolver;
pub use session_resolver::SessionResolver;
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::{RegisterUserRequest, RegisterUserResponse, UserRegistration};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
