//! Process-local adapters backed by mutex-guarded maps.
//!
//! Used when the server runs without PostgreSQL (`DAILY_DIET_IN_MEMORY=1`)
//! and by the HTTP integration tests. Data is lost on restart.

mod meal_repository;
mod user_repository;

pub use meal_repository::InMemoryMealRepository;
pub use user_repository::InMemoryUserRepository;
