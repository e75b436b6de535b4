//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling. Row structs
//! (`models.rs`) and table definitions (`schema.rs`) stay private to this
//! module; repositories translate them into domain values and map every
//! database failure onto the port's error type.
//!
//! # Example
//!
//! ```ignore
//! use daily_diet::outbound::persistence::{DbPool, DieselMealRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/daily_diet")).await?;
//! let meals = DieselMealRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_meal_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_meal_repository::DieselMealRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
