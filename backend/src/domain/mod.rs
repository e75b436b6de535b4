//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! adapters and the services that enforce meal ownership. Types validate on
//! construction and stay immutable afterwards.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `User`, `UserContext`, `SessionToken`: identity and session values.
//! - `Meal`, `MealDraft`, `MealMetrics`: meal records and aggregates.
//! - `UserAccountService`, `MealService`: implementations of the driving
//!   ports in [`ports`].

pub mod error;
pub mod meals;
pub mod meal_service;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::meal_service::MealService;
pub use self::meals::{
    Meal, MealDescription, MealDraft, MealId, MealMetrics, MealName, MealValidationError,
    from_epoch_millis,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EMAIL_MAX, EmailAddress, NewUser, SessionToken, USER_NAME_MAX, User, UserContext, UserId,
    UserName, UserValidationError,
};
pub use self::user_service::UserAccountService;
