//! User account services: registration and session resolution.
//!
//! Both driving ports share one repository, so a single service type
//! implements them.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    RegisterUserRequest, RegisterUserResponse, SessionResolver, UserPersistenceError,
    UserRegistration, UserRepository,
};
use crate::domain::{Error, SessionToken, User, UserContext};

const USER_EXISTS_MESSAGE: &str = "User already exists";
const UNAUTHORIZED_MESSAGE: &str = "Unauthorized.";

fn email_conflict() -> Error {
    Error::conflict(USER_EXISTS_MESSAGE).with_details(json!({
        "field": "email",
        "code": "duplicate_email",
    }))
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            warn!(%message, "user repository unavailable");
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => email_conflict(),
    }
}

/// Service implementing [`UserRegistration`] and [`SessionResolver`].
#[derive(Clone)]
pub struct UserAccountService<R> {
    user_repo: Arc<R>,
}

impl<R> UserAccountService<R> {
    /// Create a new service over the user repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> UserRegistration for UserAccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<RegisterUserResponse, Error> {
        let RegisterUserRequest { user: new_user } = request;

        let existing = self
            .user_repo
            .find_by_email(&new_user.email)
            .await
            .map_err(map_user_persistence_error)?;
        if existing.is_some() {
            return Err(email_conflict());
        }

        // A token presented by the caller is never reused.
        let session_token = SessionToken::generate();
        let user = User::register(new_user, session_token.clone());

        // The unique index still guards the race between lookup and insert.
        self.user_repo
            .insert(&user)
            .await
            .map_err(map_user_persistence_error)?;

        info!(user_id = %user.id(), "user registered");
        Ok(RegisterUserResponse {
            user_id: user.id().clone(),
            session_token,
        })
    }
}

#[async_trait]
impl<R> SessionResolver for UserAccountService<R>
where
    R: UserRepository,
{
    async fn resolve(&self, token: &SessionToken) -> Result<UserContext, Error> {
        self.user_repo
            .find_by_session_token(token)
            .await
            .map_err(map_user_persistence_error)?
            .map(|user| user.context())
            .ok_or_else(|| Error::unauthorized(UNAUTHORIZED_MESSAGE))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
