//! Driving port for registering users.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, SessionToken, UserId};

/// Request to register a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    pub user: NewUser,
}

/// Outcome of a successful registration.
///
/// The session token must be handed back to the caller (for HTTP, in the
/// session cookie); it is the only way to identify the user afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserResponse {
    pub user_id: UserId,
    pub session_token: SessionToken,
}

/// Driving port for user registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Register a user under a fresh id and session token.
    ///
    /// Fails with [`crate::domain::ErrorCode::Conflict`] when the email is
    /// already registered.
    async fn register(&self, request: RegisterUserRequest) -> Result<RegisterUserResponse, Error>;
}
