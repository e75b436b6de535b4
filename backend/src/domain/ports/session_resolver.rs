//! Driving port that turns a session token into the caller's identity.

use async_trait::async_trait;

use crate::domain::{Error, SessionToken, UserContext};

/// Resolve opaque session tokens to users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// Look up the user bound to `token`.
    ///
    /// Unknown tokens fail with [`crate::domain::ErrorCode::Unauthorized`].
    async fn resolve(&self, token: &SessionToken) -> Result<UserContext, Error>;
}
