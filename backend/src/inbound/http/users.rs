//! Users API handlers.
//!
//! ```text
//! POST /users {"name":"Ada","email":"ada@example.com"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::RegisterUserRequest;
use crate::domain::{EmailAddress, NewUser, UserName, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::user_validation_error;

/// Registration body for `POST /users`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserBody {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl TryFrom<RegisterUserBody> for NewUser {
    type Error = UserValidationError;

    fn try_from(value: RegisterUserBody) -> Result<Self, Self::Error> {
        Ok(Self {
            name: UserName::new(value.name)?,
            email: EmailAddress::new(value.email)?,
        })
    }
}

/// Response body for a successful registration.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisteredUser {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
}

/// Register a user and start their session.
///
/// The response carries a fresh `sessionId` cookie; any session the caller
/// already had is replaced.
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterUserBody,
    responses(
        (status = 201, description = "User registered", body = RegisteredUser,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterUserBody>,
) -> ApiResult<HttpResponse> {
    let user = NewUser::try_from(payload.into_inner()).map_err(user_validation_error)?;
    let registered = state
        .registration
        .register(RegisterUserRequest { user })
        .await?;
    session.persist_token(&registered.session_token)?;
    debug!(user_id = %registered.user_id, "session started for new user");

    Ok(HttpResponse::Created().json(RegisteredUser {
        id: registered.user_id.to_string(),
    }))
}
