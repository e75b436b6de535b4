//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the domain error schemas and the
//! session cookie security scheme. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use crate::inbound::http::meals::{
    CreatedMealBody, MealEnvelopeBody, MealListBody, MealMetricsBody, MealRequestBody,
    MealResponseBody, MealTimestamp,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::session::SESSION_COOKIE_NAME;
use crate::inbound::http::users::{RegisterUserBody, RegisteredUser};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by POST /users.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Daily diet API",
        description = "Register once, then record meals and track on-diet streaks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register_user,
        crate::inbound::http::meals::create_meal,
        crate::inbound::http::meals::list_meals,
        crate::inbound::http::meals::meal_metrics,
        crate::inbound::http::meals::get_meal,
        crate::inbound::http::meals::update_meal,
        crate::inbound::http::meals::delete_meal,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RegisterUserBody,
        RegisteredUser,
        MealTimestamp,
        MealRequestBody,
        MealResponseBody,
        CreatedMealBody,
        MealListBody,
        MealEnvelopeBody,
        MealMetricsBody,
    )),
    tags(
        (name = "users", description = "Registration and session issuance"),
        (name = "meals", description = "Meals owned by the session user"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
