//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The session cookie only carries the opaque [`SessionToken`]. Protected
//! handlers take a [`UserContext`] argument; its extractor reads the token
//! and resolves it through the [`SessionResolver`](crate::domain::ports::SessionResolver)
//! port once per request.

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, SessionToken, UserContext};
use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::HttpState;

/// Name of the cookie carrying the session.
pub const SESSION_COOKIE_NAME: &str = "sessionId";
pub(crate) const SESSION_TOKEN_KEY: &str = "token";
const UNAUTHORIZED_MESSAGE: &str = "Unauthorized.";

/// Build the cookie session middleware.
///
/// Cookie contents are encrypted (`Private`) and the cookie persists for
/// `ttl_hours`; the token inside never expires on its own.
pub fn session_middleware(
    settings: &SessionSettings,
    ttl_hours: u32,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), settings.key.clone())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(settings.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(settings.same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(CookieDuration::hours(i64::from(ttl_hours))),
        )
        .build()
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store `token` in the session cookie, replacing any previous one.
    pub fn persist_token(&self, token: &SessionToken) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(SESSION_TOKEN_KEY, token.as_str())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the session token, if the cookie carries a usable one.
    pub fn token(&self) -> Result<Option<SessionToken>, Error> {
        let raw = self
            .0
            .get::<String>(SESSION_TOKEN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match raw.map(SessionToken::new).transpose() {
            Ok(token) => Ok(token),
            Err(error) => {
                warn!("unusable session token in cookie: {error}");
                Ok(None)
            }
        }
    }

    /// Require a session token or return `401 Unauthorized`.
    pub fn require_token(&self) -> Result<SessionToken, Error> {
        self.token()?
            .ok_or_else(|| Error::unauthorized(UNAUTHORIZED_MESSAGE))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

/// Resolves the caller's identity from the session cookie.
///
/// A missing token fails with `401` before the resolver is consulted.
impl FromRequest for UserContext {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let token = session.await.map_err(Error::from)?.require_token()?;
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            state.sessions.resolve(&token).await
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test};
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{
        MockMealCommand, MockMealQuery, MockSessionResolver, MockUserRegistration,
    };
    use crate::domain::{UserId, UserName};
    use crate::inbound::http::test_utils::test_session_middleware;

    const TOKEN: &str = "1c3c7a4e-0f4b-4bb4-9d4e-2a7b9f0c1d2e";

    fn state_with_resolver(resolver: MockSessionResolver) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(MockUserRegistration::new()),
            Arc::new(resolver),
            Arc::new(MockMealCommand::new()),
            Arc::new(MockMealQuery::new()),
        ))
    }

    fn known_user() -> UserContext {
        UserContext::new(
            UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("fixture id"),
            UserName::new("Ada").expect("fixture name"),
        )
    }

    async fn set_token(session: SessionContext) -> Result<HttpResponse, Error> {
        session.persist_token(&SessionToken::new(TOKEN).expect("fixture token"))?;
        Ok(HttpResponse::Ok().finish())
    }

    async fn whoami(user: UserContext) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id().to_string())
    }

    macro_rules! session_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state)
                    .wrap(test_session_middleware())
                    .route("/set", web::get().to(set_token))
                    .route("/whoami", web::get().to(whoami)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn resolves_user_from_cookie_token() {
        let mut resolver = MockSessionResolver::new();
        resolver
            .expect_resolve()
            .withf(|token| token.as_str() == TOKEN)
            .times(1)
            .return_once(|_| Ok(known_user()));
        let app = session_app!(state_with_resolver(resolver));

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
            .expect("session cookie set")
            .into_owned();

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[actix_web::test]
    async fn missing_cookie_is_rejected_without_lookup() {
        let mut resolver = MockSessionResolver::new();
        resolver.expect_resolve().never();
        let app = session_app!(state_with_resolver(resolver));

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Unauthorized.");
    }

    #[actix_web::test]
    async fn unknown_token_is_rejected() {
        let mut resolver = MockSessionResolver::new();
        resolver
            .expect_resolve()
            .times(1)
            .return_once(|_| Err(Error::unauthorized("Unauthorized.")));
        let app = session_app!(state_with_resolver(resolver));

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
            .expect("session cookie set")
            .into_owned();

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn forged_cookie_is_ignored() {
        let mut resolver = MockSessionResolver::new();
        resolver.expect_resolve().never();
        let app = session_app!(state_with_resolver(resolver));

        let forged = actix_web::cookie::Cookie::new(SESSION_COOKIE_NAME, "token=plaintext");
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(forged)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
