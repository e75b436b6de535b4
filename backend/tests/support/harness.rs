//! In-process HTTP harness and shared world for behaviour tests.
//!
//! Requests run through `actix_web::test` against the real handlers, session
//! middleware and in-memory repositories. The app is rebuilt per request over
//! the same state and cookie key, so sessions survive between steps. A
//! current-thread Tokio runtime plus a `LocalSet` drive the futures because
//! Actix uses `spawn_local` internally.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::http::Method;
use actix_web::{App, test as actix_test, web};
use mockable::DefaultClock;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use daily_diet::Trace;
use daily_diet::domain::{MealService, TRACE_ID_HEADER, UserAccountService};
use daily_diet::inbound::http::error::{json_config, path_config};
use daily_diet::inbound::http::meals::{
    create_meal, delete_meal, get_meal, list_meals, meal_metrics, update_meal,
};
use daily_diet::inbound::http::session::{SESSION_COOKIE_NAME, session_middleware};
use daily_diet::inbound::http::session_config::SessionSettings;
use daily_diet::inbound::http::state::HttpState;
use daily_diet::inbound::http::users::register_user;
use daily_diet::outbound::memory::{InMemoryMealRepository, InMemoryUserRepository};

/// Response captured from the most recent request.
#[derive(Debug, Default, Clone)]
pub(crate) struct LastResponse {
    pub(crate) status: u16,
    pub(crate) trace_id: Option<String>,
    pub(crate) body: Value,
    pub(crate) session_cookie: Option<Cookie<'static>>,
}

pub(crate) struct DietWorld {
    runtime: Runtime,
    local: LocalSet,
    state: web::Data<HttpState>,
    session: SessionSettings,
    pub(crate) sessions: HashMap<String, Cookie<'static>>,
    pub(crate) meals: HashMap<String, String>,
    pub(crate) last: Option<LastResponse>,
}

pub(crate) type SharedWorld = Rc<RefCell<DietWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

fn in_memory_state() -> web::Data<HttpState> {
    let accounts = Arc::new(UserAccountService::new(Arc::new(
        InMemoryUserRepository::default(),
    )));
    let meals = Arc::new(MealService::new(
        Arc::new(InMemoryMealRepository::default()),
        Arc::new(DefaultClock),
    ));
    web::Data::new(HttpState::new(
        accounts.clone(),
        accounts,
        meals.clone(),
        meals,
    ))
}

pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    WorldFixture {
        world: Rc::new(RefCell::new(DietWorld {
            runtime,
            local: LocalSet::new(),
            state: in_memory_state(),
            session: SessionSettings {
                key: Key::generate(),
                cookie_secure: false,
                same_site: SameSite::Lax,
            },
            sessions: HashMap::new(),
            meals: HashMap::new(),
            last: None,
        })),
    }
}

/// Request issued on behalf of a named user, or anonymously.
pub(crate) struct RequestSpec<'a> {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) payload: Option<Value>,
    pub(crate) as_user: Option<&'a str>,
}

/// Send `spec` through a freshly built app and record the response.
pub(crate) fn perform(world: &SharedWorld, spec: RequestSpec<'_>) -> LastResponse {
    let RequestSpec {
        method,
        path,
        payload,
        as_user,
    } = spec;

    let response = {
        let ctx = world.borrow();
        let cookie = as_user.map(|user| {
            ctx.sessions
                .get(user)
                .cloned()
                .unwrap_or_else(|| panic!("no session for {user}"))
        });
        let state = ctx.state.clone();
        let session = ctx.session.clone();

        ctx.local.block_on(&ctx.runtime, async move {
            let app = actix_test::init_service(
                App::new()
                    .app_data(state)
                    .app_data(json_config())
                    .app_data(path_config())
                    .wrap(Trace)
                    .wrap(session_middleware(&session, 1))
                    .service(register_user)
                    .service(create_meal)
                    .service(list_meals)
                    .service(meal_metrics)
                    .service(get_meal)
                    .service(update_meal)
                    .service(delete_meal),
            )
            .await;

            let mut request = actix_test::TestRequest::default()
                .method(method)
                .uri(&path);
            if let Some(cookie) = cookie {
                request = request.cookie(cookie);
            }
            if let Some(payload) = payload {
                request = request.set_json(payload);
            }

            let response = actix_test::call_service(&app, request.to_request()).await;
            let status = response.status().as_u16();
            let trace_id = response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let session_cookie = response
                .response()
                .cookies()
                .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
                .map(Cookie::into_owned);
            let bytes = actix_test::read_body(response).await;
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).expect("JSON response body")
            };

            LastResponse {
                status,
                trace_id,
                body,
                session_cookie,
            }
        })
    };

    world.borrow_mut().last = Some(response.clone());
    response
}

/// Return the most recent response, failing the step if none was recorded.
pub(crate) fn last_response(world: &SharedWorld) -> LastResponse {
    world.borrow().last.clone().expect("a request was sent")
}

/// Register `user` with a derived email and keep its session cookie.
pub(crate) fn register(world: &SharedWorld, user: &str) -> LastResponse {
    let response = perform(
        world,
        RequestSpec {
            method: Method::POST,
            path: "/users".to_owned(),
            payload: Some(serde_json::json!({
                "name": user,
                "email": format!("{user}@example.com"),
            })),
            as_user: None,
        },
    );
    if let Some(cookie) = response.session_cookie.clone() {
        world.borrow_mut().sessions.insert(user.to_owned(), cookie);
    }
    response
}

/// Create a meal named `name` for `user` and remember its id.
pub(crate) fn create_named_meal(world: &SharedWorld, user: &str, name: &str, on_diet: bool) {
    let response = perform(
        world,
        RequestSpec {
            method: Method::POST,
            path: "/meals".to_owned(),
            payload: Some(serde_json::json!({
                "name": name,
                "description": "",
                "datetime": "2026-03-01T12:30:00Z",
                "isOnDiet": on_diet,
            })),
            as_user: Some(user),
        },
    );
    assert_eq!(response.status, 201, "create meal {name}");
    let id = response
        .body
        .get("id")
        .and_then(Value::as_str)
        .expect("meal id")
        .to_owned();
    world.borrow_mut().meals.insert(name.to_owned(), id);
}

/// Path of a meal created earlier in the scenario.
pub(crate) fn meal_path(world: &SharedWorld, name: &str) -> String {
    let id = world
        .borrow()
        .meals
        .get(name)
        .cloned()
        .unwrap_or_else(|| panic!("no meal named {name}"));
    format!("/meals/{id}")
}
