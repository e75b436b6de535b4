//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use daily_diet::Trace;
#[cfg(debug_assertions)]
use daily_diet::doc::ApiDoc;
use daily_diet::inbound::http::error::{json_config, path_config};
use daily_diet::inbound::http::health::{HealthState, live, ready};
use daily_diet::inbound::http::meals::{
    create_meal, delete_meal, get_meal, list_meals, meal_metrics, update_meal,
};
use daily_diet::inbound::http::session::session_middleware;
use daily_diet::inbound::http::session_config::SessionSettings;
use daily_diet::inbound::http::state::HttpState;
use daily_diet::inbound::http::users::register_user;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: SessionSettings,
    session_ttl_hours: u32,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
        session_ttl_hours,
    } = deps;

    // `/meals/metrics` must precede `/meals/{id}`.
    let api = web::scope("")
        .wrap(session_middleware(&session, session_ttl_hours))
        .service(register_user)
        .service(create_meal)
        .service(list_meals)
        .service(meal_metrics)
        .service(get_meal)
        .service(update_meal)
        .service(delete_meal);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(path_config())
        .wrap(Trace)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.service(api)
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        session,
        session_ttl_hours,
        bind_addr,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            session: session.clone(),
            session_ttl_hours,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
