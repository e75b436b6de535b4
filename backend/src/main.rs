//! Backend entry-point: loads settings, prepares storage, and runs the server.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use daily_diet::config::{AppSettings, StorageSettings};
use daily_diet::inbound::http::health::HealthState;
use daily_diet::inbound::http::session_config::{BuildMode, session_settings_from_env};
use daily_diet::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let session_ttl_hours = settings
        .session_ttl_hours()
        .map_err(std::io::Error::other)?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(session, session_ttl_hours, settings.bind_addr());
    match settings.storage().map_err(std::io::Error::other)? {
        StorageSettings::Postgres { database_url } => {
            let max_size = settings.pool_max_size().map_err(std::io::Error::other)?;
            config = config.with_db_pool(connect(&database_url, max_size).await?);
        }
        StorageSettings::InMemory => {}
    }

    let bind_addr = config.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "daily diet API listening");
    server.await
}

/// Apply pending migrations, then open the connection pool.
async fn connect(database_url: &str, max_size: u32) -> std::io::Result<DbPool> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_migrations(&url))
        .await
        .map_err(std::io::Error::other)?
        .map_err(std::io::Error::other)?;
    info!(applied, "database migrations up to date");

    DbPool::new(PoolConfig::new(database_url).with_max_size(max_size))
        .await
        .map_err(std::io::Error::other)
}
