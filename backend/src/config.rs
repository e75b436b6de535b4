//! Application settings loaded via OrthoConfig.
//!
//! Values come from `DAILY_DIET_*` environment variables (and the matching
//! CLI flags); anything unset falls back to the defaults below.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 3333;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_SESSION_TTL_HOURS: u32 = 168;

/// Runtime settings for the HTTP server and its storage.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DAILY_DIET")]
pub struct AppSettings {
    /// Interface address to bind.
    pub host: Option<IpAddr>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// PostgreSQL connection string. Required unless running in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Lifetime of the session cookie.
    pub session_ttl_hours: Option<u32>,
    /// Serve from in-memory repositories instead of PostgreSQL.
    #[ortho_config(default = false)]
    pub in_memory: bool,
}

/// Where the server keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageSettings {
    Postgres { database_url: String },
    InMemory,
}

/// Settings that cannot be used to start the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("DAILY_DIET_DATABASE_URL must be set unless DAILY_DIET_IN_MEMORY is enabled")]
    MissingDatabaseUrl,
    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
}

impl AppSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        positive(
            self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE),
            "DAILY_DIET_POOL_MAX_SIZE",
        )
    }

    pub fn session_ttl_hours(&self) -> Result<u32, SettingsError> {
        positive(
            self.session_ttl_hours.unwrap_or(DEFAULT_SESSION_TTL_HOURS),
            "DAILY_DIET_SESSION_TTL_HOURS",
        )
    }

    /// Resolve the storage backend.
    ///
    /// In-memory mode wins over a configured database URL.
    pub fn storage(&self) -> Result<StorageSettings, SettingsError> {
        if self.in_memory {
            return Ok(StorageSettings::InMemory);
        }
        match self.database_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(StorageSettings::Postgres {
                database_url: url.to_owned(),
            }),
            _ => Err(SettingsError::MissingDatabaseUrl),
        }
    }
}

fn positive(value: u32, name: &'static str) -> Result<u32, SettingsError> {
    if value == 0 {
        Err(SettingsError::Zero { name })
    } else {
        Ok(value)
    }
}
