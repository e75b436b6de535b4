//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use daily_diet::inbound::http::session_config::SessionSettings;
use daily_diet::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) session_ttl_hours: u32,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration that serves from in-memory storage
    /// until a pool is attached.
    #[must_use]
    pub fn new(session: SessionSettings, session_ttl_hours: u32, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            session_ttl_hours,
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the Diesel repositories.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
