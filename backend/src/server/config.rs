//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use complaints::config::AdminSeed;
use complaints::outbound::persistence::DbPool;
use zeroize::Zeroizing;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) jwt_secret: Zeroizing<Vec<u8>>,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) admin_seed: Option<AdminSeed>,
}

impl ServerConfig {
    /// Construct a server configuration backed by the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, jwt_secret: Zeroizing<Vec<u8>>) -> Self {
        Self {
            bind_addr,
            jwt_secret,
            db_pool: None,
            admin_seed: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server uses the PostgreSQL repositories instead of
    /// the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Ensure an administrator account exists before the server starts.
    #[must_use]
    pub fn with_admin_seed(mut self, seed: AdminSeed) -> Self {
        self.admin_seed = Some(seed);
        self
    }
}
