//! Server settings loaded via OrthoConfig.
//!
//! Values come from `EXERCISE_LOG_*` environment variables, an optional
//! configuration file, or command-line flags. Without a database URL the
//! server keeps its data in memory.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Configuration values controlling how the server starts.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXERCISE_LOG")]
pub struct ServerSettings {
    /// Address the listener binds to.
    pub host: Option<IpAddr>,
    /// Port the listener binds to.
    pub port: Option<u16>,
    /// PostgreSQL connection string; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Leave pending migrations unapplied at startup.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

impl ServerSettings {
    /// Socket address to bind, defaulting to `0.0.0.0:3000`.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Maximum pool size, falling back to the default.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}
