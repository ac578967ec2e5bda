//! Backend entry-point: loads settings, prepares storage and serves the
//! exercise log API.

mod server;

use std::time::Duration;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use exercise_log::inbound::http::health::HealthState;
use exercise_log::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations_async};
use exercise_log::settings::ServerSettings;

use server::{ServerConfig, create_server};

const POOL_CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

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

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let mut config = ServerConfig::new(settings.bind_addr());

    if let Some(database_url) = settings.database_url() {
        if settings.skip_migrations {
            info!("skipping database migrations");
        } else {
            let applied = run_pending_migrations_async(database_url.to_owned())
                .await
                .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;
            info!(applied, "database migrations complete");
        }
        let pool = DbPool::new(
            PoolConfig::new(database_url)
                .with_max_size(settings.pool_max_size())
                .with_connection_timeout(POOL_CONNECTION_TIMEOUT),
        )
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(Some(server::build_prometheus()?));
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(addr = %settings.bind_addr(), "exercise log server listening");
    server.await
}
