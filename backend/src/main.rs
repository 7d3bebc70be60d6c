//! Backend entry-point: loads configuration, applies migrations and serves
//! the REST API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use complaints::config::{AppConfig, BuildMode};
use complaints::inbound::http::health::HealthState;
use complaints::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
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

    let app_config = AppConfig::from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let AppConfig {
        database_url,
        jwt_secret,
        bind_addr,
        admin_seed,
    } = app_config;

    let mut config = ServerConfig::new(bind_addr, jwt_secret);
    if let Some(seed) = admin_seed {
        config = config.with_admin_seed(seed);
    }
    if let Some(url) = database_url {
        let applied = run_pending_migrations(&url)
            .await
            .map_err(std::io::Error::other)?;
        info!(count = applied.len(), "database schema up to date");
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), &config).await?;
    info!(%bind_addr, "listening");
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
