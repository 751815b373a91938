//! LearnHub entry-point: loads settings, prepares persistence and session
//! keys, then serves the admin API and learner portal.

use actix_web::cookie::SameSite;
use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use learnhub::inbound::http::health::HealthState;
use learnhub::inbound::http::session_config::{BuildMode, SessionInputs, session_settings};
use learnhub::outbound::persistence::{DbPool, PoolConfig, run_migrations};
#[cfg(feature = "metrics")]
use learnhub::server::prometheus_metrics;
use learnhub::server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("load settings")?;
    let bind_addr = settings.bind_addr()?;

    let session = session_settings(
        SessionInputs {
            key_file: settings.session_key_file(),
            cookie_secure: settings.session_cookie_secure(),
            allow_ephemeral: settings.session_allow_ephemeral,
        },
        BuildMode::from_debug_assertions(),
    )?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        SameSite::Lax,
        bind_addr,
    );

    if let Some(url) = settings.database_url() {
        if settings.run_migrations() {
            run_migrations(url).await.wrap_err("apply migrations")?;
        }
        let pool = DbPool::new(
            PoolConfig::new(url).with_max_connections(settings.db_max_connections()?),
        )
        .await
        .wrap_err("create database pool")?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(prometheus_metrics()?));

    info!(
        %bind_addr,
        persistent = config.has_db_pool(),
        "starting learnhub server"
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome.wrap_err("server terminated")
}
