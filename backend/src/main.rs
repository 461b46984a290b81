//! Backend entry-point: loads configuration, prepares storage, seeds demo
//! data, and serves the REST API.

mod server;

use std::ffi::OsString;
use std::sync::Arc;

use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use hydrocheck::domain::EmptyLookupPolicy;
use hydrocheck::inbound::http::health::HealthState;
use hydrocheck::inbound::http::session_config::{
    BuildMode, SessionConfigError, session_settings_from_env,
};
use hydrocheck::outbound::persistence::{
    DbPool, MigrationError, PoolConfig, PoolError, run_migrations,
};
use hydrocheck::seed::{SeedSettings, StartupSeedingError, seed_on_startup};
use ortho_config::OrthoConfig;
use server::{ServerConfig, ServerSettings, build_repositories, create_server};

/// Failures that stop the process before it serves traffic.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("invalid configuration: {0}")]
    Settings(String),
    #[error(transparent)]
    Session(#[from] SessionConfigError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error("migration task failed: {0}")]
    MigrationTask(#[from] tokio::task::JoinError),
    #[error(transparent)]
    Seeding(#[from] StartupSeedingError),
    #[error("server failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings come from the environment and config files only.
fn program_name() -> [OsString; 1] {
    [std::env::args_os()
        .next()
        .unwrap_or_else(|| OsString::from("hydrocheck"))]
}

async fn connect(settings: &ServerSettings) -> Result<Option<DbPool>, StartupError> {
    let Some(url) = settings.database_url() else {
        warn!("HYDROCHECK_DATABASE_URL not set; using in-memory stores");
        return Ok(None);
    };

    let migration_url = url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_migrations(&migration_url)).await??;
    info!(applied, "database schema up to date");

    let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_size())).await?;
    Ok(Some(pool))
}

async fn run() -> Result<(), StartupError> {
    let settings = ServerSettings::load_from_iter(program_name())
        .map_err(|err| StartupError::Settings(err.to_string()))?;
    let seed_settings = SeedSettings::load_from_iter(program_name())
        .map_err(|err| StartupError::Settings(err.to_string()))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())?;
    info!(fingerprint = %session.fingerprint(), "session key loaded");

    let pool = connect(&settings).await?;
    let repositories = build_repositories(pool.as_ref());
    seed_on_startup(
        &seed_settings,
        repositories.water.clone(),
        repositories.filters.clone(),
        Arc::new(DefaultClock),
    )
    .await?;

    let bind_addr = settings.bind_addr();
    let config = ServerConfig::new(session, bind_addr, repositories)
        .with_lookup_policy(EmptyLookupPolicy::from_switch(settings.mock_fallback));
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await?;
    Ok(())
}

#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    run().await?;
    Ok(())
}
