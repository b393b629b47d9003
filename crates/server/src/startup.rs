use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use migration::MigratorTrait;
use tracing::{info, warn};

use common::utils::logging::init_logging;
use configs::AppConfig;
use service::auth::email::LoggingEmailSender;
use service::runtime;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Create the optional seed account named in `[auth]`.
async fn seed_account(state: &AppState) -> Result<(), StartupError> {
    let (Some(email), Some(password)) = (&state.config.auth.seed_email, &state.config.auth.seed_password) else {
        return Ok(());
    };
    match state.auth.ensure_account(email, password).await {
        Ok(true) => info!(%email, "seed account created"),
        Ok(false) => info!(%email, "seed account already present"),
        Err(e) => warn!(%email, error = %e, "seed account not created"),
    }
    Ok(())
}

/// Connect, migrate and assemble the application without binding a socket.
pub async fn build_app(cfg: AppConfig) -> Result<Router, StartupError> {
    runtime::ensure_env(&cfg.uploads.dir)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await.map_err(anyhow::Error::from)?;

    let state = AppState::new(db, cfg, Arc::new(LoggingEmailSender));
    seed_account(&state).await?;
    Ok(routes::build_router(state))
}

/// Public entry: build the app and run the HTTP server until the process stops.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    init_logging(&cfg.logging.format);

    let addr = bind_addr(&cfg)?;
    let app = build_app(cfg).await?;

    info!(%addr, "starting networkpro server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
