//! Users API - REST server for user account management

use axum_helpers::JwtAuth;
use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");
    let db =
        database::postgres::connect_from_config_with_retry(config.database.clone(), None).await?;
    database::postgres::run_migrations::<Migrator>(&db, config.app.name).await?;

    let jwt = JwtAuth::new(&config.jwt);

    let state = AppState {
        config: config.clone(),
        db,
        jwt,
    };

    // Build REST router
    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::health::router(state.db.clone()));

    info!("Starting Users API on port {}", state.config.server.port);

    // Run server with graceful shutdown
    let db_for_cleanup = state.db.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing PostgreSQL connection pool");
            if let Err(e) = db_for_cleanup.close().await {
                tracing::warn!("Failed to close connection pool cleanly: {}", e);
            }
            info!("PostgreSQL connection pool closed");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
