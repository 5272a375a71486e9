//! Readiness endpoint

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use sea_orm::DatabaseConnection;
use serde_json::Value;

type ReadyResponse = (StatusCode, Json<Value>);

/// Readiness probe that verifies the database connection
async fn ready(State(db): State<DatabaseConnection>) -> Result<ReadyResponse, ReadyResponse> {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async {
            database::postgres::check_health(&db)
                .await
                .map_err(|e| e.to_string())
        }),
    )];

    run_health_checks(checks).await
}

pub fn router(db: DatabaseConnection) -> Router {
    Router::new().route("/ready", get(ready)).with_state(db)
}
