//! Users API routes

use axum::Router;
use domain_users::{PostgresUserRepository, UserService, handlers};

use crate::state::AppState;

/// Create users router backed by PostgreSQL
pub fn router(state: &AppState) -> Router {
    let repository = PostgresUserRepository::new(state.db.clone());
    let service = UserService::new(repository, state.jwt.clone());
    handlers::router(service, state.jwt.clone(), state.config.default_per_page)
}
