//! # Axum Helpers
//!
//! A collection of utilities, middleware, and helpers for building Axum web applications.
//!
//! ## Modules
//!
//! - **[`auth`]**: stateless JWT authentication and bearer-token middleware
//! - **[`envelope`]**: the uniform success/error response envelope
//! - **[`server`]**: server setup, health checks, graceful shutdown
//! - **[`http`]**: HTTP-level middleware (security headers)
//! - **[`extractors`]**: custom extractors (validated JSON)
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::time::Duration;
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes).await?;
//!
//!     let config = ServerConfig::default();
//!     create_production_app(router, &config, Duration::from_secs(30), async {}).await?;
//!     Ok(())
//! }
//! ```

// Domain modules
pub mod auth;
pub mod envelope;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export auth types
pub use auth::{bearer_auth_middleware, AuthUser, JwtAuth, JwtClaims, JwtConfig};

// Re-export the response envelope
pub use envelope::ApiResponse;

// Re-export server types
pub use server::{
    create_production_app, create_router, health_router, run_health_checks, HealthCheckFuture,
    HealthResponse, ShutdownCoordinator,
};

// Re-export HTTP middleware
pub use http::security_headers;

// Re-export extractors
pub use extractors::ValidatedJson;
