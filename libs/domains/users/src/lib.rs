//! Users Domain
//!
//! This module provides a complete domain implementation for user account
//! management: registration with auto-login, credential authentication,
//! profile updates, paginated listing, and deletion.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, response envelopes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, credential checks, token issuance
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations), password hashing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, wire resources
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{
//!     handlers,
//!     repository::InMemoryUserRepository,
//!     service::UserService,
//! };
//!
//! let jwt_auth = JwtAuth::new(&JwtConfig::new(
//!     "my-super-secret-key-that-is-at-least-32-chars",
//!     3600,
//! ));
//! let repository = InMemoryUserRepository::new();
//! let service = UserService::new(repository, jwt_auth.clone());
//!
//! // Create Axum router
//! let router = handlers::router(service, jwt_auth, 10);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod postgres_repository_impl;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use models::{
    CreateUser, ListQuery, ListUsersPayload, LoginRequest, StoreUserRequest, UpdateUser,
    UpdateUserRequest, User, UserDetails, UserResource,
};
pub use postgres_repository_impl::PostgresUserRepository;
pub use repository::{InMemoryUserRepository, UserPage, UserRepository};
pub use service::UserService;
