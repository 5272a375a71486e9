use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::ApiResponse;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("{0}")]
    Persistence(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        match &self {
            UserError::NotFound => ApiResponse::error(
                "User not found",
                StatusCode::NOT_FOUND,
                json!([]),
            ),
            UserError::DuplicateEmail(email) => {
                tracing::debug!(email = %email, "Duplicate email rejected");
                ApiResponse::error(
                    "The given data was invalid.",
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({"email": ["The email has already been taken."]}),
                )
            }
            UserError::InvalidCredentials | UserError::Unauthorized => ApiResponse::error(
                "Unauthorized",
                StatusCode::UNAUTHORIZED,
                json!([]),
            ),
            UserError::PasswordHash(msg) => {
                tracing::error!("Password hash error: {}", msg);
                ApiResponse::error(
                    "An internal error occurred",
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!([]),
                )
            }
            UserError::Token(msg) => {
                tracing::error!("Token error: {}", msg);
                ApiResponse::error(
                    "An internal error occurred",
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!([]),
                )
            }
            UserError::Persistence(msg) => {
                tracing::error!("Persistence error: {}", msg);
                ApiResponse::error(msg, StatusCode::UNPROCESSABLE_ENTITY, json!([]))
            }
        }
    }
}
