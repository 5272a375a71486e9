//! Uniform response envelope shared by every endpoint.
//!
//! Success bodies look like `{code, success: true, message, data}` and error
//! bodies like `{success: false, code, message, errors}`. The HTTP transport
//! status always equals the logical `code` field.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

/// Builder for enveloped responses.
///
/// # Example
/// ```ignore
/// use axum::http::StatusCode;
/// use axum_helpers::ApiResponse;
///
/// let ok = ApiResponse::success(user, StatusCode::CREATED, "User created successfully");
/// let err = ApiResponse::error("Unauthorized", StatusCode::UNAUTHORIZED, serde_json::json!([]));
/// ```
pub struct ApiResponse;

impl ApiResponse {
    /// Build a success envelope with the given payload, status, and message.
    pub fn success<T: Serialize>(data: T, status: StatusCode, message: &str) -> Response {
        let body = json!({
            "code": status.as_u16(),
            "success": true,
            "message": message,
            "data": data,
        });

        (status, Json(body)).into_response()
    }

    /// Build an error envelope.
    ///
    /// `errors` is either an empty array or an object keyed by field name
    /// with a list of human-readable messages per field.
    pub fn error(message: &str, status: StatusCode, errors: Value) -> Response {
        let body = json!({
            "success": false,
            "code": status.as_u16(),
            "message": message,
            "errors": errors,
        });

        (status, Json(body)).into_response()
    }
}

/// Fallback handler producing an enveloped 404 for unknown routes.
pub async fn not_found() -> Response {
    ApiResponse::error(
        "The requested resource was not found",
        StatusCode::NOT_FOUND,
        json!([]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_success_envelope_shape() {
        let response =
            ApiResponse::success(json!({"id": 1}), StatusCode::CREATED, "User created successfully");
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["code"], 201);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "User created successfully");
        assert_eq!(body["data"]["id"], 1);
    }

    #[tokio::test]
    async fn test_error_envelope_shape() {
        let response = ApiResponse::error("Unauthorized", StatusCode::UNAUTHORIZED, json!([]));
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], 401);
        assert_eq!(body["message"], "Unauthorized");
        assert_eq!(body["errors"], json!([]));
    }

    #[tokio::test]
    async fn test_error_envelope_with_field_errors() {
        let errors = json!({"email": ["The email must be a valid email address."]});
        let response = ApiResponse::error(
            "The given data was invalid.",
            StatusCode::UNPROCESSABLE_ENTITY,
            errors.clone(),
        );
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["errors"], errors);
    }

    #[tokio::test]
    async fn test_success_with_null_data() {
        let response =
            ApiResponse::success(Value::Null, StatusCode::OK, "User deleted successfully");
        let body = body_json(response).await;
        assert!(body["data"].is_null());
        assert_eq!(body["success"], true);
    }
}
