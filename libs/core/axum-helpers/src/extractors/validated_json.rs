//! JSON extractor with automatic validation using the validator crate.

use crate::envelope::ApiResponse;
use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::Response,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Validates the request body using the `validator` crate's `Validate`
/// trait. A failed validation short-circuits with a 422 envelope carrying
/// per-field messages, so handlers only ever see well-formed input.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct LoginRequest {
///     #[validate(email(message = "The email must be a valid email address."))]
///     email: String,
///     #[validate(length(min = 1, message = "The password field is required."))]
///     password: String,
/// }
///
/// async fn login(ValidatedJson(payload): ValidatedJson<LoginRequest>) -> String {
///     format!("Logging in: {}", payload.email)
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await.map_err(|e| {
            ApiResponse::error(
                "The given data was invalid.",
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({"body": [e.body_text()]}),
            )
        })?;

        data.validate().map_err(|e| {
            let details = e
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let messages: Vec<Value> = errors
                        .iter()
                        .map(|err| match &err.message {
                            Some(message) => json!(message),
                            None => json!(format!("The {} field is invalid.", field)),
                        })
                        .collect();
                    (field.to_string(), json!(messages))
                })
                .collect::<serde_json::Map<_, _>>();

            ApiResponse::error(
                "The given data was invalid.",
                StatusCode::UNPROCESSABLE_ENTITY,
                Value::Object(details),
            )
        })?;

        Ok(ValidatedJson(data))
    }
}
