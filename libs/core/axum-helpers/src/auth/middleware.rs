use super::jwt::JwtAuth;
use crate::envelope::ApiResponse;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use serde_json::json;
use uuid::Uuid;

/// The authenticated caller, inserted into request extensions by
/// [`bearer_auth_middleware`]. Handlers extract it with
/// `Extension<AuthUser>`; there is no ambient current-user state.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// Extract the JWT from the Authorization header: "Bearer <token>".
///
/// The prefix is matched case-insensitively since issued token strings
/// carry a lowercase "bearer " prefix and clients tend to echo it back.
fn extract_token_from_request(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| {
            let (scheme, token) = auth.split_once(' ')?;
            if scheme.eq_ignore_ascii_case("bearer") {
                Some(token.trim().to_string())
            } else {
                None
            }
        })
}

fn unauthorized() -> Response {
    ApiResponse::error("Unauthorized", StatusCode::UNAUTHORIZED, json!([]))
}

/// Bearer-token authentication middleware.
///
/// Verifies the token signature and expiry, then inserts an [`AuthUser`]
/// into request extensions. Missing, invalid, or expired tokens
/// short-circuit with the 401 envelope before the handler runs.
///
/// # Example
///
/// ```ignore
/// use axum::{routing::put, Router};
/// use axum_helpers::{bearer_auth_middleware, JwtAuth};
///
/// let protected_routes = Router::new()
///     .route("/users/{id}", put(update_user))
///     .layer(axum::middleware::from_fn_with_state(
///         jwt_auth.clone(),
///         bearer_auth_middleware,
///     ));
/// ```
pub async fn bearer_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = match extract_token_from_request(&headers) {
        Some(t) => t,
        None => {
            tracing::debug!("No bearer token in Authorization header");
            return Err(unauthorized());
        }
    };

    let claims = match auth.verify_token(&token) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("JWT verification failed: {}", e);
            return Err(unauthorized());
        }
    };

    let user_id = match Uuid::parse_str(&claims.sub) {
        Ok(id) => id,
        Err(e) => {
            tracing::debug!("JWT subject is not a valid UUID: {}", e);
            return Err(unauthorized());
        }
    };

    request.extensions_mut().insert(AuthUser {
        id: user_id,
        email: claims.email,
    });
    Ok(next.run(request).await)
}
