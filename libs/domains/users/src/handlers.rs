use axum::{
    Extension, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::Response,
    routing::{get, post, put},
};
use axum_helpers::{ApiResponse, AuthUser, JwtAuth, ValidatedJson, bearer_auth_middleware};
use serde_json::{Value, json};
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{
    ListQuery, ListUsersPayload, LoginRequest, StoreUserRequest, UpdateUserRequest, UserResource,
};
use crate::repository::UserRepository;
use crate::service::UserService;

const TAG: &str = "Users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, store_user, login, update_user, delete_user),
    components(schemas(
        StoreUserRequest,
        UpdateUserRequest,
        LoginRequest,
        UserResource,
        ListUsersPayload
    )),
    tags(
        (name = TAG, description = "User account management endpoints")
    )
)]
pub struct ApiDoc;

/// Shared handler state
pub struct UsersState<R: UserRepository> {
    service: UserService<R>,
    default_per_page: u64,
}

// Manual impl so R itself does not need to be Clone
impl<R: UserRepository> Clone for UsersState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            default_per_page: self.default_per_page,
        }
    }
}

/// Create the users router with all HTTP endpoints
///
/// Listing, registration, and login are public; profile updates and
/// deletion require a bearer token.
pub fn router<R: UserRepository + 'static>(
    service: UserService<R>,
    jwt: JwtAuth,
    default_per_page: u64,
) -> Router {
    let state = UsersState {
        service,
        default_per_page,
    };

    let protected = Router::new()
        .route("/users/{id}", put(update_user::<R>).delete(delete_user::<R>))
        .route_layer(middleware::from_fn_with_state(jwt, bearer_auth_middleware));

    Router::new()
        .route("/users", get(list_users::<R>).post(store_user::<R>))
        .route("/login", post(login::<R>))
        .merge(protected)
        .with_state(state)
}

/// List users in creation order
#[utoipa::path(
    get,
    path = "/users",
    tag = TAG,
    params(ListQuery),
    responses(
        (status = 200, description = "List of users", body = ListUsersPayload),
        (status = 422, description = "Listing failed")
    )
)]
async fn list_users<R: UserRepository>(
    State(state): State<UsersState<R>>,
    Query(query): Query<ListQuery>,
) -> UserResult<Response> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = match query.pagination {
        Some(false) => None,
        _ => Some(query.per_page.unwrap_or(state.default_per_page)),
    };

    let result = state.service.list_users(page, per_page).await?;

    let payload = ListUsersPayload {
        // When pagination is disabled, per_page reports the returned count
        per_page: per_page.unwrap_or(result.users.len() as u64),
        total: result.total,
        data: result.users.iter().map(UserResource::from).collect(),
    };

    Ok(ApiResponse::success(
        payload,
        StatusCode::OK,
        "User get successfully",
    ))
}

/// Register a new user
///
/// Returns the created user together with a login token, so registration
/// doubles as a first login.
#[utoipa::path(
    post,
    path = "/users",
    tag = TAG,
    request_body = StoreUserRequest,
    responses(
        (status = 201, description = "User created successfully"),
        (status = 422, description = "Validation failed")
    )
)]
async fn store_user<R: UserRepository>(
    State(state): State<UsersState<R>>,
    ValidatedJson(input): ValidatedJson<StoreUserRequest>,
) -> UserResult<Response> {
    let (user, token) = state.service.register(input.into()).await?;

    Ok(ApiResponse::success(
        json!({
            "user": UserResource::from(&user),
            "token": token,
        }),
        StatusCode::CREATED,
        "User created successfully",
    ))
}

/// Authenticate and issue a token
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Validation failed")
    )
)]
async fn login<R: UserRepository>(
    State(state): State<UsersState<R>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Response> {
    let (_user, token) = state.service.login(&input.email, &input.password).await?;

    Ok(ApiResponse::success(
        json!({ "token": token }),
        StatusCode::OK,
        "User Login successfully",
    ))
}

/// Update a user's profile
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Validation failed")
    )
)]
async fn update_user<R: UserRepository>(
    State(state): State<UsersState<R>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateUserRequest>,
) -> UserResult<Response> {
    tracing::debug!(actor = %auth_user.id, target = %id, "Updating user");
    let user = state.service.update_user(id, input.into()).await?;

    Ok(ApiResponse::success(
        json!({ "user": UserResource::from(&user) }),
        StatusCode::OK,
        "User updated successfully",
    ))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
async fn delete_user<R: UserRepository>(
    State(state): State<UsersState<R>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> UserResult<Response> {
    tracing::debug!(actor = %auth_user.id, target = %id, "Deleting user");
    state.service.delete_user(id).await?;

    Ok(ApiResponse::success(
        Value::Null,
        StatusCode::OK,
        "User deleted successfully",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryUserRepository;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use axum_helpers::JwtConfig;
    use tower::ServiceExt;

    fn app() -> Router {
        let jwt = JwtAuth::new(&JwtConfig::new(
            "test-secret-key-that-is-at-least-32-chars",
            3600,
        ));
        let service = UserService::new(InMemoryUserRepository::new(), jwt.clone());
        router(service, jwt, 10)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn register_body(email: &str) -> Value {
        json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "email": email,
            "password": "password123",
            "password_confirmation": "password123",
            "address": "221B Baker Street"
        })
    }

    /// Register a user and return (id, token) from the response envelope
    async fn register(app: &Router, email: &str) -> (Uuid, String) {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/users", register_body(email)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        let id = Uuid::parse_str(body["data"]["user"]["id"].as_str().unwrap()).unwrap();
        let token = body["data"]["token"].as_str().unwrap().to_string();
        (id, token)
    }

    #[tokio::test]
    async fn test_register_returns_user_and_token() {
        let app = app();

        let response = app
            .oneshot(json_request("POST", "/users", register_body("jane@example.com")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["code"], 201);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "User created successfully");
        assert_eq!(body["data"]["user"]["email"], "jane@example.com");
        assert_eq!(body["data"]["user"]["address"], "221B Baker Street");
        assert!(body["data"]["user"].get("password").is_none());
        assert!(body["data"]["user"].get("password_hash").is_none());
        assert!(
            body["data"]["token"]
                .as_str()
                .unwrap()
                .starts_with("bearer ")
        );
    }

    #[tokio::test]
    async fn test_register_missing_fields_yields_per_field_errors() {
        let app = app();

        let response = app
            .oneshot(json_request("POST", "/users", json!({"email": "jane@example.com"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(
            body["errors"]["first_name"][0],
            "The first name field is required."
        );
        assert_eq!(
            body["errors"]["password"][0],
            "The password must be at least 8 characters."
        );
    }

    #[tokio::test]
    async fn test_register_password_confirmation_must_match() {
        let app = app();

        let mut body = register_body("jane@example.com");
        body["password_confirmation"] = json!("different123");

        let response = app
            .oneshot(json_request("POST", "/users", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(
            body["errors"]["password_confirmation"][0],
            "The password confirmation does not match."
        );
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let app = app();
        register(&app, "jane@example.com").await;

        let response = app
            .oneshot(json_request("POST", "/users", register_body("jane@example.com")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["message"], "The given data was invalid.");
        assert_eq!(body["errors"]["email"][0], "The email has already been taken.");
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let app = app();
        register(&app, "jane@example.com").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/login",
                json!({"email": "jane@example.com", "password": "password123"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["message"], "User Login successfully");
        assert!(
            body["data"]["token"]
                .as_str()
                .unwrap()
                .starts_with("bearer ")
        );
    }

    #[tokio::test]
    async fn test_update_with_invalid_email_names_the_field() {
        let app = app();
        let (id, token) = register(&app, "jane@example.com").await;

        let request = Request::builder()
            .method("PUT")
            .uri(format!("/users/{id}"))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, &token)
            .body(Body::from(
                json!({
                    "first_name": "Janet",
                    "last_name": "Doe",
                    "email": "not-an-email"
                })
                .to_string(),
            ))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(
            body["errors"]["email"][0],
            "The email must be a valid email address."
        );

        // The rejected update must leave the stored record untouched
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"]["data"][0]["email"], "jane@example.com");
        assert_eq!(body["data"]["data"][0]["first_name"], "Jane");
    }

    #[tokio::test]
    async fn test_login_failures_share_one_body() {
        let app = app();
        register(&app, "jane@example.com").await;

        let wrong_password = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/login",
                json!({"email": "jane@example.com", "password": "wrong-password"}),
            ))
            .await
            .unwrap();
        let unknown_email = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/login",
                json!({"email": "nobody@example.com", "password": "password123"}),
            ))
            .await
            .unwrap();

        assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(wrong_password).await,
            body_json(unknown_email).await
        );
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_is_unauthorized() {
        let app = app();
        register(&app, "jane@example.com").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/login",
                json!({"email": "jane@example.com", "password": "wrong-password"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_list_users_is_public_and_paginated() {
        let app = app();
        for i in 0..3 {
            register(&app, &format!("user{i}@example.com")).await;
        }

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/users?page=1&per_page=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["message"], "User get successfully");
        assert_eq!(body["data"]["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"]["total"], 3);
        assert_eq!(body["data"]["per_page"], 2);
    }

    #[tokio::test]
    async fn test_list_users_pagination_can_be_disabled() {
        let app = app();
        for i in 0..3 {
            register(&app, &format!("user{i}@example.com")).await;
        }

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/users?pagination=false")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["data"]["data"].as_array().unwrap().len(), 3);
        assert_eq!(body["data"]["per_page"], 3);
    }

    #[tokio::test]
    async fn test_update_requires_a_token() {
        let app = app();
        let (id, _) = register(&app, "jane@example.com").await;

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/users/{id}"),
                json!({
                    "first_name": "Janet",
                    "last_name": "Doe",
                    "email": "janet@example.com"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_update_with_token() {
        let app = app();
        let (id, token) = register(&app, "jane@example.com").await;

        let request = Request::builder()
            .method("PUT")
            .uri(format!("/users/{id}"))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, &token)
            .body(Body::from(
                json!({
                    "first_name": "Janet",
                    "last_name": "Doe",
                    "email": "janet@example.com",
                    "address": "10 Downing Street"
                })
                .to_string(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["message"], "User updated successfully");
        assert_eq!(body["data"]["user"]["first_name"], "Janet");
        assert_eq!(body["data"]["user"]["address"], "10 Downing Street");
    }

    #[tokio::test]
    async fn test_update_unknown_user_is_not_found() {
        let app = app();
        let (_, token) = register(&app, "jane@example.com").await;

        let request = Request::builder()
            .method("PUT")
            .uri(format!("/users/{}", Uuid::now_v7()))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, &token)
            .body(Body::from(
                json!({
                    "first_name": "Janet",
                    "last_name": "Doe",
                    "email": "janet@example.com"
                })
                .to_string(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["message"], "User not found");
    }

    #[tokio::test]
    async fn test_delete_with_token() {
        let app = app();
        let (id, token) = register(&app, "jane@example.com").await;

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/users/{id}"))
            .header(header::AUTHORIZATION, &token)
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["message"], "User deleted successfully");
        assert_eq!(body["data"], Value::Null);

        // Second delete hits a missing row
        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/users/{id}"))
            .header(header::AUTHORIZATION, &token)
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_with_garbage_token_is_unauthorized() {
        let app = app();
        let (id, _) = register(&app, "jane@example.com").await;

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/users/{id}"))
            .header(header::AUTHORIZATION, "bearer not-a-real-token")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
