//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        version = "0.1.0",
        description = "User account management API with JWT authentication",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api", api = domain_users::handlers::ApiDoc)
    ),
    tags(
        (name = "Users", description = "User account management endpoints")
    )
)]
pub struct ApiDoc;
