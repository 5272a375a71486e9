use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Timestamp format used on the wire
const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

/// User entity - matches SQL schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (UUIDv7, time-ordered)
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// User email (unique)
    pub email: String,
    /// Argon2 password hash (never exposed in API responses)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Optional details record (1:0..1)
    pub details: Option<UserDetails>,
}

/// Details record owned by a user, created the first time an address
/// is supplied and updated in place thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDetails {
    pub user_id: Uuid,
    pub address: String,
}

impl User {
    /// Create a new user (password must already be hashed)
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        password_hash: String,
        address: Option<String>,
    ) -> Self {
        let now = Utc::now();
        let id = Uuid::now_v7();
        Self {
            id,
            first_name,
            last_name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
            details: address.map(|address| UserDetails { user_id: id, address }),
        }
    }

    /// Apply scalar profile fields from an update (address is handled by
    /// the repository since it lives in its own table)
    pub fn apply_update(&mut self, update: &UpdateUser) {
        self.first_name = update.first_name.clone();
        self.last_name = update.last_name.clone();
        self.email = update.email.clone();
        self.updated_at = Utc::now();
    }

    /// Attach or replace the details record
    pub fn set_address(&mut self, address: String) {
        self.details = Some(UserDetails {
            user_id: self.id,
            address,
        });
    }
}

/// DTO for registering a new user
///
/// String fields default to "" when absent so a missing field surfaces
/// as a per-field validation message instead of a deserialization error.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct StoreUserRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "The first name field is required."))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "The last name field is required."))]
    pub last_name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, max = 255, message = "The email field is required."),
        email(message = "The email must be a valid email address.")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 8, message = "The password must be at least 8 characters."))]
    pub password: String,
    #[serde(default)]
    #[validate(must_match(
        other = "password",
        message = "The password confirmation does not match."
    ))]
    pub password_confirmation: String,
    pub address: Option<String>,
}

/// DTO for updating an existing user's profile
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "The first name field is required."))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "The last name field is required."))]
    pub last_name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, max = 255, message = "The email field is required."),
        email(message = "The email must be a valid email address.")
    )]
    pub email: String,
    pub address: Option<String>,
}

/// DTO for user login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 255, message = "The email field is required."),
        email(message = "The email must be a valid email address.")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "The password field is required."))]
    pub password: String,
}

/// Validated create payload handed to the repository
/// (plaintext password; the repository hashes it)
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub address: Option<String>,
}

impl From<StoreUserRequest> for CreateUser {
    fn from(input: StoreUserRequest) -> Self {
        Self {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password: input.password,
            address: input.address,
        }
    }
}

/// Validated update payload handed to the repository
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(input: UpdateUserRequest) -> Self {
        Self {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            address: input.address,
        }
    }
}

/// Query parameters for listing users
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    /// 1-based page number (default 1)
    pub page: Option<u64>,
    /// Page size (default from configuration)
    pub per_page: Option<u64>,
    /// Set to false to disable pagination and return all rows
    pub pagination: Option<bool>,
}

/// User wire shape (without password hash; address flattened to "")
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResource {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserResource {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            address: user
                .details
                .as_ref()
                .map(|d| d.address.clone())
                .unwrap_or_default(),
            created_at: user.created_at.format(TIMESTAMP_FORMAT).to_string(),
            updated_at: user.updated_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// List response payload with pagination info
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListUsersPayload {
    pub data: Vec<UserResource>,
    pub total: u64,
    pub per_page: u64,
}
