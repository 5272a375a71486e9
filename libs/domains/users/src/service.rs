use std::sync::Arc;
use uuid::Uuid;

use axum_helpers::JwtAuth;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};
use crate::password;
use crate::repository::{UserPage, UserRepository};

/// Service layer for User business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
}

// Manual impl so R itself does not need to be Clone
impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            jwt: self.jwt.clone(),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
        }
    }

    /// Register a new user and issue a token so the caller is logged in
    /// immediately after signing up.
    pub async fn register(&self, input: CreateUser) -> UserResult<(User, String)> {
        let user = self.repository.create(input).await?;
        let token = self.token_for(&user)?;
        Ok((user, token))
    }

    /// Authenticate by email and password, issuing a fresh token.
    ///
    /// An unknown email and a wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, email: &str, password_input: &str) -> UserResult<(User, String)> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !password::verify_password(password_input, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        let token = self.token_for(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok((user, token))
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound)
    }

    /// List users in creation order; `per_page = None` returns all rows
    pub async fn list_users(&self, page: u64, per_page: Option<u64>) -> UserResult<UserPage> {
        self.repository.list(page, per_page).await
    }

    /// Update an existing user's profile
    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> UserResult<User> {
        let user = self.get_user(id).await?;
        self.repository.update(user, input).await
    }

    /// Delete a user by ID
    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        let user = self.get_user(id).await?;
        self.repository.delete(&user).await
    }

    // Tokens carry the "bearer " prefix so clients can echo them back
    // verbatim in the Authorization header.
    fn token_for(&self, user: &User) -> UserResult<String> {
        let token = self
            .jwt
            .create_token(&user.id.to_string(), &user.email)
            .map_err(|e| UserError::Token(e.to_string()))?;
        Ok(format!("bearer {}", token))
    }
}
