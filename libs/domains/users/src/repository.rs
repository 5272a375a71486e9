use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};
use crate::password;

/// One page of users together with the total row count
#[derive(Debug, Clone)]
pub struct UserPage {
    pub users: Vec<User>,
    pub total: u64,
}

/// Repository trait for User persistence
///
/// Implementations own password hashing so a plaintext password never
/// crosses the storage boundary.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user (hashes the plaintext password)
    async fn create(&self, input: CreateUser) -> UserResult<User>;

    /// Get a user by ID, with details attached when present
    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Get a user by email
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// List users in creation order
    ///
    /// `page` is 1-based. `per_page = None` disables pagination and
    /// returns every row; `total` always reflects the full table.
    async fn list(&self, page: u64, per_page: Option<u64>) -> UserResult<UserPage>;

    /// Apply a profile update to an existing user
    async fn update(&self, user: User, update: UpdateUser) -> UserResult<User>;

    /// Delete a user (details rows go with it)
    async fn delete(&self, user: &User) -> UserResult<()>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        let email_exists = users
            .values()
            .any(|u| u.email.to_lowercase() == input.email.to_lowercase());

        if email_exists {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let password_hash = password::hash_password(&input.password)?;
        let user = User::new(
            input.first_name,
            input.last_name,
            input.email,
            password_hash,
            input.address,
        );

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        let user = users
            .values()
            .find(|u| u.email.to_lowercase() == email.to_lowercase())
            .cloned();
        Ok(user)
    }

    async fn list(&self, page: u64, per_page: Option<u64>) -> UserResult<UserPage> {
        let users = self.users.read().await;
        let total = users.len() as u64;

        let mut result: Vec<User> = users.values().cloned().collect();
        // UUIDv7 ids are time-ordered, so this is creation order
        result.sort_by(|a, b| a.id.cmp(&b.id));

        let result = match per_page {
            Some(per_page) => {
                let offset = page.saturating_sub(1).saturating_mul(per_page);
                result
                    .into_iter()
                    .skip(offset as usize)
                    .take(per_page as usize)
                    .collect()
            }
            None => result,
        };

        Ok(UserPage {
            users: result,
            total,
        })
    }

    async fn update(&self, mut user: User, update: UpdateUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound);
        }

        let email_exists = users
            .values()
            .any(|u| u.id != user.id && u.email.to_lowercase() == update.email.to_lowercase());

        if email_exists {
            return Err(UserError::DuplicateEmail(update.email));
        }

        user.apply_update(&update);
        if let Some(address) = update.address {
            user.set_address(address);
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Updated user");
        Ok(user)
    }

    async fn delete(&self, user: &User) -> UserResult<()> {
        let mut users = self.users.write().await;

        if users.remove(&user.id).is_none() {
            return Err(UserError::NotFound);
        }

        tracing::info!(user_id = %user.id, "Deleted user");
        Ok(())
    }
}
