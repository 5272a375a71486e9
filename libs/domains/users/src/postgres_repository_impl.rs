use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement,
    TransactionTrait,
};
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, UserDetails};
use crate::password;
use crate::repository::{UserPage, UserRepository};

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Helper struct for deserializing user rows joined with their details
#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    address: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
            details: row.address.map(|address| UserDetails {
                user_id: row.id,
                address,
            }),
        }
    }
}

const SELECT_USER: &str = r#"
    SELECT u.id, u.first_name, u.last_name, u.email, u.password_hash,
           u.created_at, u.updated_at, d.address
    FROM users u
    LEFT JOIN user_details d ON d.user_id = u.id
"#;

fn map_db_err(e: DbErr, email: &str) -> UserError {
    let err_str = e.to_string();
    if err_str.contains("duplicate key") || err_str.contains("unique constraint") {
        UserError::DuplicateEmail(email.to_string())
    } else {
        UserError::Persistence(format!("Database error: {}", e))
    }
}

fn persistence(e: DbErr) -> UserError {
    UserError::Persistence(format!("Database error: {}", e))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let password_hash = password::hash_password(&input.password)?;
        let user = User::new(
            input.first_name,
            input.last_name,
            input.email,
            password_hash,
            input.address,
        );

        let txn = self.db.begin().await.map_err(persistence)?;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
                INSERT INTO users (id, first_name, last_name, email, password_hash, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
            [
                user.id.into(),
                user.first_name.clone().into(),
                user.last_name.clone().into(),
                user.email.clone().into(),
                user.password_hash.clone().into(),
                user.created_at.into(),
                user.updated_at.into(),
            ],
        );

        txn.execute_raw(stmt)
            .await
            .map_err(|e| map_db_err(e, &user.email))?;

        if let Some(ref details) = user.details {
            let stmt = Statement::from_sql_and_values(
                DbBackend::Postgres,
                "INSERT INTO user_details (user_id, address) VALUES ($1, $2)",
                [details.user_id.into(), details.address.clone().into()],
            );
            txn.execute_raw(stmt).await.map_err(persistence)?;
        }

        txn.commit().await.map_err(persistence)?;

        tracing::info!(user_id = %user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let sql = format!("{} WHERE u.id = $1", SELECT_USER);
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(persistence)?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let sql = format!("{} WHERE lower(u.email) = lower($1)", SELECT_USER);
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [email.into()]);

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(persistence)?;

        Ok(row.map(|r| r.into()))
    }

    async fn list(&self, page: u64, per_page: Option<u64>) -> UserResult<UserPage> {
        // u.id is a UUIDv7, so ascending id order is creation order
        let stmt = match per_page {
            Some(per_page) => {
                let offset = page.saturating_sub(1).saturating_mul(per_page);
                // Postgres rejects negative LIMIT/OFFSET, so clamp instead of wrapping
                let limit = i64::try_from(per_page).unwrap_or(i64::MAX);
                let offset = i64::try_from(offset).unwrap_or(i64::MAX);
                Statement::from_sql_and_values(
                    DbBackend::Postgres,
                    format!("{} ORDER BY u.id ASC LIMIT $1 OFFSET $2", SELECT_USER),
                    [limit.into(), offset.into()],
                )
            }
            None => Statement::from_sql_and_values(
                DbBackend::Postgres,
                format!("{} ORDER BY u.id ASC", SELECT_USER),
                [],
            ),
        };

        let rows = UserRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(persistence)?;

        #[derive(FromQueryResult)]
        struct CountResult {
            count: i64,
        }

        let count_stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT COUNT(*) as count FROM users",
            [],
        );
        let total = CountResult::find_by_statement(count_stmt)
            .one(&self.db)
            .await
            .map_err(persistence)?
            .map(|r| r.count as u64)
            .unwrap_or(0);

        Ok(UserPage {
            users: rows.into_iter().map(|r| r.into()).collect(),
            total,
        })
    }

    async fn update(&self, mut user: User, update: UpdateUser) -> UserResult<User> {
        user.apply_update(&update);

        let txn = self.db.begin().await.map_err(persistence)?;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
                UPDATE users
                SET first_name = $2, last_name = $3, email = $4, updated_at = $5
                WHERE id = $1
            "#,
            [
                user.id.into(),
                user.first_name.clone().into(),
                user.last_name.clone().into(),
                user.email.clone().into(),
                user.updated_at.into(),
            ],
        );

        let result = txn
            .execute_raw(stmt)
            .await
            .map_err(|e| map_db_err(e, &user.email))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound);
        }

        if let Some(address) = update.address {
            let stmt = Statement::from_sql_and_values(
                DbBackend::Postgres,
                r#"
                    INSERT INTO user_details (user_id, address)
                    VALUES ($1, $2)
                    ON CONFLICT (user_id) DO UPDATE SET address = EXCLUDED.address
                "#,
                [user.id.into(), address.clone().into()],
            );
            txn.execute_raw(stmt).await.map_err(persistence)?;
            user.set_address(address);
        }

        txn.commit().await.map_err(persistence)?;

        tracing::info!(user_id = %user.id, "Updated user");
        Ok(user)
    }

    async fn delete(&self, user: &User) -> UserResult<()> {
        // user_details rows are removed by the ON DELETE CASCADE constraint
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "DELETE FROM users WHERE id = $1",
            [user.id.into()],
        );

        let result = self.db.execute_raw(stmt).await.map_err(persistence)?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound);
        }

        tracing::info!(user_id = %user.id, "Deleted user");
        Ok(())
    }
}
