//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::DomainError;
use crate::domain::user::{NewUser, User, UserId, UserRepository};

/// PostgreSQL implementation of UserRepository
///
/// Expects a `users` table with unique constraints on `email` and `username`;
/// those constraints are the authoritative duplicate-key signal.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_identity(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, username, email, password_hash, created_at
            FROM users
            WHERE email = $1 OR username = $2
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to look up user: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row))),
            None => Ok(None),
        }
    }

    async fn create(&self, new_user: NewUser) -> Result<User, DomainError> {
        let user = User::new(
            UserId::generate(),
            new_user.name,
            new_user.username,
            new_user.email,
            new_user.password_hash,
        );

        sqlx::query(
            r#"
            INSERT INTO users (id, name, username, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.name())
        .bind(user.username())
        .bind(user.email())
        .bind(user.password_hash())
        .bind(user.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                DomainError::conflict(format!(
                    "User with email '{}' or username '{}' already exists",
                    user.email(),
                    user.username()
                ))
            } else {
                DomainError::storage(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(user)
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> User {
    let id: String = row.get("id");
    let name: String = row.get("name");
    let username: String = row.get("username");
    let email: String = row.get("email");
    let password_hash: String = row.get("password_hash");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    User::new(UserId::new(id), name, username, email, password_hash).with_created_at(created_at)
}
