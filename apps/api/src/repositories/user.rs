//! PostgreSQL user repository
//!
//! Email uniqueness is enforced by the `users_email_key` unique index; the
//! insert relies on it instead of checking first.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::utils::{normalize_email, USER_COLUMNS};
use super::UserRepository;
use crate::error::{ApiError, ApiResult};
use crate::models::user::DEFAULT_STATUS;
use crate::models::{NewUser, User};

/// Repository for user database operations
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, user_id: Uuid) -> ApiResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_many(&self, user_ids: &[Uuid]) -> ApiResult<HashMap<Uuid, User>> {
        let sql = format!("SELECT {} FROM users WHERE id = ANY($1)", USER_COLUMNS);
        let users: Vec<User> = sqlx::query_as(&sql)
            .bind(user_ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }

    async fn find_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create(&self, new_user: NewUser) -> ApiResult<User> {
        let email = normalize_email(&new_user.email);
        let sql = format!(
            r#"
            INSERT INTO users (email, name, password_hash, status)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(&email)
            .bind(&new_user.name)
            .bind(&new_user.password_hash)
            .bind(DEFAULT_STATUS)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    ApiError::conflict("User", email.clone())
                }
                _ => ApiError::Database(e),
            })
    }

    async fn update_status(&self, user_id: Uuid, status: &str) -> ApiResult<Option<User>> {
        let sql = format!(
            r#"
            UPDATE users
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}
