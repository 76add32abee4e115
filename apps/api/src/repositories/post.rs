//! PostgreSQL post repository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::utils::POST_COLUMNS;
use super::PostRepository;
use crate::error::{ApiError, ApiResult};
use crate::models::{Post, PostFields};

/// Repository for post database operations
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn find_by_id(&self, post_id: Uuid) -> ApiResult<Option<Post>> {
        let sql = format!("SELECT {} FROM posts WHERE id = $1", POST_COLUMNS);
        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn list(&self, limit: i64, offset: i64) -> ApiResult<Vec<Post>> {
        let sql = format!(
            "SELECT {} FROM posts ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
            POST_COLUMNS
        );
        let posts = sqlx::query_as::<_, Post>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    async fn count(&self) -> ApiResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn find_by_creator(&self, creator_id: Uuid) -> ApiResult<Vec<Post>> {
        let sql = format!(
            "SELECT {} FROM posts WHERE creator_id = $1 ORDER BY created_at DESC, id DESC",
            POST_COLUMNS
        );
        let posts = sqlx::query_as::<_, Post>(&sql)
            .bind(creator_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    async fn create(&self, creator_id: Uuid, fields: PostFields) -> ApiResult<Post> {
        let sql = format!(
            r#"
            INSERT INTO posts (creator_id, title, content, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            POST_COLUMNS
        );
        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(creator_id)
            .bind(&fields.title)
            .bind(&fields.content)
            .bind(&fields.image_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                    ApiError::not_found("user", creator_id.to_string())
                }
                _ => ApiError::Database(e),
            })?;
        Ok(post)
    }

    async fn update(&self, post_id: Uuid, fields: PostFields) -> ApiResult<Option<Post>> {
        let sql = format!(
            r#"
            UPDATE posts
            SET title = $2, content = $3, image_url = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            POST_COLUMNS
        );
        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(post_id)
            .bind(&fields.title)
            .bind(&fields.content)
            .bind(&fields.image_url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn delete(&self, post_id: Uuid) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
