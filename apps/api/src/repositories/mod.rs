//! Persistence layer for Inkwell
//!
//! Resolvers and services only see the [`UserRepository`] and
//! [`PostRepository`] traits. Two backends implement them:
//! - PostgreSQL via sqlx (`PgUserRepository`, `PgPostRepository`)
//! - an in-process store for development and tests (`MemoryStore`)
//!
//! Both backends enforce email uniqueness themselves and report violations as
//! `ApiError::Conflict`.

pub mod memory;
pub mod post;
pub mod user;
pub mod utils;

pub use memory::MemoryStore;
pub use post::PgPostRepository;
pub use user::PgUserRepository;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::{NewUser, Post, PostFields, User};

/// Storage operations on user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique ID
    async fn find_by_id(&self, user_id: Uuid) -> ApiResult<Option<User>>;

    /// Find several users at once, keyed by ID; unknown IDs are absent
    async fn find_many(&self, user_ids: &[Uuid]) -> ApiResult<HashMap<Uuid, User>>;

    /// Find a user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> ApiResult<Option<User>>;

    /// Insert a user; a taken email yields `ApiError::Conflict`
    async fn create(&self, new_user: NewUser) -> ApiResult<User>;

    /// Overwrite a user's status, returning the updated record
    async fn update_status(&self, user_id: Uuid, status: &str) -> ApiResult<Option<User>>;
}

/// Storage operations on posts
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by its unique ID
    async fn find_by_id(&self, post_id: Uuid) -> ApiResult<Option<Post>>;

    /// List posts newest first
    async fn list(&self, limit: i64, offset: i64) -> ApiResult<Vec<Post>>;

    /// Count all posts
    async fn count(&self) -> ApiResult<i64>;

    /// All posts created by a user, newest first
    async fn find_by_creator(&self, creator_id: Uuid) -> ApiResult<Vec<Post>>;

    /// Insert a post owned by `creator_id`
    async fn create(&self, creator_id: Uuid, fields: PostFields) -> ApiResult<Post>;

    /// Replace a post's editable fields, returning the updated record
    async fn update(&self, post_id: Uuid, fields: PostFields) -> ApiResult<Option<Post>>;

    /// Delete a post; returns whether a row was removed
    async fn delete(&self, post_id: Uuid) -> ApiResult<bool>;
}

#[derive(Clone)]
enum Backend {
    Postgres(PgPool),
    Memory,
}

/// Handle to both repositories of one backend
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    backend: Backend,
}

impl Store {
    /// Create a store backed by PostgreSQL
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            posts: Arc::new(PgPostRepository::new(pool.clone())),
            backend: Backend::Postgres(pool),
        }
    }

    /// Create an empty in-process store
    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self {
            users: Arc::new(store.clone()),
            posts: Arc::new(store),
            backend: Backend::Memory,
        }
    }

    /// Name of the backing store, for logs and health output
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory => "memory",
        }
    }

    /// Verify the backing store answers queries
    pub async fn ping(&self) -> ApiResult<()> {
        match &self.backend {
            Backend::Postgres(pool) => {
                sqlx::query_scalar::<_, i32>("SELECT 1")
                    .fetch_one(pool)
                    .await?;
                Ok(())
            }
            Backend::Memory => Ok(()),
        }
    }
}
