//! In-process store for development and tests
//!
//! [`MemoryStore`] implements both repository traits over one shared state so
//! that the same constraints hold as with PostgreSQL: emails are unique
//! (case-insensitive), posts must reference an existing user, and listings
//! are ordered newest first.
//!
//! # Lock Poisoning Recovery
//!
//! Locks are acquired with `unwrap_or_else(|e| e.into_inner())`. A panic while
//! holding the lock leaves the maps structurally intact, so later callers keep
//! using them instead of failing with a `PoisonError`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::utils::normalize_email;
use super::{PostRepository, UserRepository};
use crate::error::{ApiError, ApiResult};
use crate::models::user::DEFAULT_STATUS;
use crate::models::{NewUser, Post, PostFields, User};

#[derive(Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    /// Unique index: normalized email -> user id
    emails: HashMap<String, Uuid>,
    posts: HashMap<Uuid, Post>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl MemoryState {
    /// Current time, strictly later than any timestamp handed out before
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last_timestamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(next);
        next
    }
}

/// Shared in-memory user and post store
///
/// Clones share the same underlying state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, user_id: Uuid) -> ApiResult<Option<User>> {
        Ok(self.read().users.get(&user_id).cloned())
    }

    async fn find_many(&self, user_ids: &[Uuid]) -> ApiResult<HashMap<Uuid, User>> {
        let state = self.read();
        Ok(user_ids
            .iter()
            .filter_map(|id| state.users.get(id).map(|u| (*id, u.clone())))
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let state = self.read();
        Ok(state
            .emails
            .get(&normalize_email(email))
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> ApiResult<User> {
        let email = normalize_email(&new_user.email);
        let mut state = self.write();

        if state.emails.contains_key(&email) {
            return Err(ApiError::conflict("User", email));
        }

        let now = state.next_timestamp();
        let user = User {
            id: Uuid::new_v4(),
            email: email.clone(),
            name: new_user.name,
            password_hash: new_user.password_hash,
            status: DEFAULT_STATUS.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.emails.insert(email, user.id);
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_status(&self, user_id: Uuid, status: &str) -> ApiResult<Option<User>> {
        let mut state = self.write();
        let now = state.next_timestamp();
        Ok(state.users.get_mut(&user_id).map(|user| {
            user.status = status.to_string();
            user.updated_at = now;
            user.clone()
        }))
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, post_id: Uuid) -> ApiResult<Option<Post>> {
        Ok(self.read().posts.get(&post_id).cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> ApiResult<Vec<Post>> {
        let mut posts: Vec<Post> = self.read().posts.values().cloned().collect();
        newest_first(&mut posts);
        Ok(posts
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self) -> ApiResult<i64> {
        Ok(self.read().posts.len() as i64)
    }

    async fn find_by_creator(&self, creator_id: Uuid) -> ApiResult<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .read()
            .posts
            .values()
            .filter(|p| p.creator_id == creator_id)
            .cloned()
            .collect();
        newest_first(&mut posts);
        Ok(posts)
    }

    async fn create(&self, creator_id: Uuid, fields: PostFields) -> ApiResult<Post> {
        let mut state = self.write();

        if !state.users.contains_key(&creator_id) {
            return Err(ApiError::not_found("user", creator_id.to_string()));
        }

        let now = state.next_timestamp();
        let post = Post {
            id: Uuid::new_v4(),
            creator_id,
            title: fields.title,
            content: fields.content,
            image_url: fields.image_url,
            created_at: now,
            updated_at: now,
        };
        state.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post_id: Uuid, fields: PostFields) -> ApiResult<Option<Post>> {
        let mut state = self.write();
        let now = state.next_timestamp();
        Ok(state.posts.get_mut(&post_id).map(|post| {
            post.title = fields.title;
            post.content = fields.content;
            post.image_url = fields.image_url;
            post.updated_at = now;
            post.clone()
        }))
    }

    async fn delete(&self, post_id: Uuid) -> ApiResult<bool> {
        Ok(self.write().posts.remove(&post_id).is_some())
    }
}
