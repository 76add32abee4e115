//! Post service for Inkwell
//!
//! Creation, listing, lookup, replacement and deletion of posts. Mutations
//! take the acting user and enforce ownership through [`authorize`].

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{Post, PostFields, PostPage};
use crate::repositories::{PostRepository, UserRepository};
use crate::services::access::{authorize, Actor};

/// Post service
#[derive(Clone)]
pub struct PostService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
}

impl PostService {
    /// Create a new post service
    pub fn new(users: Arc<dyn UserRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { users, posts }
    }

    /// Create a post owned by `actor`
    ///
    /// Fields are stored exactly as given.
    ///
    /// # Errors
    /// - `ApiError::NotFound` if the acting user no longer exists
    pub async fn create(&self, actor: Actor, fields: PostFields) -> ApiResult<Post> {
        if self.users.find_by_id(actor.user_id).await?.is_none() {
            return Err(ApiError::not_found("user", actor.user_id.to_string()));
        }

        let post = self.posts.create(actor.user_id, fields).await?;

        tracing::info!(post_id = %post.id, user_id = %actor.user_id, "Post created");

        Ok(post)
    }

    /// One page of posts, newest first, with the overall total
    pub async fn list(&self, limit: i64, offset: i64) -> ApiResult<PostPage> {
        let posts = self.posts.list(limit, offset).await?;
        let total = self.posts.count().await?;
        Ok(PostPage { posts, total })
    }

    /// Get a post by ID
    ///
    /// # Errors
    /// - `ApiError::NotFound` if no such post exists
    pub async fn get(&self, post_id: Uuid) -> ApiResult<Post> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ApiError::not_found("post", post_id.to_string()))
    }

    /// All posts created by `user_id`, newest first
    pub async fn by_creator(&self, user_id: Uuid) -> ApiResult<Vec<Post>> {
        self.posts.find_by_creator(user_id).await
    }

    /// Replace a post's title, content and image
    ///
    /// # Errors
    /// - `ApiError::NotFound` if no such post exists
    /// - `ApiError::Forbidden` if `actor` is not the creator
    pub async fn update(&self, actor: Actor, post_id: Uuid, fields: PostFields) -> ApiResult<Post> {
        let post = self.get(post_id).await?;
        authorize(actor, &post)?;

        let post = self
            .posts
            .update(post_id, fields)
            .await?
            .ok_or_else(|| ApiError::not_found("post", post_id.to_string()))?;

        tracing::info!(post_id = %post.id, user_id = %actor.user_id, "Post updated");

        Ok(post)
    }

    /// Delete a post
    ///
    /// # Errors
    /// - `ApiError::NotFound` if no such post exists
    /// - `ApiError::Forbidden` if `actor` is not the creator
    pub async fn delete(&self, actor: Actor, post_id: Uuid) -> ApiResult<()> {
        let post = self.get(post_id).await?;
        authorize(actor, &post)?;

        if !self.posts.delete(post_id).await? {
            return Err(ApiError::not_found("post", post_id.to_string()));
        }

        tracing::info!(post_id = %post_id, user_id = %actor.user_id, "Post deleted");

        Ok(())
    }
}
