//! Post GraphQL types

use async_graphql::{
    dataloader::DataLoader, Context, ErrorExtensions, InputObject, Object, Result, SimpleObject,
    ID,
};

use crate::error::ApiError;
use crate::graphql::loaders::UserLoader;
use crate::models::{Post as DbPost, PostFields};

use super::{iso_timestamp, User};

/// Blog post exposed via GraphQL
pub struct Post {
    inner: DbPost,
}

impl Post {
    pub fn new(post: DbPost) -> Self {
        Self { inner: post }
    }
}

impl From<DbPost> for Post {
    fn from(post: DbPost) -> Self {
        Self::new(post)
    }
}

#[Object]
impl Post {
    /// Unique post identifier
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.inner.id.to_string())
    }

    async fn title(&self) -> &str {
        &self.inner.title
    }

    async fn content(&self) -> &str {
        &self.inner.content
    }

    async fn image_url(&self) -> &str {
        &self.inner.image_url
    }

    /// Author of the post (uses DataLoader for batched fetching)
    async fn creator(&self, ctx: &Context<'_>) -> Result<User> {
        let loader = ctx.data::<DataLoader<UserLoader>>()?;
        let user = loader
            .load_one(self.inner.creator_id)
            .await
            .map_err(|e| e.as_ref().extend())?
            .ok_or_else(|| {
                ApiError::not_found("user", self.inner.creator_id.to_string()).extend()
            })?;
        Ok(User::from(user))
    }

    /// Creation time, ISO-8601 in UTC
    async fn created_at(&self) -> String {
        iso_timestamp(self.inner.created_at)
    }

    /// Last modification time, ISO-8601 in UTC
    async fn updated_at(&self) -> String {
        iso_timestamp(self.inner.updated_at)
    }
}

/// One page of posts
#[derive(SimpleObject)]
pub struct PostData {
    pub posts: Vec<Post>,
    /// Number of posts across all pages
    pub total_posts: i64,
}

/// Post creation and replacement input
#[derive(Debug, InputObject)]
pub struct PostInputData {
    pub title: String,
    pub content: String,
    pub image_url: String,
}

impl From<PostInputData> for PostFields {
    fn from(input: PostInputData) -> Self {
        Self {
            title: input.title,
            content: input.content,
            image_url: input.image_url,
        }
    }
}
