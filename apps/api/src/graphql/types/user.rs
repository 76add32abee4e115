//! User GraphQL type

use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::models::User as DbUser;
use crate::services::PostService;

use super::Post;

/// User account information exposed via GraphQL
pub struct User {
    inner: DbUser,
}

impl User {
    /// Create a new GraphQL User from a stored User
    pub fn new(user: DbUser) -> Self {
        Self { inner: user }
    }
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        Self::new(user)
    }
}

#[Object]
impl User {
    /// Unique user identifier
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.inner.id.to_string())
    }

    /// User's email address
    async fn email(&self) -> &str {
        &self.inner.email
    }

    /// Display name
    async fn name(&self) -> &str {
        &self.inner.name
    }

    /// Always null
    #[graphql(deprecation = "Password hashes are never exposed")]
    async fn password(&self) -> Option<String> {
        None
    }

    /// Free-text status line
    async fn status(&self) -> &str {
        &self.inner.status
    }

    /// Posts created by this user, newest first
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let posts = ctx
            .data::<PostService>()?
            .by_creator(self.inner.id)
            .await
            .map_err(|e| e.extend())?;
        Ok(posts.into_iter().map(Post::from).collect())
    }
}
