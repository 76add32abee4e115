//! Post mutations for Inkwell GraphQL API
//!
//! This module provides:
//! - createPost: Publish a post as the current user
//! - updatePost: Replace title, content and image of an owned post
//! - deletePost: Remove an owned post

use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::graphql::guards::{current_actor, AuthGuard};
use crate::graphql::types::{parse_id, Post, PostInputData};
use crate::services::PostService;

/// Post-related mutations
#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    /// Create a post owned by the current user
    #[graphql(guard = "AuthGuard")]
    async fn create_post(
        &self,
        ctx: &Context<'_>,
        post_input_data: PostInputData,
    ) -> Result<Post> {
        let actor = current_actor(ctx)?;
        let post = ctx
            .data::<PostService>()?
            .create(actor, post_input_data.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(Post::from(post))
    }

    /// Replace a post's fields
    ///
    /// # Errors
    /// - `NOT_FOUND` if the post does not exist
    /// - `FORBIDDEN` if the current user is not the creator
    /// - `INVALID_INPUT` with one entry per rejected field
    #[graphql(guard = "AuthGuard")]
    async fn update_post(
        &self,
        ctx: &Context<'_>,
        id: ID,
        post_input: PostInputData,
    ) -> Result<Post> {
        let actor = current_actor(ctx)?;
        let post_id = parse_id(&id, "post").map_err(|e| e.extend())?;
        let post = ctx
            .data::<PostService>()?
            .update(actor, post_id, post_input.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(Post::from(post))
    }

    /// Delete a post
    ///
    /// Returns true once the post is gone.
    #[graphql(guard = "AuthGuard")]
    async fn delete_post(&self, ctx: &Context<'_>, id: ID) -> Result<Option<bool>> {
        let actor = current_actor(ctx)?;
        let post_id = parse_id(&id, "post").map_err(|e| e.extend())?;
        ctx.data::<PostService>()?
            .delete(actor, post_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(Some(true))
    }
}
