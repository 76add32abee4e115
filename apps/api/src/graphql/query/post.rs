//! Post queries for Inkwell GraphQL API
//!
//! - posts: Paginated listing, newest first
//! - post: A single post by ID

use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::graphql::guards::AuthGuard;
use crate::graphql::pagination::{page_window, DEFAULT_PER_PAGE};
use crate::graphql::types::{parse_id, Post, PostData};
use crate::services::PostService;

/// Post-related queries
#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    /// List posts newest first
    ///
    /// `perPage` is capped at 100. `totalPosts` counts every post, not just
    /// this page.
    #[graphql(guard = "AuthGuard")]
    async fn posts(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 1)] page: i32,
        #[graphql(default_with = "DEFAULT_PER_PAGE")] per_page: i32,
    ) -> Result<PostData> {
        let (limit, offset) = page_window(page, per_page).map_err(|e| e.extend())?;
        let page = ctx
            .data::<PostService>()?
            .list(limit, offset)
            .await
            .map_err(|e| e.extend())?;

        Ok(PostData {
            posts: page.posts.into_iter().map(Post::from).collect(),
            total_posts: page.total,
        })
    }

    /// Get a post by ID
    #[graphql(guard = "AuthGuard")]
    async fn post(&self, ctx: &Context<'_>, id: ID) -> Result<Post> {
        let post_id = parse_id(&id, "post").map_err(|e| e.extend())?;
        let post = ctx
            .data::<PostService>()?
            .get(post_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(Post::from(post))
    }
}
