//! Authentication guard for GraphQL resolvers
//!
//! The HTTP handler verifies the bearer token and, on success, inserts the
//! token's [`Claims`] into the request data. Resolvers that need a signed-in
//! user declare `#[graphql(guard = "AuthGuard")]`; the guard rejects the field
//! before the resolver body runs when no claims are present.

use async_graphql::{Context, ErrorExtensions, Guard};

use crate::error::ApiError;
use crate::models::Claims;
use crate::services::Actor;

/// Rejects requests without verified claims
///
/// # Example
///
/// ```ignore
/// #[Object]
/// impl PostMutation {
///     #[graphql(guard = "AuthGuard")]
///     async fn create_post(&self, ctx: &Context<'_>, post_input_data: PostInputData) -> Result<Post> {
///         // ...
///     }
/// }
/// ```
pub struct AuthGuard;

impl Guard for AuthGuard {
    async fn check(&self, ctx: &Context<'_>) -> async_graphql::Result<()> {
        if ctx.data_opt::<Claims>().is_some() {
            Ok(())
        } else {
            tracing::debug!("Rejected unauthenticated GraphQL field");
            Err(ApiError::Unauthorized.extend())
        }
    }
}

/// The acting user of the current request
pub fn current_actor(ctx: &Context<'_>) -> async_graphql::Result<Actor> {
    ctx.data_opt::<Claims>()
        .map(Actor::from)
        .ok_or_else(|| ApiError::Unauthorized.extend())
}
