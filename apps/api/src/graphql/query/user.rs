//! User queries for Inkwell GraphQL API
//!
//! - user: The currently authenticated user

use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::graphql::guards::{current_actor, AuthGuard};
use crate::graphql::types::User;
use crate::services::ProfileService;

/// User-related queries
#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Get the currently authenticated user
    ///
    /// # Errors
    /// - `NOT_FOUND` if the user no longer exists
    #[graphql(guard = "AuthGuard")]
    async fn user(&self, ctx: &Context<'_>) -> Result<User> {
        let actor = current_actor(ctx)?;
        let user = ctx
            .data::<ProfileService>()?
            .get(actor.user_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(User::from(user))
    }
}
