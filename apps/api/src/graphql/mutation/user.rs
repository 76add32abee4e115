//! Profile mutations
//!
//! - updateStatus: Overwrite the current user's status line

use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::graphql::guards::{current_actor, AuthGuard};
use crate::graphql::types::User;
use crate::services::ProfileService;

/// User-related mutations
#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Set the current user's status
    #[graphql(guard = "AuthGuard")]
    async fn update_status(&self, ctx: &Context<'_>, status: String) -> Result<User> {
        let actor = current_actor(ctx)?;
        let user = ctx
            .data::<ProfileService>()?
            .update_status(actor.user_id, &status)
            .await
            .map_err(|e| e.extend())?;
        Ok(User::from(user))
    }
}
