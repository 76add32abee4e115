//! Registration mutation
//!
//! - createUser: Create a new user account

use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::graphql::types::{User, UserData};
use crate::services::AuthService;

/// Authentication-related mutations
#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    /// Register a new user
    ///
    /// # Errors
    /// - `INVALID_INPUT` with one entry per rejected field
    /// - `CONFLICT` if the email is already registered
    async fn create_user(&self, ctx: &Context<'_>, user_input: UserData) -> Result<User> {
        let auth_service = ctx.data::<AuthService>()?;
        let user = auth_service
            .register(&user_input.email, &user_input.name, &user_input.password)
            .await
            .map_err(|e| e.extend())?;
        Ok(User::from(user))
    }
}
