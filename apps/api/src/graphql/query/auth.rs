//! Public queries: greeting and login
//!
//! - hello: Static test payload
//! - login: Exchange email and password for a bearer token

use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::graphql::types::{AuthData, TestData};
use crate::services::AuthService;

/// Queries that need no authentication
#[derive(Default)]
pub struct AuthQuery;

#[Object]
impl AuthQuery {
    /// Static payload for connectivity checks
    async fn hello(&self) -> TestData {
        TestData::default()
    }

    /// Authenticate with email and password
    ///
    /// # Errors
    /// - `INVALID_CREDENTIALS` for an unknown email or a wrong password
    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<Option<AuthData>> {
        let auth_service = ctx.data::<AuthService>()?;
        let (_, token) = auth_service
            .login(&email, &password)
            .await
            .map_err(|e| e.extend())?;
        Ok(Some(AuthData::from(token)))
    }
}
