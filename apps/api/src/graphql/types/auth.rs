//! Authentication and greeting GraphQL types

use async_graphql::{InputObject, SimpleObject};

use crate::models::IssuedToken;

/// Result of a successful login
#[derive(Debug, Clone, SimpleObject)]
pub struct AuthData {
    /// Signed bearer token
    pub token: String,
    /// ID of the authenticated user
    pub user_id: String,
}

impl From<IssuedToken> for AuthData {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            user_id: issued.user_id.to_string(),
        }
    }
}

/// Static payload of the `hello` query
#[derive(Debug, Clone, SimpleObject)]
pub struct TestData {
    pub text: String,
    pub views: i32,
}

impl Default for TestData {
    fn default() -> Self {
        Self {
            text: "hello world".to_string(),
            views: 12345,
        }
    }
}

/// Registration input
#[derive(Debug, InputObject)]
pub struct UserData {
    pub email: String,
    pub name: String,
    pub password: String,
}
