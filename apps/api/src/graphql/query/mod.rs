//! GraphQL queries for Inkwell
//!
//! This module contains all query resolvers, organized by domain.

mod auth;
mod post;
mod user;

pub use auth::AuthQuery;
pub use post::PostQuery;
pub use user::UserQuery;

use async_graphql::MergedObject;

/// Root query type combining all query domains
#[derive(MergedObject, Default)]
pub struct Query(AuthQuery, PostQuery, UserQuery);
