//! GraphQL mutations for Inkwell
//!
//! This module contains all mutation resolvers, organized by domain.

mod auth;
mod post;
mod user;

pub use auth::AuthMutation;
pub use post::PostMutation;
pub use user::UserMutation;

use async_graphql::MergedObject;

/// Root mutation type combining all mutation domains
#[derive(MergedObject, Default)]
pub struct Mutation(AuthMutation, PostMutation, UserMutation);
