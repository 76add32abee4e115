//! GraphQL guards for the Inkwell API

mod auth;

pub use auth::{current_actor, AuthGuard};
