//! GraphQL schema and resolvers for Inkwell
//!
//! This module contains the async-graphql schema including:
//! - Query resolvers for posts, the current user and login
//! - Mutation resolvers for registration, posts and status
//! - Type definitions for all GraphQL objects
//! - The authentication guard and the user DataLoader

pub mod guards;
pub mod loaders;
pub mod mutation;
pub mod pagination;
pub mod query;
pub mod schema;
pub mod types;

pub use schema::{build_schema, InkwellSchema, SchemaBuilder};
