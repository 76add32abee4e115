//! Domain models for Inkwell
//!
//! This module contains the storage representations for:
//! - Users and authentication claims
//! - Posts and their editable fields
//!
//! GraphQL projections live in `graphql::types`; nothing here is exposed to
//! clients directly.

pub mod post;
pub mod user;

pub use post::{Post, PostFields, PostPage};
pub use user::{Claims, IssuedToken, NewUser, User};
