//! DataLoader implementations for GraphQL
//!
//! Loaders batch relationship lookups to avoid one store query per parent
//! object.

mod user;

pub use user::UserLoader;
