//! GraphQL type definitions for Inkwell
//!
//! Object types wrap the storage models and decide what is exposed; the
//! password hash in particular never leaves the server.

mod auth;
mod post;
mod user;

pub use auth::{AuthData, TestData, UserData};
pub use post::{Post, PostData, PostInputData};
pub use user::User;

use async_graphql::ID;
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Parse a client-supplied ID
///
/// IDs that are not UUIDs cannot name any record, so they are reported as
/// not found rather than as invalid input.
pub fn parse_id(id: &ID, resource_type: &'static str) -> ApiResult<Uuid> {
    Uuid::parse_str(id.as_str()).map_err(|_| ApiError::not_found(resource_type, id.to_string()))
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ`
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
