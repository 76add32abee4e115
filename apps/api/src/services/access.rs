//! Ownership checks
//!
//! Authentication is settled before a resolver runs (see
//! `graphql::guards::AuthGuard`); this module answers the remaining question
//! of whether the acting user may modify a given record.

use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{Claims, Post};

/// The verified identity performing an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
}

impl From<&Claims> for Actor {
    fn from(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
        }
    }
}

/// A record with exactly one owning user
pub trait Owned {
    /// Resource name used in error messages and logs
    const RESOURCE: &'static str;

    fn owner_id(&self) -> Uuid;

    fn resource_id(&self) -> Uuid;
}

impl Owned for Post {
    const RESOURCE: &'static str = "post";

    fn owner_id(&self) -> Uuid {
        self.creator_id
    }

    fn resource_id(&self) -> Uuid {
        self.id
    }
}

/// Allow the operation only if `actor` owns `resource`
///
/// # Errors
/// - `ApiError::Forbidden` when the owner is someone else
pub fn authorize<R: Owned>(actor: Actor, resource: &R) -> ApiResult<()> {
    if resource.owner_id() == actor.user_id {
        return Ok(());
    }

    tracing::warn!(
        user_id = %actor.user_id,
        owner_id = %resource.owner_id(),
        resource = R::RESOURCE,
        resource_id = %resource.resource_id(),
        "Ownership check failed"
    );
    Err(ApiError::Forbidden(format!(
        "{} {} belongs to another user",
        R::RESOURCE,
        resource.resource_id()
    )))
}
