//! Post models for Inkwell

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Post from the posts table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    /// Unique post identifier
    pub id: Uuid,

    /// User who created the post (immutable)
    pub creator_id: Uuid,

    pub title: String,

    pub content: String,

    /// Reference to the post's image
    pub image_url: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// The caller-editable part of a post
///
/// Updates replace all three fields at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub content: String,
    pub image_url: String,
}

/// One page of posts plus the total across all pages
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total: i64,
}
