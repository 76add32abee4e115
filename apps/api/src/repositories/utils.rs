//! Shared utility functions for repositories

// ============================================================================
// SQL Column Constants
//
// These constants define the SELECT column lists for each entity type,
// reducing duplication and ensuring consistency across queries.
// ============================================================================

/// SQL columns for user queries
pub const USER_COLUMNS: &str = r#"
    id, email, name, password_hash, status,
    created_at, updated_at
"#;

/// SQL columns for post queries
pub const POST_COLUMNS: &str = r#"
    id, creator_id, title, content, image_url,
    created_at, updated_at
"#;

/// Normalize an email address for storage and lookup
///
/// Emails are compared case-insensitively and without surrounding whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
