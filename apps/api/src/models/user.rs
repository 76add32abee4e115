//! User and authentication models for Inkwell
//!
//! This module contains the storage models for:
//! - User accounts
//! - JWT claims and issued bearer tokens

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status assigned to freshly registered users
pub const DEFAULT_STATUS: &str = "I am new!";

/// User account from the users table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,

    /// User's email address (unique, lower-cased)
    pub email: String,

    /// Display name
    pub name: String,

    /// Argon2 hashed password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Free-text status line
    pub status: String,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last profile update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,

    /// User's email
    pub email: String,

    /// Issued at timestamp (Unix epoch)
    pub iat: i64,

    /// Expiration timestamp (Unix epoch)
    pub exp: i64,

    /// Issuer
    #[serde(default = "default_issuer")]
    pub iss: String,

    /// Audience
    #[serde(default = "default_audience")]
    pub aud: String,
}

fn default_issuer() -> String {
    "inkwell".to_string()
}

fn default_audience() -> String {
    "inkwell".to_string()
}

impl Claims {
    /// Create new claims for a user
    pub fn new(user: &User, ttl_secs: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user.id,
            email: user.email.clone(),
            iat: now,
            exp: now + ttl_secs,
            iss: default_issuer(),
            aud: default_audience(),
        }
    }
}

/// A signed bearer token handed out at login
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    /// Encoded JWT
    pub token: String,

    /// User the token was issued for
    pub user_id: Uuid,

    /// Expiration timestamp
    pub expires_at: DateTime<Utc>,
}
