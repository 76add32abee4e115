//! Business logic services for Inkwell
//!
//! This module contains:
//! - Registration, login and token verification
//! - Post management with ownership checks
//! - Profile reads and status updates
//! - Health checks

pub mod access;
pub mod auth;
pub mod health;
pub mod post;
pub mod profile;
pub mod validation;

pub use access::{authorize, Actor, Owned};
pub use auth::{AuthConfig, AuthService};
pub use health::HealthService;
pub use post::PostService;
pub use profile::ProfileService;
