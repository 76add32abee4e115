//! Inkwell API library
//!
//! This module exposes the core API components for use in integration tests
//! and as a library.

pub mod config;
pub mod error;
pub mod graphql;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use graphql::{build_schema, InkwellSchema};
pub use repositories::Store;
pub use routes::build_router;
pub use services::{AuthConfig, AuthService};
