//! HTTP route handlers for the Inkwell API
//!
//! This module assembles the axum router:
//! - GraphQL endpoint and Playground
//! - Health check and status endpoints
//! - A JSON 404 for everything else

pub mod graphql;
pub mod health;

pub use health::{health_router, HealthState};

use axum::{
    extract::Extension,
    http::Uri,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::ApiError;
use crate::graphql::InkwellSchema;
use crate::repositories::Store;
use crate::services::AuthService;

/// Build the application router
pub fn build_router(
    schema: InkwellSchema,
    auth_service: AuthService,
    store: Store,
    cors_layer: CorsLayer,
) -> Router {
    Router::new()
        .route("/", get(root))
        // GraphQL endpoints
        .route("/graphql", post(graphql::graphql_handler))
        .route("/graphql/playground", get(graphql::graphql_playground))
        // Nested health routes: /health, /health/live, /health/ready
        .nest("/health", health_router(HealthState::new(store)))
        .fallback(not_found)
        .layer(Extension(schema))
        .layer(Extension(auth_service))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
}

async fn root() -> &'static str {
    "Welcome to Inkwell - GraphQL blogging API"
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found("route", uri.path())
}
