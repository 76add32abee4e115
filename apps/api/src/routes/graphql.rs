//! GraphQL HTTP endpoints
//!
//! - `POST /graphql` - execute a GraphQL request
//! - `GET /graphql/playground` - GraphQL Playground

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::Extension,
    http::{header, HeaderMap},
    response::{Html, IntoResponse},
};

use crate::graphql::InkwellSchema;
use crate::services::AuthService;

/// Extract bearer token from Authorization header (case-insensitive)
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;

    // Reject malformed values like "Bearer <token> <extra>"
    if parts.next().is_some() {
        return None;
    }

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

/// GraphQL handler that executes queries against the schema
///
/// A valid bearer token puts its Claims into the GraphQL context. A missing
/// or unverifiable token is not an error here: the request simply runs
/// unauthenticated and guarded fields reject it.
pub async fn graphql_handler(
    Extension(schema): Extension<InkwellSchema>,
    Extension(auth_service): Extension<AuthService>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    if let Some(token) = extract_bearer_token(&headers) {
        match auth_service.verify_access_token(token) {
            Ok(claims) => {
                tracing::debug!(user_id = %claims.sub, "GraphQL request authenticated");
                request = request.data(claims);
            }
            Err(e) => {
                tracing::debug!(error = %e, "GraphQL auth token verification failed");
            }
        }
    }

    schema.execute(request).await.into()
}

/// GraphQL Playground handler for development
pub async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
