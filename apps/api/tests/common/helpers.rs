//! Test helper functions for API integration tests
//!
//! Every [`TestApp`] owns a fresh in-memory store, so tests never share
//! state and need no database.

#![allow(dead_code)]

use async_graphql::{Request, Variables};
use axum::Router;
use fake::{faker::internet::en::SafeEmail, Fake};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use inkwell_api::{build_router, build_schema, AuthConfig, AuthService, InkwellSchema, Store};

/// Secret used to sign tokens in tests
pub const TEST_JWT_SECRET: &str = "test-secret-that-is-at-least-32-chars";

/// Password accepted by the registration rules
pub const TEST_PASSWORD: &str = "hunter22";

/// Schema and services over a private in-memory store
#[derive(Clone)]
pub struct TestApp {
    pub schema: InkwellSchema,
    pub auth: AuthService,
    pub store: Store,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Store::in_memory();
        // Minimum Argon2 cost keeps hashing fast in tests
        let config = AuthConfig::new(TEST_JWT_SECRET.to_string())
            .with_hash_cost(argon2::Params::MIN_M_COST, 1);
        let auth = AuthService::new(store.users.clone(), config).expect("valid auth config");
        let schema = build_schema(store.clone(), auth.clone());
        Self {
            schema,
            auth,
            store,
        }
    }

    /// The full HTTP router over this app's services
    pub fn router(&self) -> Router {
        build_router(
            self.schema.clone(),
            self.auth.clone(),
            self.store.clone(),
            CorsLayer::permissive(),
        )
    }

    /// Execute a GraphQL document, authenticating with `token` if given
    ///
    /// Mirrors the HTTP handler: a token that fails verification leaves the
    /// request unauthenticated.
    pub async fn execute(&self, query: &str, variables: Value, token: Option<&str>) -> Value {
        let mut request = Request::new(query).variables(Variables::from_json(variables));
        if let Some(claims) = token.and_then(|t| self.auth.verify_access_token(t).ok()) {
            request = request.data(claims);
        }
        let response = self.schema.execute(request).await;
        serde_json::to_value(&response).expect("response serializes")
    }

    /// Register a user through the API and return its ID
    pub async fn register(&self, email: &str, password: &str) -> String {
        let response = self
            .execute(
                CREATE_USER,
                json!({ "input": { "email": email, "name": "Test Writer", "password": password } }),
                None,
            )
            .await;
        assert_no_errors(&response);
        response["data"]["createUser"]["_id"]
            .as_str()
            .expect("user id")
            .to_string()
    }

    /// Log in through the API and return the bearer token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .execute(
                LOGIN,
                json!({ "email": email, "password": password }),
                None,
            )
            .await;
        assert_no_errors(&response);
        response["data"]["login"]["token"]
            .as_str()
            .expect("token")
            .to_string()
    }

    /// Register a fresh user and return `(user_id, token)`
    pub async fn signed_in_user(&self) -> (String, String) {
        let email = fake_email();
        let user_id = self.register(&email, TEST_PASSWORD).await;
        let token = self.login(&email, TEST_PASSWORD).await;
        (user_id, token)
    }

    /// Create a post as the token's owner and return its ID
    pub async fn create_post(&self, token: &str, title: &str) -> String {
        let response = self
            .execute(
                CREATE_POST,
                json!({ "input": post_input(title) }),
                Some(token),
            )
            .await;
        assert_no_errors(&response);
        response["data"]["createPost"]["_id"]
            .as_str()
            .expect("post id")
            .to_string()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

pub const CREATE_USER: &str = r#"
    mutation CreateUser($input: UserData!) {
        createUser(userInput: $input) { _id email name status password }
    }
"#;

pub const LOGIN: &str = r#"
    query Login($email: String!, $password: String!) {
        login(email: $email, password: $password) { token userId }
    }
"#;

pub const CREATE_POST: &str = r#"
    mutation CreatePost($input: PostInputData!) {
        createPost(postInputData: $input) {
            _id title content imageUrl createdAt updatedAt
            creator { _id email }
        }
    }
"#;

/// A unique, well-formed email address
pub fn fake_email() -> String {
    let email: String = SafeEmail().fake();
    format!("{}.{}", uuid::Uuid::new_v4().simple(), email)
}

/// Post input with the given title
pub fn post_input(title: &str) -> Value {
    json!({
        "title": title,
        "content": "A post body.",
        "imageUrl": "images/cover.png",
    })
}

/// Panic with the error list if a response carries errors
pub fn assert_no_errors(response: &Value) {
    if let Some(errors) = response.get("errors") {
        panic!("unexpected GraphQL errors: {}", errors);
    }
}

/// Extensions of the first error in a response
pub fn first_error(response: &Value) -> &Value {
    &response["errors"][0]
}

/// `extensions.code` of the first error
pub fn error_code(response: &Value) -> &str {
    first_error(response)["extensions"]["code"]
        .as_str()
        .unwrap_or_default()
}

/// `extensions.status` of the first error
pub fn error_status(response: &Value) -> u64 {
    first_error(response)["extensions"]["status"]
        .as_u64()
        .unwrap_or_default()
}
