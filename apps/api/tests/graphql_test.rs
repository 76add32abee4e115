//! Integration tests for the GraphQL API
//!
//! Runs documents directly against the schema over an in-memory store:
//! - Registration validation and duplicate emails
//! - Login and token contents
//! - Authentication gate on protected fields
//! - Post CRUD, ownership and pagination
//! - Profile status updates

mod common;

use common::*;
use inkwell_api::models::user::DEFAULT_STATUS;
use rstest::rstest;
use serde_json::json;

const POSTS: &str = r#"
    query Posts($page: Int!, $perPage: Int!) {
        posts(page: $page, perPage: $perPage) {
            totalPosts
            posts { _id title creator { _id } }
        }
    }
"#;

const POST: &str = r#"
    query Post($id: ID!) {
        post(id: $id) { _id title content imageUrl updatedAt creator { _id } }
    }
"#;

const UPDATE_POST: &str = r#"
    mutation UpdatePost($id: ID!, $input: PostInputData!) {
        updatePost(id: $id, postInput: $input) { _id title updatedAt }
    }
"#;

const DELETE_POST: &str = r#"
    mutation DeletePost($id: ID!) {
        deletePost(id: $id)
    }
"#;

const ME: &str = r#"
    query Me {
        user { _id email status posts { _id title } }
    }
"#;

const UPDATE_STATUS: &str = r#"
    mutation UpdateStatus($status: String!) {
        updateStatus(status: $status) { _id status }
    }
"#;

// ========== hello ==========

#[tokio::test]
async fn test_hello_needs_no_token() {
    let app = TestApp::new();
    let response = app.execute("{ hello { text views } }", json!({}), None).await;
    assert_no_errors(&response);
    assert_eq!(response["data"]["hello"]["text"], "hello world");
    assert_eq!(response["data"]["hello"]["views"], 12345);
}

// ========== Registration ==========

#[tokio::test]
async fn test_register_returns_public_projection() {
    let app = TestApp::new();
    let email = fake_email();
    let response = app
        .execute(
            CREATE_USER,
            json!({ "input": { "email": email.to_uppercase(), "name": "Ada", "password": TEST_PASSWORD } }),
            None,
        )
        .await;

    assert_no_errors(&response);
    let user = &response["data"]["createUser"];
    assert_eq!(user["email"], email.to_lowercase());
    assert_eq!(user["name"], "Ada");
    assert_eq!(user["status"], DEFAULT_STATUS);
    assert!(user["password"].is_null());
}

#[tokio::test]
async fn test_malformed_email_is_rejected_and_not_persisted() {
    let app = TestApp::new();
    let response = app
        .execute(
            CREATE_USER,
            json!({ "input": { "email": "not-an-email", "name": "Ada", "password": TEST_PASSWORD } }),
            None,
        )
        .await;

    assert_eq!(error_code(&response), "INVALID_INPUT");
    assert_eq!(error_status(&response), 422);
    assert_eq!(first_error(&response)["message"], "Invalid Input");
    let data = first_error(&response)["extensions"]["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["field"], "email");

    assert!(app
        .store
        .users
        .find_by_email("not-an-email")
        .await
        .unwrap()
        .is_none());
}

#[rstest]
#[case("")]
#[case("abcd")]
#[tokio::test]
async fn test_short_password_is_rejected(#[case] password: &str) {
    let app = TestApp::new();
    let response = app
        .execute(
            CREATE_USER,
            json!({ "input": { "email": fake_email(), "name": "Ada", "password": password } }),
            None,
        )
        .await;

    assert_eq!(error_status(&response), 422);
    let data = first_error(&response)["extensions"]["data"].as_array().unwrap();
    assert_eq!(data[0]["field"], "password");
}

#[tokio::test]
async fn test_validation_messages_accumulate() {
    let app = TestApp::new();
    let response = app
        .execute(
            CREATE_USER,
            json!({ "input": { "email": "nope", "name": "Ada", "password": "123" } }),
            None,
        )
        .await;

    let data = first_error(&response)["extensions"]["data"].as_array().unwrap();
    let fields: Vec<_> = data.iter().map(|e| e["field"].as_str().unwrap()).collect();
    assert_eq!(fields, vec!["email", "password"]);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = TestApp::new();
    let email = fake_email();
    app.register(&email, TEST_PASSWORD).await;

    let response = app
        .execute(
            CREATE_USER,
            json!({ "input": { "email": email.to_uppercase(), "name": "Copy", "password": TEST_PASSWORD } }),
            None,
        )
        .await;

    assert_eq!(error_code(&response), "CONFLICT");
    assert_eq!(error_status(&response), 409);
    assert_eq!(first_error(&response)["message"], "User exists already");
}

// ========== Login ==========

#[tokio::test]
async fn test_login_token_binds_user_for_one_hour() {
    let app = TestApp::new();
    let email = fake_email();
    let user_id = app.register(&email, TEST_PASSWORD).await;

    let response = app
        .execute(
            LOGIN,
            json!({ "email": email, "password": TEST_PASSWORD }),
            None,
        )
        .await;
    assert_no_errors(&response);
    assert_eq!(response["data"]["login"]["userId"], user_id.as_str());

    let token = response["data"]["login"]["token"].as_str().unwrap();
    let claims = app.auth.verify_access_token(token).unwrap();
    assert_eq!(claims.sub.to_string(), user_id);
    assert_eq!(claims.email, email.to_lowercase());
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = TestApp::new();
    let email = fake_email();
    app.register(&email, TEST_PASSWORD).await;

    let response = app
        .execute(
            LOGIN,
            json!({ "email": email, "password": "wrong-password" }),
            None,
        )
        .await;

    assert_eq!(error_status(&response), 401);
    assert_eq!(first_error(&response)["message"], "Password Incorrect");
    assert!(response["data"]["login"].is_null());
}

#[tokio::test]
async fn test_login_with_unknown_email() {
    let app = TestApp::new();
    let response = app
        .execute(
            LOGIN,
            json!({ "email": fake_email(), "password": TEST_PASSWORD }),
            None,
        )
        .await;

    assert_eq!(error_code(&response), "INVALID_CREDENTIALS");
    assert_eq!(first_error(&response)["message"], "User not found.");
}

// ========== Authentication gate ==========

#[rstest]
#[case(ME, json!({}))]
#[case(POSTS, json!({ "page": 1, "perPage": 2 }))]
#[case(UPDATE_STATUS, json!({ "status": "hi" }))]
#[case(CREATE_POST, json!({ "input": post_input("Anonymous post") }))]
#[tokio::test]
async fn test_protected_fields_require_token(
    #[case] query: &str,
    #[case] variables: serde_json::Value,
) {
    let app = TestApp::new();
    let response = app.execute(query, variables, None).await;
    assert_eq!(error_code(&response), "UNAUTHENTICATED");
    assert_eq!(error_status(&response), 401);
}

#[tokio::test]
async fn test_forged_token_is_unauthenticated() {
    let app = TestApp::new();
    let response = app.execute(ME, json!({}), Some("not.a.jwt")).await;
    assert_eq!(error_code(&response), "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_unauthenticated_create_persists_nothing() {
    let app = TestApp::new();
    app.execute(
        CREATE_POST,
        json!({ "input": post_input("Anonymous post") }),
        None,
    )
    .await;
    assert_eq!(app.store.posts.count().await.unwrap(), 0);
}

// ========== Posts ==========

#[tokio::test]
async fn test_create_post_exposes_iso_timestamps_and_creator() {
    let app = TestApp::new();
    let (user_id, token) = app.signed_in_user().await;

    let response = app
        .execute(
            CREATE_POST,
            json!({ "input": post_input("First post") }),
            Some(&token),
        )
        .await;
    assert_no_errors(&response);

    let post = &response["data"]["createPost"];
    assert_eq!(post["title"], "First post");
    assert_eq!(post["imageUrl"], "images/cover.png");
    assert_eq!(post["creator"]["_id"], user_id.as_str());

    let created_at = post["createdAt"].as_str().unwrap();
    assert_eq!(created_at.len(), "2024-01-01T00:00:00.000Z".len());
    assert!(created_at.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
}

#[tokio::test]
async fn test_create_post_stores_input_verbatim() {
    let app = TestApp::new();
    let (_, token) = app.signed_in_user().await;

    let response = app
        .execute(
            CREATE_POST,
            json!({ "input": { "title": "Hi", "content": "ok", "imageUrl": "images/a.png" } }),
            Some(&token),
        )
        .await;
    assert_no_errors(&response);
    let post_id = response["data"]["createPost"]["_id"].as_str().unwrap();

    let response = app.execute(POST, json!({ "id": post_id }), Some(&token)).await;
    assert_no_errors(&response);
    let post = &response["data"]["post"];
    assert_eq!(post["title"], "Hi");
    assert_eq!(post["content"], "ok");
    assert_eq!(post["imageUrl"], "images/a.png");

    let response = app
        .execute(
            UPDATE_POST,
            json!({ "id": post_id, "input": { "title": "  Yo ", "content": "", "imageUrl": "" } }),
            Some(&token),
        )
        .await;
    assert_no_errors(&response);
    assert_eq!(response["data"]["updatePost"]["title"], "  Yo ");
}

#[tokio::test]
async fn test_posts_are_paged_newest_first() {
    let app = TestApp::new();
    let (_, token) = app.signed_in_user().await;
    for title in ["Post one", "Post two", "Post three"] {
        app.create_post(&token, title).await;
    }

    let response = app
        .execute(POSTS, json!({ "page": 1, "perPage": 2 }), Some(&token))
        .await;
    assert_no_errors(&response);
    let data = &response["data"]["posts"];
    assert_eq!(data["totalPosts"], 3);
    let titles: Vec<_> = data["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Post three", "Post two"]);

    let response = app
        .execute(POSTS, json!({ "page": 2, "perPage": 2 }), Some(&token))
        .await;
    let posts = response["data"]["posts"]["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["title"], "Post one");
    assert_eq!(response["data"]["posts"]["totalPosts"], 3);
}

#[tokio::test]
async fn test_posts_offset_uses_requested_page_size() {
    let app = TestApp::new();
    let (_, token) = app.signed_in_user().await;
    for i in 0..130 {
        app.create_post(&token, &format!("Post {i}")).await;
    }

    let response = app
        .execute(POSTS, json!({ "page": 2, "perPage": 120 }), Some(&token))
        .await;
    assert_no_errors(&response);
    let posts = response["data"]["posts"]["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 10);
    assert_eq!(posts[0]["title"], "Post 9");
    assert_eq!(response["data"]["posts"]["totalPosts"], 130);

    let response = app
        .execute(POSTS, json!({ "page": 1, "perPage": 120 }), Some(&token))
        .await;
    assert_eq!(response["data"]["posts"]["posts"].as_array().unwrap().len(), 100);
}

#[rstest]
#[case(0, 2)]
#[case(1, 0)]
#[case(-3, -1)]
#[tokio::test]
async fn test_posts_rejects_non_positive_paging(#[case] page: i32, #[case] per_page: i32) {
    let app = TestApp::new();
    let (_, token) = app.signed_in_user().await;
    let response = app
        .execute(POSTS, json!({ "page": page, "perPage": per_page }), Some(&token))
        .await;
    assert_eq!(error_code(&response), "INVALID_INPUT");
}

#[tokio::test]
async fn test_posts_default_arguments() {
    let app = TestApp::new();
    let (_, token) = app.signed_in_user().await;
    for title in ["Post one", "Post two", "Post three"] {
        app.create_post(&token, title).await;
    }

    let response = app
        .execute("{ posts { totalPosts posts { title } } }", json!({}), Some(&token))
        .await;
    assert_no_errors(&response);
    assert_eq!(response["data"]["posts"]["posts"].as_array().unwrap().len(), 2);
}

#[rstest]
#[case("00000000-0000-0000-0000-000000000000")]
#[case("not-a-uuid")]
#[tokio::test]
async fn test_unknown_post_is_not_found(#[case] id: &str) {
    let app = TestApp::new();
    let (_, token) = app.signed_in_user().await;
    let response = app.execute(POST, json!({ "id": id }), Some(&token)).await;
    assert_eq!(error_code(&response), "NOT_FOUND");
    assert_eq!(error_status(&response), 404);
}

#[tokio::test]
async fn test_owner_updates_post() {
    let app = TestApp::new();
    let (_, token) = app.signed_in_user().await;
    let post_id = app.create_post(&token, "Before edit").await;

    let response = app
        .execute(
            UPDATE_POST,
            json!({ "id": post_id, "input": post_input("After edit") }),
            Some(&token),
        )
        .await;
    assert_no_errors(&response);
    assert_eq!(response["data"]["updatePost"]["title"], "After edit");

    let stored = app
        .store
        .posts
        .find_by_id(post_id.parse().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.title, "After edit");
    assert!(stored.updated_at > stored.created_at);
}

#[tokio::test]
async fn test_only_creator_may_update_or_delete() {
    let app = TestApp::new();
    let (_, owner_token) = app.signed_in_user().await;
    let (_, other_token) = app.signed_in_user().await;
    let post_id = app.create_post(&owner_token, "Owned post").await;

    let response = app
        .execute(
            UPDATE_POST,
            json!({ "id": post_id, "input": post_input("Hijacked") }),
            Some(&other_token),
        )
        .await;
    assert_eq!(error_code(&response), "FORBIDDEN");
    assert_eq!(error_status(&response), 403);

    let response = app
        .execute(DELETE_POST, json!({ "id": post_id }), Some(&other_token))
        .await;
    assert_eq!(error_status(&response), 403);

    let response = app
        .execute(POST, json!({ "id": post_id }), Some(&owner_token))
        .await;
    assert_no_errors(&response);
    assert_eq!(response["data"]["post"]["title"], "Owned post");
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() {
    let app = TestApp::new();
    let (_, token) = app.signed_in_user().await;
    let response = app
        .execute(
            UPDATE_POST,
            json!({ "id": uuid::Uuid::new_v4().to_string(), "input": post_input("Whatever") }),
            Some(&token),
        )
        .await;
    assert_eq!(error_code(&response), "NOT_FOUND");
}

#[tokio::test]
async fn test_delete_removes_post_everywhere() {
    let app = TestApp::new();
    let (_, token) = app.signed_in_user().await;
    let kept = app.create_post(&token, "Kept post").await;
    let doomed = app.create_post(&token, "Doomed post").await;

    let response = app
        .execute(DELETE_POST, json!({ "id": doomed }), Some(&token))
        .await;
    assert_no_errors(&response);
    assert_eq!(response["data"]["deletePost"], true);

    let response = app.execute(POST, json!({ "id": doomed }), Some(&token)).await;
    assert_eq!(error_status(&response), 404);

    let response = app.execute(ME, json!({}), Some(&token)).await;
    let ids: Vec<_> = response["data"]["user"]["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["_id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec![kept]);

    let response = app
        .execute(DELETE_POST, json!({ "id": doomed }), Some(&token))
        .await;
    assert_eq!(error_status(&response), 404);
}

// ========== Profile ==========

#[tokio::test]
async fn test_user_lists_own_posts_newest_first() {
    let app = TestApp::new();
    let (user_id, token) = app.signed_in_user().await;
    let (_, other_token) = app.signed_in_user().await;
    app.create_post(&token, "Mine first").await;
    app.create_post(&other_token, "Not mine").await;
    app.create_post(&token, "Mine second").await;

    let response = app.execute(ME, json!({}), Some(&token)).await;
    assert_no_errors(&response);
    let user = &response["data"]["user"];
    assert_eq!(user["_id"], user_id.as_str());
    assert_eq!(user["status"], DEFAULT_STATUS);
    let titles: Vec<_> = user["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Mine second", "Mine first"]);
}

#[tokio::test]
async fn test_update_status() {
    let app = TestApp::new();
    let (user_id, token) = app.signed_in_user().await;

    let response = app
        .execute(UPDATE_STATUS, json!({ "status": "Drafting" }), Some(&token))
        .await;
    assert_no_errors(&response);
    assert_eq!(response["data"]["updateStatus"]["_id"], user_id.as_str());
    assert_eq!(response["data"]["updateStatus"]["status"], "Drafting");

    let response = app.execute(ME, json!({}), Some(&token)).await;
    assert_eq!(response["data"]["user"]["status"], "Drafting");
}

#[tokio::test]
async fn test_token_for_vanished_user_is_not_found() {
    // Same secret, different store: the token verifies but names nobody here
    let issuer = TestApp::new();
    let (_, token) = issuer.signed_in_user().await;

    let app = TestApp::new();
    let response = app.execute(ME, json!({}), Some(&token)).await;
    assert_eq!(error_code(&response), "NOT_FOUND");
}
