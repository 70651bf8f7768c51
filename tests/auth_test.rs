//! Integration tests for the authentication flow.

mod helpers;

use http::StatusCode;

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_signup_sets_auth_cookies() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/auth/signup",
            Some(serde_json::json!({
                "first_name": "Alice",
                "last_name": "Anderson",
                "email": "alice@example.com",
                "address": "1 Main Street",
                "telephone": "0123456789",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let cookies = helpers::extract_cookies(&response.headers);
    assert!(cookies.contains("access_token="));
    assert!(cookies.contains("refresh_token="));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_signup_duplicate_email_rejected() {
    let app = helpers::TestApp::new().await;
    app.signup("bob@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/auth/signup",
            Some(serde_json::json!({
                "first_name": "Bob",
                "last_name": "Builder",
                "email": "bob@example.com",
                "address": "2 Main Street",
                "telephone": "0123456789",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_login_wrong_password() {
    let app = helpers::TestApp::new().await;
    app.signup("carol@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "email": "carol@example.com",
                "password": "wrong-password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_login_unknown_email_same_error() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "email": "nobody@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    // Indistinguishable from a wrong password.
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid credentials");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_profile_roundtrip() {
    let app = helpers::TestApp::new().await;
    let cookies = app.signup("dave@example.com", "password123").await;

    let response = app
        .request("GET", "/auth/profile", None, Some(&cookies))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "dave@example.com");
    assert!(response.body["data"].get("password_hash").is_none());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_protected_route_requires_cookie() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/ship/users/shipments", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_garbage_access_cookie_rejected() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "GET",
            "/auth/profile",
            None,
            Some("access_token=not-a-jwt; refresh_token=not-a-jwt"),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
