//! Integration tests for the notification inbox.

mod helpers;

use http::StatusCode;

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_mark_viewed_exactly_once() {
    let app = helpers::TestApp::new().await;
    let user = app.signup("inbox@example.com", "password123").await;
    app.create_shipment(&user, "inbox@example.com").await;

    let unread = app
        .request("GET", "/ship/users/notifications", None, Some(&user))
        .await;
    let id = unread.body["data"][0]["id"].as_str().unwrap().to_string();

    let first = app
        .request(
            "PATCH",
            &format!("/ship/users/notifications/{id}"),
            None,
            Some(&user),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"]["viewed"], true);

    // The flag flips exactly once.
    let second = app
        .request(
            "PATCH",
            &format!("/ship/users/notifications/{id}"),
            None,
            Some(&user),
        )
        .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);

    // Viewed notifications leave the unread list.
    let after = app
        .request("GET", "/ship/users/notifications", None, Some(&user))
        .await;
    assert!(after.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_foreign_notification_looks_missing() {
    let app = helpers::TestApp::new().await;
    let owner = app.signup("inbox-owner@example.com", "password123").await;
    let stranger = app.signup("inbox-stranger@example.com", "password123").await;
    app.create_shipment(&owner, "inbox-owner@example.com").await;

    let unread = app
        .request("GET", "/ship/users/notifications", None, Some(&owner))
        .await;
    let id = unread.body["data"][0]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PATCH",
            &format!("/ship/users/notifications/{id}"),
            None,
            Some(&stranger),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_admin_notification_listing() {
    let app = helpers::TestApp::new().await;
    let user = app.signup("inbox2@example.com", "password123").await;
    app.create_shipment(&user, "inbox2@example.com").await;
    let admin = app.login(helpers::ADMIN_EMAIL, helpers::ADMIN_PASSWORD).await;

    let all = app
        .request("GET", "/ship/admin/notifications", None, Some(&admin))
        .await;
    assert_eq!(all.status, StatusCode::OK);
    let items = all.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["user_email"], "inbox2@example.com");
    assert_eq!(items[0]["shipment_status"], "PENDING");

    let forbidden = app
        .request("GET", "/ship/admin/notifications", None, Some(&user))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
}
