//! Integration tests for the shipment lifecycle.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_create_shipment_pending_with_notification() {
    let app = helpers::TestApp::new().await;
    let cookies = app.signup("sender@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/ship/shipments",
            Some(json!({
                "user_email": "sender@example.com",
                "sender_address": "1 Sender Street",
                "receiver_first_name": "Ricky",
                "receiver_last_name": "Receiver",
                "receiver_address": "2 Receiver Road",
                "receiver_telephone": "0987654321",
                "weight": 2.5,
            })),
            Some(&cookies),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = &response.body["data"];
    assert_eq!(data["status"], "PENDING");
    assert_eq!(data["weight"], 2.5);
    assert!(data["placed_date"].is_string());
    assert!(data["collected_date"].is_null());
    assert_eq!(data["request_cancel"], false);
    assert_eq!(data["delay_flag"], false);

    let unread = app
        .request("GET", "/ship/users/notifications", None, Some(&cookies))
        .await;
    assert_eq!(unread.status, StatusCode::OK);
    let items = unread.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Shipment Created");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_create_for_another_user_forbidden() {
    let app = helpers::TestApp::new().await;
    let cookies = app.signup("one@example.com", "password123").await;
    app.signup("two@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/ship/shipments",
            Some(json!({
                "user_email": "two@example.com",
                "sender_address": "1 Sender Street",
                "receiver_first_name": "Ricky",
                "receiver_last_name": "Receiver",
                "receiver_address": "2 Receiver Road",
                "receiver_telephone": "0987654321",
                "weight": 1.0,
            })),
            Some(&cookies),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_admin_transition_then_noop_rejected() {
    let app = helpers::TestApp::new().await;
    let user = app.signup("owner@example.com", "password123").await;
    let shipping_id = app.create_shipment(&user, "owner@example.com").await;
    let admin = app.login(helpers::ADMIN_EMAIL, helpers::ADMIN_PASSWORD).await;

    let uri = format!("/ship/admin/shipments/status/{shipping_id}");
    let response = app
        .request(
            "PATCH",
            &uri,
            Some(json!({ "status": "ON_ROUTE_TO_COLLECT" })),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ON_ROUTE_TO_COLLECT");

    // Retrying the same transition is a no-op and is rejected.
    let retry = app
        .request(
            "PATCH",
            &uri,
            Some(json!({ "status": "ON_ROUTE_TO_COLLECT" })),
            Some(&admin),
        )
        .await;
    assert_eq!(retry.status, StatusCode::BAD_REQUEST);

    // One creation notification + one status notification.
    let unread = app
        .request("GET", "/ship/users/notifications", None, Some(&user))
        .await;
    assert_eq!(unread.body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_skipping_transition_rejected_and_state_unchanged() {
    let app = helpers::TestApp::new().await;
    let user = app.signup("owner2@example.com", "password123").await;
    let shipping_id = app.create_shipment(&user, "owner2@example.com").await;
    let admin = app.login(helpers::ADMIN_EMAIL, helpers::ADMIN_PASSWORD).await;

    let response = app
        .request(
            "PATCH",
            &format!("/ship/admin/shipments/status/{shipping_id}"),
            Some(json!({ "status": "SHIPPED" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let detail = app
        .request(
            "GET",
            &format!("/ship/users/shipments/{shipping_id}"),
            None,
            Some(&user),
        )
        .await;
    assert_eq!(detail.body["data"]["status"], "PENDING");
    assert!(detail.body["data"]["shipped_date"].is_null());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_unknown_status_literal_rejected() {
    let app = helpers::TestApp::new().await;
    let user = app.signup("owner3@example.com", "password123").await;
    let shipping_id = app.create_shipment(&user, "owner3@example.com").await;
    let admin = app.login(helpers::ADMIN_EMAIL, helpers::ADMIN_PASSWORD).await;

    let response = app
        .request(
            "PATCH",
            &format!("/ship/admin/shipments/status/{shipping_id}"),
            Some(json!({ "status": "TELEPORTED" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_non_admin_cannot_transition() {
    let app = helpers::TestApp::new().await;
    let user = app.signup("owner4@example.com", "password123").await;
    let shipping_id = app.create_shipment(&user, "owner4@example.com").await;

    let response = app
        .request(
            "PATCH",
            &format!("/ship/admin/shipments/status/{shipping_id}"),
            Some(json!({ "status": "ON_ROUTE_TO_COLLECT" })),
            Some(&user),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let detail = app
        .request(
            "GET",
            &format!("/ship/users/shipments/{shipping_id}"),
            None,
            Some(&user),
        )
        .await;
    assert_eq!(detail.body["data"]["status"], "PENDING");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_full_chain_and_terminal_absorption() {
    let app = helpers::TestApp::new().await;
    let user = app.signup("owner5@example.com", "password123").await;
    let shipping_id = app.create_shipment(&user, "owner5@example.com").await;
    let admin = app.login(helpers::ADMIN_EMAIL, helpers::ADMIN_PASSWORD).await;
    let uri = format!("/ship/admin/shipments/status/{shipping_id}");

    for status in ["ON_ROUTE_TO_COLLECT", "COLLECTED", "SHIPPED", "COMPLETED"] {
        let response = app
            .request("PATCH", &uri, Some(json!({ "status": status })), Some(&admin))
            .await;
        assert_eq!(response.status, StatusCode::OK, "transition to {status}");
    }

    let detail = app
        .request(
            "GET",
            &format!("/ship/admin/shipments/{shipping_id}"),
            None,
            Some(&admin),
        )
        .await;
    let data = &detail.body["data"];
    assert_eq!(data["status"], "COMPLETED");
    assert!(data["collected_date"].is_string());
    assert!(data["shipped_date"].is_string());
    assert!(data["completed_date"].is_string());
    assert!(data["canceled_date"].is_null());

    // COMPLETED is absorbing.
    let response = app
        .request(
            "PATCH",
            &uri,
            Some(json!({ "status": "CANCELED" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_cancel_pending_is_immediate() {
    let app = helpers::TestApp::new().await;
    let user = app.signup("owner6@example.com", "password123").await;
    let shipping_id = app.create_shipment(&user, "owner6@example.com").await;

    let response = app
        .request(
            "PATCH",
            &format!("/ship/users/shipments/cancel/{shipping_id}"),
            None,
            Some(&user),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "CANCELED");
    assert!(response.body["data"]["canceled_date"].is_string());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_cancel_in_flight_records_request_only() {
    let app = helpers::TestApp::new().await;
    let user = app.signup("owner7@example.com", "password123").await;
    let shipping_id = app.create_shipment(&user, "owner7@example.com").await;
    let admin = app.login(helpers::ADMIN_EMAIL, helpers::ADMIN_PASSWORD).await;

    app.request(
        "PATCH",
        &format!("/ship/admin/shipments/status/{shipping_id}"),
        Some(json!({ "status": "ON_ROUTE_TO_COLLECT" })),
        Some(&admin),
    )
    .await;

    let response = app
        .request(
            "PATCH",
            &format!("/ship/users/shipments/cancel/{shipping_id}"),
            None,
            Some(&user),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ON_ROUTE_TO_COLLECT");
    assert_eq!(response.body["data"]["request_cancel"], true);
    assert!(response.body["data"]["canceled_date"].is_null());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_foreign_shipment_looks_missing() {
    let app = helpers::TestApp::new().await;
    let owner = app.signup("owner8@example.com", "password123").await;
    let stranger = app.signup("stranger@example.com", "password123").await;
    let shipping_id = app.create_shipment(&owner, "owner8@example.com").await;

    for uri in [
        format!("/ship/users/shipments/{shipping_id}"),
        format!("/ship/users/shipments/cancel/{shipping_id}"),
        format!("/ship/users/shipments/delay/{shipping_id}"),
    ] {
        let method = if uri.contains("/shipments/cancel/") || uri.contains("/shipments/delay/") {
            "PATCH"
        } else {
            "GET"
        };
        let response = app.request(method, &uri, None, Some(&stranger)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_delay_toggle_twice_returns_to_original() {
    let app = helpers::TestApp::new().await;
    let user = app.signup("owner9@example.com", "password123").await;
    let shipping_id = app.create_shipment(&user, "owner9@example.com").await;
    let uri = format!("/ship/users/shipments/delay/{shipping_id}");

    let first = app.request("PATCH", &uri, None, Some(&user)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"]["delay_flag"], true);

    let second = app.request("PATCH", &uri, None, Some(&user)).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["data"]["delay_flag"], false);

    // Creation + two toggles.
    let unread = app
        .request("GET", "/ship/users/notifications", None, Some(&user))
        .await;
    assert_eq!(unread.body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_admin_force_cancel_bypasses_table() {
    let app = helpers::TestApp::new().await;
    let user = app.signup("owner10@example.com", "password123").await;
    let shipping_id = app.create_shipment(&user, "owner10@example.com").await;
    let admin = app.login(helpers::ADMIN_EMAIL, helpers::ADMIN_PASSWORD).await;

    // Drive well past PENDING first.
    for status in ["ON_ROUTE_TO_COLLECT", "COLLECTED", "SHIPPED"] {
        app.request(
            "PATCH",
            &format!("/ship/admin/shipments/status/{shipping_id}"),
            Some(json!({ "status": status })),
            Some(&admin),
        )
        .await;
    }

    let response = app
        .request(
            "DELETE",
            &format!("/ship/admin/shipments/{shipping_id}"),
            None,
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "CANCELED");
    assert!(response.body["data"]["canceled_date"].is_string());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_admin_listing_scopes() {
    let app = helpers::TestApp::new().await;
    let a = app.signup("lister-a@example.com", "password123").await;
    let b = app.signup("lister-b@example.com", "password123").await;
    app.create_shipment(&a, "lister-a@example.com").await;
    app.create_shipment(&b, "lister-b@example.com").await;
    let admin = app.login(helpers::ADMIN_EMAIL, helpers::ADMIN_PASSWORD).await;

    let all = app
        .request("GET", "/ship/admin/shipments", None, Some(&admin))
        .await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["data"]["items"].as_array().unwrap().len(), 2);

    let own = app
        .request("GET", "/ship/users/shipments", None, Some(&a))
        .await;
    assert_eq!(own.body["data"]["items"].as_array().unwrap().len(), 1);

    let forbidden = app
        .request("GET", "/ship/admin/shipments", None, Some(&a))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
}
