//! HTTP client tests against a scripted local server.

mod common;

use std::net::TcpListener;

use common::{drain, spawn_server, MockResponse};
use serde_json::json;
use tembo_core::client::request::IDEMPOTENCY_KEY_HEADER;
use tembo_core::params::{ListBookings, SignIn};
use tembo_core::tracker::PatchPayload;
use tembo_core::{ApiClient, ApiError, Feedback, FormKind, Route, SessionTokens};

fn signed_in() -> SessionTokens {
    SessionTokens {
        access_token: Some("acc-1".to_string()),
        refresh_token: Some("ref-1".to_string()),
    }
}

fn price_patch() -> PatchPayload {
    let mut payload = PatchPayload::new();
    payload.insert("price", json!(1200));
    payload
}

#[tokio::test]
async fn test_expired_access_token_is_refreshed_and_retried() {
    let (base_url, rx, handle) = spawn_server(vec![
        MockResponse::json(401, json!({ "detail": "Token expired" })),
        MockResponse::json(200, json!({ "message": "refreshed" }))
            .with_cookie("access_token=acc-2; Path=/; HttpOnly"),
        MockResponse::json(200, json!({ "updated_fields": { "price": 1200 } })),
    ]);
    let client = ApiClient::new(&base_url, signed_in()).expect("client");

    let ack = client
        .patch_itinerary("it-1", &price_patch())
        .await
        .expect("patch after refresh");

    assert_eq!(ack.updated_field_names(), vec!["price"]);
    assert_eq!(client.tokens().access_token.as_deref(), Some("acc-2"));

    let requests = drain(&rx, handle);
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].method, "PATCH");
    assert_eq!(requests[1].path(), "/staff/auth/refresh-token");
    assert_eq!(requests[2].path(), "/itineraries/it-1");
    assert!(requests[2]
        .header("cookie")
        .is_some_and(|cookie| cookie.contains("access_token=acc-2")));

    let first_key = requests[0].header(IDEMPOTENCY_KEY_HEADER).expect("key");
    assert_eq!(requests[2].header(IDEMPOTENCY_KEY_HEADER), Some(first_key));
    assert_eq!(requests[2].body, requests[0].body);
}

#[tokio::test]
async fn test_failed_refresh_expires_session() {
    let (base_url, rx, handle) = spawn_server(vec![
        MockResponse::json(401, json!({ "detail": "Token expired" })),
        MockResponse::json(401, json!({ "detail": "Refresh token invalid" })),
    ]);
    let client = ApiClient::new(&base_url, signed_in()).expect("client");

    let err = client.list_itineraries().await.unwrap_err();

    assert_eq!(err, ApiError::SessionExpired);
    assert!(!client.tokens().has_any());
    assert_eq!(drain(&rx, handle).len(), 2);

    let feedback = Feedback::from_api(FormKind::ItineraryUpdate, &err);
    assert_eq!(feedback.redirect, Some(Route::SignIn { redirect_to: None }));
}

#[tokio::test]
async fn test_second_unauthorized_expires_session() {
    let (base_url, rx, handle) = spawn_server(vec![
        MockResponse::json(401, json!({ "detail": "Token expired" })),
        MockResponse::json(200, json!({})).with_cookie("access_token=acc-2"),
        MockResponse::json(401, json!({ "detail": "Still not allowed" })),
    ]);
    let client = ApiClient::new(&base_url, signed_in()).expect("client");

    let err = client.list_blogs().await.unwrap_err();

    assert_eq!(err, ApiError::SessionExpired);
    assert_eq!(drain(&rx, handle).len(), 3);
}

#[tokio::test]
async fn test_login_unauthorized_does_not_refresh() {
    let (base_url, rx, handle) = spawn_server(vec![MockResponse::json(
        401,
        json!({ "detail": "invalid credentials" }),
    )]);
    let client = ApiClient::new(&base_url, SessionTokens::default()).expect("client");

    let err = client
        .login(&SignIn {
            email: "amani@tembo.co.ke".to_string(),
            password: "wrong password".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { ref detail } if detail == "invalid credentials"));
    let requests = drain(&rx, handle);
    assert_eq!(requests.len(), 1);
    assert!(requests[0].header(IDEMPOTENCY_KEY_HEADER).is_some());

    let feedback = Feedback::from_api(FormKind::SignIn, &err);
    assert_eq!(feedback.banner, "Invalid email or password");
    assert!(feedback.field_errors.is_empty());
    assert_eq!(feedback.redirect, None);
}

#[tokio::test]
async fn test_login_harvests_session_cookies() {
    let (base_url, rx, handle) = spawn_server(vec![MockResponse::json(
        200,
        json!({
            "staff_info": {
                "id": 7,
                "email": "amani@tembo.co.ke",
                "name": "Amani Mwangi",
                "role": "manager"
            }
        }),
    )
    .with_cookie("access_token=acc-9; Path=/; HttpOnly")
    .with_cookie("refresh_token=ref-9; Path=/; HttpOnly")]);
    let client = ApiClient::new(&base_url, SessionTokens::default()).expect("client");

    let response = client
        .login(&SignIn {
            email: "amani@tembo.co.ke".to_string(),
            password: "correct horse".to_string(),
        })
        .await
        .expect("login");

    assert_eq!(response.staff_info.id, "7");
    assert_eq!(
        client.tokens(),
        SessionTokens {
            access_token: Some("acc-9".to_string()),
            refresh_token: Some("ref-9".to_string()),
        }
    );
    let requests = drain(&rx, handle);
    assert_eq!(requests[0].header("cookie"), None);
}

#[tokio::test]
async fn test_unprocessable_entity_maps_field_paths() {
    let (base_url, rx, handle) = spawn_server(vec![MockResponse::json(
        422,
        json!({
            "detail": [
                { "loc": ["body", "days", 1, "title"], "msg": "field required" },
                { "loc": ["body", "price"], "msg": "must be positive" }
            ]
        }),
    )]);
    let client = ApiClient::new(&base_url, signed_in()).expect("client");

    let err = client
        .patch_itinerary("it-1", &price_patch())
        .await
        .unwrap_err();
    drain(&rx, handle);

    let fields = err.field_errors().expect("field errors");
    assert_eq!(fields.first("days[1].title"), Some("field required"));
    assert_eq!(fields.first("price"), Some("must be positive"));
    assert_eq!(err.status(), Some(422));

    let feedback = Feedback::from_api(FormKind::ItineraryUpdate, &err);
    assert!(feedback.field_errors.contains("days[1].title"));
}

#[tokio::test]
async fn test_server_error_keeps_plain_text_detail() {
    let (base_url, rx, handle) =
        spawn_server(vec![MockResponse::text(500, "Internal Server Error")]);
    let client = ApiClient::new(&base_url, signed_in()).expect("client");

    let err = client.me().await.unwrap_err();
    drain(&rx, handle);

    assert_eq!(
        err,
        ApiError::Server {
            status: 500,
            detail: "Internal Server Error".to_string(),
        }
    );
}

#[tokio::test]
async fn test_create_requires_created_status() {
    let (base_url, rx, handle) =
        spawn_server(vec![MockResponse::json(200, json!({ "id": "it-9" }))]);
    let client = ApiClient::new(&base_url, signed_in()).expect("client");

    let err = client.create_itinerary(&price_patch()).await.unwrap_err();
    drain(&rx, handle);

    assert!(matches!(err, ApiError::Status { status: 200, .. }));
}

#[tokio::test]
async fn test_bookings_page_query() {
    let (base_url, rx, handle) = spawn_server(vec![MockResponse::json(
        200,
        json!({ "bookings": [], "total": 0, "pages": 0, "current_page": 2, "page_size": 25 }),
    )]);
    let client = ApiClient::new(&base_url, signed_in()).expect("client");

    let page = client
        .list_bookings(&ListBookings {
            page: 2,
            page_size: 25,
        })
        .await
        .expect("bookings");

    assert_eq!(page.current_page, 2);
    let requests = drain(&rx, handle);
    assert_eq!(requests[0].method, "GET");
    assert!(requests[0].url.contains("page=2"));
    assert!(requests[0].url.contains("page_size=25"));
    assert!(requests[0].header(IDEMPOTENCY_KEY_HEADER).is_none());
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let client =
        ApiClient::new(&format!("http://127.0.0.1:{port}"), signed_in()).expect("client");

    let err = client.list_itineraries().await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(client.tokens(), signed_in());
}
