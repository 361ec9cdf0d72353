use client::api::{auth, leaderboard};
use client::{ApiError, FALLBACK_MESSAGE, HttpRequest, Method, Transport};
use serde_json::{Value, json};
use std::time::Duration;

use crate::cli::commands::{self, forum, friends, rewards};
use crate::test_utils::{VALID_TOKEN, connect, init_test_tracing, spawn_backend};
use crate::transport::ReqwestTransport;

#[tokio::test]
async fn test_leaderboard_body_is_returned_unchanged() {
    let _guard = init_test_tracing();
    let address = spawn_backend().await;
    let context = connect(address, None);

    let raw: Value = context.api.get("/api/leaderboard").await.unwrap();
    assert_eq!(raw["leaderboard"][0]["username"], "ada");
    assert_eq!(raw["leaderboard"].as_array().unwrap().len(), 2);

    let board = leaderboard::get_leaderboard(&context.api).await.unwrap();
    assert_eq!(board.leaderboard[1].xp, 900);
}

#[tokio::test]
async fn test_post_body_and_content_type_reach_server() {
    let _guard = init_test_tracing();
    let address = spawn_backend().await;
    let context = connect(address, Some(VALID_TOKEN));

    let echoed: Value = context
        .api
        .post("/api/user/friends/request", &json!({"toUserId": "u1"}))
        .await
        .unwrap();

    assert_eq!(echoed["message"], r#"application/json {"toUserId":"u1"}"#);
}

#[tokio::test]
async fn test_unauthorized_expires_session() {
    let _guard = init_test_tracing();
    let address = spawn_backend().await;
    let context = connect(address, Some("stale-token"));

    let err = commands::progress(&context.api).await.unwrap_err();

    let api_error = err.downcast_ref::<ApiError>().unwrap();
    assert!(api_error.is_unauthorized());
    assert_eq!(context.api.last_error().as_deref(), Some("Token expired"));
    assert!(context.session.is_expired());
    assert!(!context.api.session().is_authenticated());
}

#[tokio::test]
async fn test_login_then_authorized_call() {
    let _guard = init_test_tracing();
    let address = spawn_backend().await;
    let context = connect(address, None);

    let bad = auth::login(&context.api, "ada@example.com", "nope").await.unwrap_err();
    assert_eq!(bad.status(), Some(400));
    assert!(!context.session.is_expired());

    commands::login(&context.api, "ada@example.com", "secret").await.unwrap();
    let progress = commands::progress(&context.api).await.unwrap();
    assert_eq!(progress.level, 3);
    assert_eq!(progress.topics[0].percent(), 40);
}

#[tokio::test]
async fn test_friends_list_loads_both_panels() {
    let _guard = init_test_tracing();
    let address = spawn_backend().await;
    let context = connect(address, Some(VALID_TOKEN));

    let (friend_list, request_list) = friends::list(&context.api).await.unwrap();

    assert_eq!(friend_list.friends[0].username, "grace");
    assert_eq!(request_list.requests[0].from_user_id, "u3");
    assert!(!context.api.in_flight());
}

#[tokio::test]
async fn test_accepting_many_fails_on_first_rejection() {
    let _guard = init_test_tracing();
    let address = spawn_backend().await;
    let context = connect(address, Some(VALID_TOKEN));

    friends::accept(&context.api, &["req-1".to_string(), "req-2".to_string()])
        .await
        .unwrap();

    let err = friends::accept(&context.api, &["req-1".to_string(), "missing".to_string()])
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Request not found");
}

#[tokio::test]
async fn test_redeem_failure_is_forwarded() {
    let _guard = init_test_tracing();
    let address = spawn_backend().await;
    let context = connect(address, Some(VALID_TOKEN));

    let err = rewards::redeem(&context.api, "r1").await.unwrap_err();

    assert_eq!(err.to_string(), "Not enough coins");
    assert_eq!(err.downcast_ref::<ApiError>().and_then(ApiError::status), Some(402));
    assert!(!context.session.is_expired());
}

#[tokio::test]
async fn test_forum_draft_validated_before_sending() {
    let _guard = init_test_tracing();
    let address = spawn_backend().await;
    let context = connect(address, Some(VALID_TOKEN));

    let err = forum::ask(&context.api, "   ".to_string(), "body".to_string(), vec![])
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Title must not be empty");
    assert_eq!(context.api.last_error(), None);
}

#[tokio::test]
async fn test_non_json_error_uses_fallback() {
    let _guard = init_test_tracing();
    let address = spawn_backend().await;
    let context = connect(address, Some(VALID_TOKEN));

    let err = context.api.get::<Value>("/api/broken").await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.user_message(), FALLBACK_MESSAGE);
    assert!(!context.session.is_expired());
}

#[tokio::test]
async fn test_transport_reports_network_failures() {
    let _guard = init_test_tracing();
    let address = spawn_backend().await;
    let transport = ReqwestTransport::new(Duration::from_millis(50)).unwrap();

    let slow = HttpRequest {
        method: Method::Get,
        url: format!("http://{}/api/slow", address),
        headers: Default::default(),
        body: None,
    };
    assert!(matches!(transport.send(&slow).await, Err(ApiError::Network(_))));

    // Bind and release a port so nothing is listening on it
    let closed = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap()
        .local_addr()
        .unwrap();
    let refused = HttpRequest {
        url: format!("http://{}/api/leaderboard", closed),
        ..slow
    };
    assert!(matches!(transport.send(&refused).await, Err(ApiError::Network(_))));
}

#[tokio::test]
async fn test_transport_returns_error_statuses_as_responses() {
    let _guard = init_test_tracing();
    let address = spawn_backend().await;
    let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();

    let response = transport
        .send(&HttpRequest {
            method: Method::Post,
            url: format!("http://{}/api/rewards/redeem", address),
            headers: Default::default(),
            body: Some("{}".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(response.status, 402);
    assert!(response.body.contains("Not enough coins"));
}
