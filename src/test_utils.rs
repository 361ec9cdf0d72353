use axum::{
    Json, Router,
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::config::{AppContext, ClientSettings};

pub const VALID_TOKEN: &str = "valid-token";

/// Initialize tracing for tests with output to STDERR.
///
/// The log level comes from RUST_LOG, defaulting to WARN.
pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(|value| value == format!("Bearer {}", VALID_TOKEN))
        .unwrap_or(false)
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (StatusCode::UNAUTHORIZED, Json(json!({"message": "Token expired"})))
}

/// Minimal stand-in for the learning backend
fn stub_router() -> Router {
    Router::new()
        .route(
            "/api/leaderboard",
            get(|| async {
                Json(json!({"leaderboard": [
                    {"rank": 1, "username": "ada", "xp": 1200, "level": 7},
                    {"rank": 2, "username": "alan", "xp": 900, "level": 5}
                ]}))
            }),
        )
        .route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "secret" {
                    (
                        StatusCode::OK,
                        Json(json!({"token": VALID_TOKEN, "user": {"_id": "u1", "username": "ada"}})),
                    )
                } else {
                    (StatusCode::BAD_REQUEST, Json(json!({"message": "Invalid credentials"})))
                }
            }),
        )
        .route(
            "/api/game/progress",
            get(|headers: HeaderMap| async move {
                if !authorized(&headers) {
                    return unauthorized();
                }
                (
                    StatusCode::OK,
                    Json(json!({"xp": 550, "level": 3, "coins": 40, "streakDays": 2,
                        "topics": [{"topic": "arrays", "completedLevels": 4, "totalLevels": 10}]})),
                )
            }),
        )
        .route(
            "/api/user/friends",
            get(|headers: HeaderMap| async move {
                if !authorized(&headers) {
                    return unauthorized();
                }
                (
                    StatusCode::OK,
                    Json(json!({"friends": [{"_id": "u2", "username": "grace", "xp": 300, "online": true}]})),
                )
            }),
        )
        .route(
            "/api/user/friends/requests",
            get(|headers: HeaderMap| async move {
                if !authorized(&headers) {
                    return unauthorized();
                }
                (
                    StatusCode::OK,
                    Json(json!({"requests": [{"_id": "req-1", "fromUserId": "u3", "fromUsername": "linus"}]})),
                )
            }),
        )
        .route(
            "/api/user/friends/request",
            post(|headers: HeaderMap, body: String| async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                (
                    StatusCode::CREATED,
                    Json(json!({"message": format!("{} {}", content_type, body)})),
                )
            }),
        )
        .route(
            "/api/user/friends/request/:id/accept",
            put(|Path(id): Path<String>| async move {
                if id == "missing" {
                    (StatusCode::NOT_FOUND, Json(json!({"message": "Request not found"})))
                } else {
                    (StatusCode::OK, Json(json!({"message": format!("accepted {}", id)})))
                }
            }),
        )
        .route(
            "/api/rewards/redeem",
            post(|| async { (StatusCode::PAYMENT_REQUIRED, Json(json!({"message": "Not enough coins"}))) }),
        )
        .route(
            "/api/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
        )
        .route(
            "/api/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Json(json!({}))
            }),
        )
}

/// Serve the stub backend on an ephemeral local port
pub async fn spawn_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub backend");
    let address = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, stub_router())
            .await
            .expect("Stub backend failed");
    });
    address
}

/// Connect a client to `address` with an optional token
pub fn connect(address: SocketAddr, token: Option<&str>) -> AppContext {
    ClientSettings {
        api_url: format!("http://{}", address),
        token: token.map(str::to_string),
        timeout: Duration::from_millis(200),
    }
    .connect()
    .expect("Failed to build client")
}
