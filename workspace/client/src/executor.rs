use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{ApiError, Result};
use crate::listener::Listener;
use crate::session::Session;
use crate::transport::{Headers, HttpRequest, HttpResponse, Method, Transport};

/// Observable state of one executor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestState {
    pub in_flight: bool,
    pub last_error: Option<String>,
}

/// Caller-side description of a request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfig {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

impl RequestConfig {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Serialize `body` to a JSON string
    pub fn json_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }

    /// Use an already serialized body as-is
    pub fn raw_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Executes requests against the backend.
///
/// Every failure is recorded in [`RequestState::last_error`] and returned to
/// the caller unchanged. A 401 additionally terminates the session.
///
/// Overlapping calls are counted: `in_flight` stays set until the last one
/// settles, and `last_error` is only cleared when a call starts on an idle
/// executor, so a sibling's failure survives.
pub struct RequestExecutor {
    transport: Rc<dyn Transport>,
    session: Rc<Session>,
    base_url: String,
    state: RefCell<RequestState>,
    outstanding: Cell<usize>,
    listener: Listener,
}

/// Releases one outstanding call when the request scope ends, however it ends
struct InFlightGuard<'a> {
    executor: &'a RequestExecutor,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let remaining = self.executor.outstanding.get().saturating_sub(1);
        self.executor.outstanding.set(remaining);
        self.executor.state.borrow_mut().in_flight = remaining > 0;
        self.executor.listener.notify();
    }
}

impl RequestExecutor {
    pub fn new(transport: Rc<dyn Transport>, session: Rc<Session>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            session,
            base_url: base_url.into(),
            state: RefCell::new(RequestState::default()),
            outstanding: Cell::new(0),
            listener: Listener::default(),
        }
    }

    pub fn session(&self) -> &Rc<Session> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn state(&self) -> RequestState {
        self.state.borrow().clone()
    }

    pub fn in_flight(&self) -> bool {
        self.state.borrow().in_flight
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    /// Register a callback fired after every state change
    pub fn set_listener(&self, callback: impl Fn() + 'static) {
        self.listener.set(callback);
    }

    pub async fn request<R: DeserializeOwned>(&self, config: RequestConfig) -> Result<R> {
        let outstanding = self.outstanding.get() + 1;
        self.outstanding.set(outstanding);
        {
            let mut state = self.state.borrow_mut();
            state.in_flight = true;
            if outstanding == 1 {
                state.last_error = None;
            }
        }
        self.listener.notify();
        let _guard = InFlightGuard { executor: self };

        let request = self.prepare(config);
        log::debug!("{} request to: {}", request.method, request.url);

        let outcome = match self.transport.send(&request).await {
            Ok(response) => Self::decode(response),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(data) => {
                log::info!("{} {} - Success", request.method, request.url);
                Ok(data)
            }
            Err(e) => {
                self.record_failure(&request, &e);
                Err(e)
            }
        }
    }

    pub async fn get<R: DeserializeOwned>(&self, url: &str) -> Result<R> {
        self.request(RequestConfig::new(Method::Get, url)).await
    }

    pub async fn post<R, B>(&self, url: &str, body: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(RequestConfig::new(Method::Post, url).json_body(body)?).await
    }

    pub async fn put<R, B>(&self, url: &str, body: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(RequestConfig::new(Method::Put, url).json_body(body)?).await
    }

    pub async fn patch<R, B>(&self, url: &str, body: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(RequestConfig::new(Method::Patch, url).json_body(body)?).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, url: &str) -> Result<R> {
        self.request(RequestConfig::new(Method::Delete, url)).await
    }

    fn prepare(&self, config: RequestConfig) -> HttpRequest {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "application/json");
        if let Some(token) = self.session.token() {
            headers.insert("Authorization", format!("Bearer {}", token));
        }
        headers.merge(&config.headers);

        HttpRequest {
            method: config.method,
            url: self.resolve(&config.url),
            headers,
            body: config.body,
        }
    }

    fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        if url.starts_with('/') {
            format!("{}{}", base, url)
        } else {
            format!("{}/{}", base, url)
        }
    }

    fn decode<R: DeserializeOwned>(response: HttpResponse) -> Result<R> {
        if !response.ok() {
            return Err(ApiError::from_response(response.status, &response.body));
        }
        let body = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn record_failure(&self, request: &HttpRequest, error: &ApiError) {
        log::error!("{} {} - {:?}", request.method, request.url, error);
        self.state.borrow_mut().last_error = Some(error.user_message());
        self.listener.notify();

        if error.is_unauthorized() {
            self.session.terminate();
        }
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("base_url", &self.base_url)
            .field("state", &*self.state.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FALLBACK_MESSAGE;
    use crate::testing::{CountingController, GatedTransport, harness};
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_get_returns_body_unchanged() {
        let h = harness();
        let body = r#"{"leaderboard":[{"rank":1,"username":"ada","xp":1200},{"rank":2,"username":"alan","xp":900}]}"#;
        h.transport.respond(200, body);

        let data: Value = h.executor.get("/api/leaderboard").await.unwrap();

        assert_eq!(data, serde_json::from_str::<Value>(body).unwrap());
        let request = h.transport.last_request();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url, "http://backend.test/api/leaderboard");
        assert_eq!(request.body, None);
        assert_eq!(h.executor.state(), RequestState::default());
    }

    #[tokio::test]
    async fn test_post_serializes_body() {
        let h = harness();
        h.transport.respond(201, r#"{"status":"pending"}"#);

        let _: Value = h
            .executor
            .post("/api/user/friends/request", &json!({"toUserId": "u1"}))
            .await
            .unwrap();

        let request = h.transport.last_request();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body.as_deref(), Some(r#"{"toUserId":"u1"}"#));
    }

    #[tokio::test]
    async fn test_default_headers_applied_before_caller_headers() {
        let h = harness();
        h.transport.respond(200, "{}");
        h.transport.respond(200, "{}");

        let config = RequestConfig::new(Method::Put, "/api/profile")
            .header("X-Client", "cli")
            .raw_body("{}");
        let _: Value = h.executor.request(config).await.unwrap();
        let request = h.transport.last_request();
        assert_eq!(request.headers.get("content-type"), Some("application/json"));
        assert_eq!(request.headers.get("authorization"), Some("Bearer test-token"));
        assert_eq!(request.headers.get("x-client"), Some("cli"));

        let config = RequestConfig::new(Method::Post, "/api/upload")
            .header("content-type", "text/plain")
            .raw_body("plain text");
        let _: Value = h.executor.request(config).await.unwrap();
        let request = h.transport.last_request();
        assert_eq!(request.headers.get("Content-Type"), Some("text/plain"));
        assert_eq!(request.body.as_deref(), Some("plain text"));
    }

    #[tokio::test]
    async fn test_unauthorized_triggers_single_logout() {
        let h = harness();
        h.transport.respond(401, r#"{"message":"Token expired"}"#);

        let err = h.executor.get::<Value>("/api/auth/me").await.unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(h.controller.calls(), 1);
        assert!(!h.session.is_authenticated());
        assert_eq!(h.executor.last_error().as_deref(), Some("Token expired"));
        assert!(!h.executor.in_flight());
    }

    #[tokio::test]
    async fn test_other_failures_do_not_logout() {
        let h = harness();
        h.transport.respond(403, r#"{"message":"Forbidden"}"#);
        h.transport.respond(500, "");
        h.transport.fail("connection refused");

        for _ in 0..3 {
            assert!(h.executor.get::<Value>("/api/rewards").await.is_err());
        }

        assert_eq!(h.controller.calls(), 0);
        assert!(h.session.is_authenticated());
        assert_eq!(h.executor.last_error().as_deref(), Some(FALLBACK_MESSAGE));
    }

    #[tokio::test]
    async fn test_error_is_forwarded_not_swallowed() {
        let h = harness();
        h.transport.respond(409, r#"{"message":"Already redeemed"}"#);

        let err = h
            .executor
            .post::<Value, _>("/api/rewards/redeem", &json!({"rewardId": "r1"}))
            .await
            .unwrap_err();

        match err {
            ApiError::Server { status, message, body } => {
                assert_eq!(status, 409);
                assert_eq!(message, "Already redeemed");
                assert_eq!(body, Some(json!({"message": "Already redeemed"})));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_new_request_clears_previous_error() {
        let h = harness();
        h.transport.respond(400, r#"{"message":"Bad input"}"#);
        h.transport.respond(204, "");

        assert!(h.executor.get::<Value>("/api/forum/questions").await.is_err());
        assert_eq!(h.executor.last_error().as_deref(), Some("Bad input"));

        let data: Value = h.executor.delete("/api/user/friends/u2").await.unwrap();
        assert_eq!(data, Value::Null);
        assert_eq!(h.executor.last_error(), None);
    }

    #[tokio::test]
    async fn test_decode_failure_is_reported() {
        let h = harness();
        h.transport.respond(200, "not json");

        let err = h.executor.get::<Vec<String>>("/api/leaderboard").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(h.executor.last_error().as_deref(), Some(FALLBACK_MESSAGE));
    }

    #[tokio::test]
    async fn test_listener_sees_in_flight_transitions() {
        let h = harness();
        h.transport.respond(200, "[]");

        let executor = Rc::new(h.executor);
        let transitions = Rc::new(RefCell::new(Vec::new()));
        {
            let executor_ref = Rc::downgrade(&executor);
            let transitions = transitions.clone();
            executor.set_listener(move || {
                if let Some(executor) = executor_ref.upgrade() {
                    transitions.borrow_mut().push(executor.in_flight());
                }
            });
        }

        let _: Vec<Value> = executor.get("/api/rewards").await.unwrap();
        assert_eq!(*transitions.borrow(), vec![true, false]);
    }

    #[tokio::test]
    async fn test_absolute_urls_bypass_base() {
        let h = harness();
        h.transport.respond(200, "{}");
        h.transport.respond(200, "{}");

        let _: Value = h.executor.get("https://cdn.test/avatars.json").await.unwrap();
        assert_eq!(h.transport.last_request().url, "https://cdn.test/avatars.json");

        let _: Value = h.executor.patch("api/forum/questions/q1/vote", &json!({"up": true})).await.unwrap();
        assert_eq!(h.transport.last_request().url, "http://backend.test/api/forum/questions/q1/vote");
        assert_eq!(h.transport.last_request().method, Method::Patch);
    }

    #[tokio::test]
    async fn test_failed_call_is_not_retried() {
        let h = harness();
        h.transport.respond(503, r#"{"message":"Unavailable"}"#);

        assert!(h.executor.get::<Value>("/api/game/progress").await.is_err());
        assert_eq!(h.transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_overlapping_requests_keep_executor_busy() {
        let (release, gate) = tokio::sync::oneshot::channel();
        let transport = Rc::new(GatedTransport::new("/api/slow", gate));
        let session = Rc::new(Session::with_token(Rc::new(CountingController::default()), "test-token"));
        let executor = RequestExecutor::new(transport, session, "http://backend.test");

        let slow = executor.get::<Value>("/api/slow");
        let bad = async {
            let result = executor.get::<Value>("/api/bad").await;
            // The slow call is still outstanding
            assert!(executor.in_flight());
            assert_eq!(executor.last_error().as_deref(), Some("bad"));
            release.send(()).unwrap();
            result
        };
        let (slow, bad) = tokio::join!(slow, bad);

        assert!(slow.is_ok());
        assert_eq!(bad.unwrap_err().status(), Some(400));
        assert!(!executor.in_flight());
        assert_eq!(executor.last_error().as_deref(), Some("bad"));
    }

    #[tokio::test]
    async fn test_dropped_overlapping_request_releases_its_share() {
        let (_release, gate) = tokio::sync::oneshot::channel::<()>();
        let transport = Rc::new(GatedTransport::new("/api/slow", gate));
        let session = Rc::new(Session::new(Rc::new(CountingController::default())));
        let executor = RequestExecutor::new(transport, session, "http://backend.test");

        let result = tokio::time::timeout(std::time::Duration::from_millis(20), executor.get::<Value>("/api/slow")).await;
        assert!(result.is_err());
        assert!(!executor.in_flight());

        assert!(executor.get::<Value>("/api/bad").await.is_err());
        assert!(!executor.in_flight());
    }
}
