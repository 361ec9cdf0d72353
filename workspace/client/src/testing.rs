//! Test doubles for the transport and session seams.

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::{ApiError, Result};
use crate::executor::RequestExecutor;
use crate::session::{Session, SessionController};
use crate::transport::{HttpRequest, HttpResponse, Transport};

/// Counts logout calls
#[derive(Default)]
pub struct CountingController {
    calls: Cell<usize>,
}

impl CountingController {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl SessionController for CountingController {
    fn logout(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

/// Replays queued outcomes and records every request it receives
#[derive(Default)]
pub struct MockTransport {
    outcomes: RefCell<VecDeque<Result<HttpResponse>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn respond(&self, status: u16, body: &str) {
        self.outcomes
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub fn fail(&self, reason: &str) {
        self.outcomes
            .borrow_mut()
            .push_back(Err(ApiError::Network(reason.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.requests.borrow_mut().push(request.clone());
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no response queued".to_string())))
    }
}

/// Holds requests to `slow_path` until the gate opens; every other path
/// answers 400 with message "bad"
pub struct GatedTransport {
    slow_path: String,
    gate: RefCell<Option<tokio::sync::oneshot::Receiver<()>>>,
}

impl GatedTransport {
    pub fn new(slow_path: &str, gate: tokio::sync::oneshot::Receiver<()>) -> Self {
        Self {
            slow_path: slow_path.to_string(),
            gate: RefCell::new(Some(gate)),
        }
    }
}

#[async_trait(?Send)]
impl Transport for GatedTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        if request.url.ends_with(&self.slow_path) {
            let gate = self.gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            return Ok(HttpResponse::new(200, "{}"));
        }
        Ok(HttpResponse::new(400, r#"{"message":"bad"}"#))
    }
}

/// Executor wired to a mock transport, plus handles to inspect both seams
pub struct Harness {
    pub transport: Rc<MockTransport>,
    pub controller: Rc<CountingController>,
    pub session: Rc<Session>,
    pub executor: RequestExecutor,
}

pub fn harness() -> Harness {
    let transport = Rc::new(MockTransport::default());
    let controller = Rc::new(CountingController::default());
    let session = Rc::new(Session::with_token(controller.clone(), "test-token"));
    let executor = RequestExecutor::new(transport.clone(), session.clone(), "http://backend.test");

    Harness {
        transport,
        controller,
        session,
        executor,
    }
}
