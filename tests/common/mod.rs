//! Shared test utilities: in-memory executors and request factories.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use bfx_wallet::Result;
use bfx_wallet::auth::{AuthenticatedRequest, Permission, RequestFactory, Signer};
use bfx_wallet::rest::Synchronous;
use serde_json::Value;

pub const TEST_API_URL: &str = "https://api.test.invalid/v2/";

/// A signer with throwaway credentials.
pub fn test_signer() -> Signer {
    Signer::new(
        TEST_API_URL,
        Some("test-key".to_string()),
        Some("test-secret".to_string()),
    )
}

/// Parses a fixture into a JSON value.
pub fn fixture(json: &str) -> Value {
    serde_json::from_str(json).expect("fixture is valid JSON")
}

/// Executor that records every request and answers with a canned reply.
pub struct RecordingExecutor {
    reply: RefCell<Option<Result<Value>>>,
    pub requests: RefCell<Vec<AuthenticatedRequest>>,
}

impl RecordingExecutor {
    pub fn replying(value: Value) -> Self {
        Self {
            reply: RefCell::new(Some(Ok(value))),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(error: bfx_wallet::BfxError) -> Self {
        Self {
            reply: RefCell::new(Some(Err(error))),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Body of the only request sent, parsed back to JSON.
    pub fn sent_body(&self) -> Value {
        let requests = self.requests.borrow();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests[0].body_json().expect("request body is JSON")
    }

    pub fn sent_url(&self) -> String {
        self.requests.borrow()[0].url.clone()
    }
}

impl Synchronous for RecordingExecutor {
    fn request(&self, request: &AuthenticatedRequest) -> Result<Value> {
        self.requests.borrow_mut().push(request.clone());
        self.reply
            .borrow_mut()
            .take()
            .expect("executor called more than once")
    }
}

/// Wraps a factory and counts how many requests it built.
pub struct CountingFactory<F> {
    inner: F,
    pub built: Cell<usize>,
}

impl<F> CountingFactory<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            built: Cell::new(0),
        }
    }
}

impl<F: RequestFactory> RequestFactory for CountingFactory<F> {
    fn new_authenticated_request_with_body(
        &self,
        permission: Permission,
        endpoint: &str,
        body: &Value,
    ) -> Result<AuthenticatedRequest> {
        self.built.set(self.built.get() + 1);
        self.inner
            .new_authenticated_request_with_body(permission, endpoint, body)
    }
}
