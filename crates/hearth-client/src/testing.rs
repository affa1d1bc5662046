//! Scripted dispatcher for operation tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use hearth_shared::TransportError;

use crate::dispatcher::{ApiRequest, BodyKind, CancelToken, Dispatcher, Method, RawResponse};

enum Scripted {
    Respond(RawResponse),
    Fail(TransportError),
    /// Wait for cancellation
    Hang,
}

/// A request as the mock saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub target: String,
    pub body_kind: Option<BodyKind>,
    pub body: Option<Value>,
    pub idempotency_key: Option<String>,
}

/// Replays canned responses in order and records every request.
#[derive(Default)]
pub struct MockDispatcher {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: Value) {
        let body = serde_json::to_vec(&body).unwrap();
        self.push(Scripted::Respond(RawResponse::new(status, body)));
    }

    pub fn respond_raw(&self, status: u16, body: &'static str) {
        self.push(Scripted::Respond(RawResponse::new(status, body)));
    }

    pub fn fail(&self, err: TransportError) {
        self.push(Scripted::Fail(err));
    }

    pub fn hang(&self) {
        self.push(Scripted::Hang);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request was dispatched")
    }

    fn push(&self, step: Scripted) {
        self.script.lock().unwrap().push_back(step);
    }
}

#[async_trait]
impl Dispatcher for MockDispatcher {
    async fn dispatch(
        &self,
        request: &ApiRequest,
        target: &str,
        cancel: &CancelToken,
    ) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: request.method,
            target: target.to_string(),
            body_kind: request.body.as_ref().map(|b| b.kind),
            body: request
                .body
                .as_ref()
                .map(|b| serde_json::from_slice(&b.json).unwrap()),
            idempotency_key: request
                .idempotency_key
                .as_ref()
                .map(|k| k.as_str().to_string()),
        });

        let step = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected request: script exhausted");
        match step {
            Scripted::Respond(response) => Ok(response),
            Scripted::Fail(err) => Err(err),
            Scripted::Hang => {
                cancel.cancelled().await;
                Err(TransportError::Cancelled)
            }
        }
    }
}
