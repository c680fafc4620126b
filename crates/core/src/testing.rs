//! Mock transport for testing adapters without a network
//!
//! Available to this crate's tests and, through the `test-utils` feature, to
//! downstream crates.

// Allow missing error/panic docs for test mocks - they are designed to be simple
// and errors are clearly indicated by their return types
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use kineticpanel_domain::{PanelError, Result};
use serde_json::Value;

use crate::ports::Transport;

// Type aliases to reduce complexity
type ReplyMap = Arc<Mutex<HashMap<String, MockReply>>>;
type ReplySequenceMap = Arc<Mutex<HashMap<String, Vec<MockReply>>>>;
type CallLog = Arc<Mutex<Vec<RecordedCall>>>;

/// Scripted outcome of one transport call
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 2xx with the given body
    Body(Vec<u8>),
    /// Non-2xx response
    Status { status: u16, body: String },
    /// No response at all (connection refused, timeout)
    Unreachable(String),
}

impl MockReply {
    pub fn json(value: Value) -> Self {
        Self::Body(value.to_string().into_bytes())
    }

    pub fn empty() -> Self {
        Self::Body(Vec::new())
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self::Status { status, body: body.to_string() }
    }

    fn into_result(self) -> Result<Vec<u8>> {
        match self {
            Self::Body(body) => Ok(body),
            Self::Status { status, body } => Err(PanelError::Api { status, body }),
            Self::Unreachable(message) => Err(PanelError::Transport(message)),
        }
    }
}

/// A call captured by [`MockTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// In-memory [`Transport`] with scripted replies keyed by `"METHOD path"`
///
/// # Examples
///
/// ```
/// use kineticpanel_core::testing::{MockReply, MockTransport};
///
/// let transport = MockTransport::new();
/// transport.on("GET", "/servers/abc123", MockReply::status(404, "{}"));
/// assert!(transport.calls().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    replies: ReplyMap,
    reply_sequences: ReplySequenceMap,
    calls: CallLog,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to every `method path` call with `reply`
    pub fn on(&self, method: &str, path: &str, reply: MockReply) -> &Self {
        // SAFETY: Mutex poisoning is acceptable in test mocks - if a test panics,
        // the entire test fails anyway
        self.replies.lock().unwrap().insert(route(method, path), reply);
        self
    }

    /// Reply to successive `method path` calls with `replies`, then fall back
    /// to the reply registered with [`MockTransport::on`]
    pub fn on_sequence(&self, method: &str, path: &str, replies: Vec<MockReply>) -> &Self {
        // SAFETY: Mutex poisoning is acceptable in test mocks
        self.reply_sequences.lock().unwrap().insert(route(method, path), replies);
        self
    }

    /// All calls made so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        // SAFETY: Mutex poisoning is acceptable in test mocks
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls made to `method path`
    #[must_use]
    pub fn call_count(&self, method: &str, path: &str) -> usize {
        self.calls().iter().filter(|call| call.method == method && call.path == path).count()
    }

    #[must_use]
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls().last().cloned()
    }

    fn dispatch(&self, method: &'static str, path: &str, body: Option<Value>) -> Result<Vec<u8>> {
        // SAFETY: Mutex poisoning is acceptable in test mocks
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });

        let key = route(method, path);

        // SAFETY: Mutex poisoning is acceptable in test mocks
        let mut sequences = self.reply_sequences.lock().unwrap();
        if let Some(sequence) = sequences.get_mut(&key) {
            if !sequence.is_empty() {
                return sequence.remove(0).into_result();
            }
        }
        drop(sequences);

        // SAFETY: Mutex poisoning is acceptable in test mocks
        let replies = self.replies.lock().unwrap();
        match replies.get(&key) {
            Some(reply) => reply.clone().into_result(),
            None => Err(PanelError::Transport(format!("no mock reply configured for {key}"))),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str) -> Result<Vec<u8>> {
        self.dispatch("GET", path, None)
    }

    async fn post(&self, path: &str, payload: Option<&Value>) -> Result<Vec<u8>> {
        self.dispatch("POST", path, payload.cloned())
    }

    async fn patch(&self, path: &str, payload: &Value) -> Result<Vec<u8>> {
        self.dispatch("PATCH", path, Some(payload.clone()))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.dispatch("DELETE", path, None).map(|_| ())
    }
}

fn route(method: &str, path: &str) -> String {
    format!("{} {}", method.to_ascii_uppercase(), path)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn replays_sequences_before_sticky_replies() {
        let transport = MockTransport::new();
        transport
            .on("GET", "/servers/abc", MockReply::json(json!({"ok": true})))
            .on_sequence("GET", "/servers/abc", vec![MockReply::status(500, "boom")]);

        let first = transport.get("/servers/abc").await;
        assert!(matches!(first, Err(PanelError::Api { status: 500, .. })));

        let second = transport.get("/servers/abc").await.unwrap();
        assert_eq!(second, br#"{"ok":true}"#.to_vec());
        assert_eq!(transport.call_count("GET", "/servers/abc"), 2);
    }

    #[tokio::test]
    async fn records_bodies_and_rejects_unknown_routes() {
        let transport = MockTransport::new();
        let payload = json!({"signal": "start"});

        let result = transport.post("/servers/abc/power", Some(&payload)).await;
        assert!(matches!(result, Err(PanelError::Transport(_))));

        let call = transport.last_call().unwrap();
        assert_eq!(call.method, "POST");
        assert_eq!(call.body, Some(payload));
    }
}
