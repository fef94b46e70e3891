//! Nullable transport for deterministic testing.
//!
//! All network access in this crate goes through [`Transport`];
//! `NullTransport` is the implementation that never opens a socket. It
//! returns scripted responses, records every request for inspection, and
//! can inject latency so in-flight-overlap behavior is testable with a
//! paused clock.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;

use crate::error::ClientError;
use crate::transport::{RestMethod, Transport};

/// A request observed by a [`NullTransport`], in call order.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub url: String,
    /// "GET", "POST", or "RPC".
    pub method: String,
    /// JSON-RPC method name, for RPC calls.
    pub rpc_method: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

type Scripted<T> = VecDeque<Result<T, ClientError>>;

#[derive(Default)]
struct Inner {
    rest: Vec<(String, Scripted<String>)>,
    rpc: Vec<(String, Scripted<Value>)>,
    requests: Vec<RecordedRequest>,
    latency: Option<Duration>,
}

/// Scriptable [`Transport`] that never touches the network.
///
/// REST responses are matched by URL substring, RPC responses by method
/// name. Each match pops the next queued response; once a queue drains
/// to a single entry that entry repeats, which keeps polling tests
/// concise. Unscripted calls fail with a network error.
#[derive(Default)]
pub struct NullTransport {
    inner: Mutex<Inner>,
}

impl NullTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful REST response for URLs containing `url_part`.
    pub fn on_rest(&self, url_part: &str, body: &str) {
        self.on_rest_result(url_part, Ok(body.to_string()));
    }

    pub fn on_rest_result(&self, url_part: &str, result: Result<String, ClientError>) {
        let mut inner = self.lock();
        match inner.rest.iter_mut().find(|(part, _)| part == url_part) {
            Some((_, queue)) => queue.push_back(result),
            None => inner.rest.push((url_part.to_string(), VecDeque::from([result]))),
        }
    }

    /// Queue a successful RPC result; it is wrapped in a JSON-RPC 2.0
    /// response envelope the way the node would.
    pub fn on_rpc(&self, method: &str, result: Value) {
        self.on_rpc_envelope(
            method,
            Ok(serde_json::json!({ "jsonrpc": "2.0", "id": "0", "result": result })),
        );
    }

    /// Queue a JSON-RPC error response for the given method name.
    pub fn on_rpc_error(&self, method: &str, code: i64, message: &str) {
        self.on_rpc_envelope(
            method,
            Ok(serde_json::json!({
                "jsonrpc": "2.0",
                "id": "0",
                "error": { "code": code, "message": message }
            })),
        );
    }

    /// Queue a raw transport-level RPC outcome (whole envelope or failure).
    pub fn on_rpc_envelope(&self, method: &str, result: Result<Value, ClientError>) {
        let mut inner = self.lock();
        match inner.rpc.iter_mut().find(|(name, _)| name == method) {
            Some((_, queue)) => queue.push_back(result),
            None => inner.rpc.push((method.to_string(), VecDeque::from([result]))),
        }
    }

    /// Delay every response by `latency` (virtual time under a paused
    /// tokio clock).
    pub fn set_latency(&self, latency: Duration) {
        self.lock().latency = Some(latency);
    }

    /// Every request observed so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Number of observed requests whose URL contains `url_part`.
    pub fn request_count(&self, url_part: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.url.contains(url_part))
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("NullTransport lock poisoned")
    }

    fn take<T: Clone>(queue: &mut Scripted<T>) -> Option<Result<T, ClientError>> {
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Transport for NullTransport {
    fn rest(
        &self,
        url: &str,
        method: RestMethod,
        headers: &[(String, String)],
        body: Option<Value>,
    ) -> impl Future<Output = Result<String, ClientError>> + Send {
        let (latency, result) = {
            let mut inner = self.lock();
            inner.requests.push(RecordedRequest {
                url: url.to_string(),
                method: method.as_str().to_string(),
                rpc_method: None,
                headers: headers.to_vec(),
                body,
            });
            let result = inner
                .rest
                .iter_mut()
                .find(|(part, _)| url.contains(part.as_str()))
                .and_then(|(_, queue)| Self::take(queue))
                .unwrap_or_else(|| {
                    Err(ClientError::Network(format!("no scripted response for {url}")))
                });
            (inner.latency, result)
        };
        async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            result
        }
    }

    fn rpc(
        &self,
        url: &str,
        method: &str,
        params: Value,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send {
        let (latency, result) = {
            let mut inner = self.lock();
            inner.requests.push(RecordedRequest {
                url: url.to_string(),
                method: "RPC".to_string(),
                rpc_method: Some(method.to_string()),
                headers: Vec::new(),
                body: Some(params),
            });
            let result = inner
                .rpc
                .iter_mut()
                .find(|(name, _)| name == method)
                .and_then(|(_, queue)| Self::take(queue))
                .unwrap_or_else(|| {
                    Err(ClientError::Network(format!("no scripted response for {method}")))
                });
            (inner.latency, result)
        };
        async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            result
        }
    }
}
