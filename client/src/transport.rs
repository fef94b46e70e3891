//! REST and JSON-RPC call execution.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use uuid::Uuid;

use crate::error::ClientError;

/// Per-call timeout for REST status/summary calls.
pub const REST_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-call timeout for RPC calls; slate construction on the node side
/// can take tens of seconds.
pub const RPC_TIMEOUT: Duration = Duration::from_secs(60);

const MAX_IDLE_CONNECTIONS: usize = 100;

/// HTTP verbs used by the REST surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestMethod {
    Get,
    Post,
}

impl RestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Low-level call execution against a node API surface.
///
/// Implementations never retry; retry policy belongs to the caller (the
/// session poller for reads, explicit user action for mutations).
/// [`HttpTransport`] is the production implementation; tests swap in
/// [`crate::nullable::NullTransport`].
pub trait Transport: Send + Sync {
    /// Execute a REST call and return the raw response body.
    ///
    /// The body comes back for any HTTP status: the node reports
    /// application errors as plain-text bodies that callers surface
    /// verbatim. An empty body is a valid empty string, not a failure.
    fn rest(
        &self,
        url: &str,
        method: RestMethod,
        headers: &[(String, String)],
        body: Option<Value>,
    ) -> impl Future<Output = Result<String, ClientError>> + Send;

    /// Execute a JSON-RPC 2.0 call and return the parsed response
    /// envelope. Non-JSON bodies are a [`ClientError::Protocol`] failure.
    fn rpc(
        &self,
        url: &str,
        method: &str,
        params: Value,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send;
}

/// Build a JSON-RPC 2.0 request envelope with a fresh correlation id.
pub(crate) fn rpc_envelope(method: &str, params: Value) -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": Uuid::new_v4().to_string(),
        "method": method,
        "params": params,
    })
}

/// Transport backed by a shared `reqwest` client with a bounded
/// connection pool and per-call timeouts.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| ClientError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn rest(
        &self,
        url: &str,
        method: RestMethod,
        headers: &[(String, String)],
        body: Option<Value>,
    ) -> impl Future<Output = Result<String, ClientError>> + Send {
        let mut request = match method {
            RestMethod::Get => self.http.get(url),
            RestMethod::Post => self.http.post(url),
        };
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &body {
            request = request.json(body);
        }
        let request = request.timeout(REST_TIMEOUT);
        async move {
            let response = request
                .send()
                .await
                .map_err(|e| ClientError::Network(format!("request failed: {e}")))?;
            response
                .text()
                .await
                .map_err(|e| ClientError::Network(format!("failed to read body: {e}")))
        }
    }

    fn rpc(
        &self,
        url: &str,
        method: &str,
        params: Value,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send {
        let request = self
            .http
            .post(url)
            .header("Accept", "application/json, text/plain, */*")
            .json(&rpc_envelope(method, params))
            .timeout(RPC_TIMEOUT);
        async move {
            let response = request
                .send()
                .await
                .map_err(|e| ClientError::Network(format!("request failed: {e}")))?;
            let body = response
                .text()
                .await
                .map_err(|e| ClientError::Network(format!("failed to read body: {e}")))?;
            serde_json::from_str(&body)
                .map_err(|e| ClientError::Protocol(format!("invalid JSON-RPC response: {e}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_jsonrpc_version_method_and_params() {
        let envelope = rpc_envelope("login", serde_json::json!({"username": "u"}));
        assert_eq!(envelope["jsonrpc"], "2.0");
        assert_eq!(envelope["method"], "login");
        assert_eq!(envelope["params"]["username"], "u");
        assert!(envelope["id"].is_string());
    }

    #[test]
    fn envelope_ids_are_fresh_per_call() {
        let a = rpc_envelope("send", Value::Null);
        let b = rpc_envelope("send", Value::Null);
        assert_ne!(a["id"], b["id"]);
    }
}
