use thiserror::Error;

/// Errors surfaced by the client layer.
///
/// `Node` carries the node's own response text verbatim; the UI shows it
/// without rewording.
#[derive(Clone, Debug, Error)]
pub enum ClientError {
    /// Transport-level failure: connection refused, timeout, TLS.
    #[error("network error: {0}")]
    Network(String),

    /// A surface that must return JSON returned something else.
    #[error("malformed response: {0}")]
    Protocol(String),

    /// The node reported an application error.
    #[error("{0}")]
    Node(String),

    /// Invalid connection settings.
    #[error("config error: {0}")]
    Config(String),
}
