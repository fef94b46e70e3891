//! HTTP client layer for a locally running node.
//!
//! Resolves endpoints per API surface, executes REST and JSON-RPC 2.0
//! calls, and exposes one typed method per logical wallet operation.
//! Field-name translation between the node's snake_case wire format and
//! the domain model happens here, exactly once per operation.

pub mod endpoint;
pub mod error;
pub mod node_client;
pub mod nullable;
pub mod settings;
pub mod transport;

pub use endpoint::{ApiSurface, EndpointResolver};
pub use error::ClientError;
pub use node_client::{
    FeeEstimate, NewWallet, NodeClient, NodeStatus, RestoredWallet, SelectionStrategy, SendArgs,
};
pub use nullable::{NullTransport, RecordedRequest};
pub use settings::{ConnectionSettings, Ports, Protocol};
pub use transport::{HttpTransport, RestMethod, Transport};
