use thiserror::Error;

use grindesk_client::ClientError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("not logged in")]
    NotLoggedIn,

    /// The targeted transaction is not present in the latest summary;
    /// mutations against superseded ids are refused before any request
    /// is sent.
    #[error("transaction {0} not found in current summary")]
    UnknownTransaction(i64),

    #[error(transparent)]
    Client(#[from] ClientError),
}
