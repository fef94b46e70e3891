//! Session lifecycle and wallet-summary synchronization.
//!
//! [`SessionSync`] owns the session token and the wallet summary, keeps
//! them reconciled against the node through periodic polling, and
//! serializes mutations (cancel/repost) against the displayed state. The
//! UI only ever sees cloned, read-only snapshots.

pub mod error;
pub mod sync;
pub mod views;

pub use error::SessionError;
pub use sync::{SessionConfig, SessionPhase, SessionSync, DEFAULT_POLL_INTERVAL};
pub use views::TxFilter;
