//! Fundamental types for the Grindesk wallet core.
//!
//! This crate defines the domain model shared by the client and session
//! layers: amounts, the network identifier, transactions, the wallet
//! summary, and the session token. Wire-format quirks (snake_case field
//! names, chronological ordering) never leak into these types; the
//! client crate translates at its boundary.

pub mod amount;
pub mod network;
pub mod output;
pub mod summary;
pub mod token;
pub mod transaction;

pub use amount::{Amount, NANOGRIN_PER_GRIN};
pub use network::Network;
pub use output::OutputInfo;
pub use summary::WalletSummary;
pub use token::SessionToken;
pub use transaction::{Transaction, TxKind};
