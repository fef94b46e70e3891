//! Wallet output as reported by the owner API.

use serde::{Deserialize, Serialize};

use crate::amount::Amount;

/// A single wallet output.
///
/// Shared by fee-estimate inputs, the output listing, and per-transaction
/// output details.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputInfo {
    pub amount: Amount,
    #[serde(default)]
    pub block_height: u64,
    pub commitment: String,
    #[serde(default)]
    pub keychain_path: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub transaction_id: i64,
}
