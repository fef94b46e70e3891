//! Wallet summary.

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::transaction::Transaction;

/// The locally held view of the wallet: balances and the transaction list.
///
/// Replaced wholesale on every successful poll, never patched
/// field-by-field, so the UI can never observe a partially updated state.
/// Transactions are ordered most-recent-first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletSummary {
    pub spendable: Amount,
    pub total: Amount,
    pub immature: Amount,
    pub unconfirmed: Amount,
    pub locked: Amount,
    pub transactions: Vec<Transaction>,
}

impl WalletSummary {
    /// Look up a transaction by id in the current snapshot.
    pub fn transaction(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    /// Whether the snapshot contains a transaction with this id.
    pub fn contains(&self, id: i64) -> bool {
        self.transaction(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TxKind;

    fn tx(id: i64) -> Transaction {
        Transaction {
            id,
            address: None,
            creation_date: 0,
            amount_credited: Amount::ZERO,
            amount_debited: Amount::ZERO,
            kind: TxKind::Received,
            confirmed_height: 0,
            fee: Amount::ZERO,
            slate_id: None,
            slate_message: None,
            outputs: Vec::new(),
        }
    }

    #[test]
    fn lookup_by_id() {
        let summary = WalletSummary {
            transactions: vec![tx(3), tx(1)],
            ..Default::default()
        };
        assert!(summary.contains(3));
        assert!(summary.contains(1));
        assert!(!summary.contains(2));
        assert_eq!(summary.transaction(1).map(|t| t.id), Some(1));
    }
}
