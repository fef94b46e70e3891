//! Derived transaction views.
//!
//! Views are pure filters over the current summary snapshot, recomputed
//! on every read and never cached, so they cannot diverge from the
//! summary they were derived from.

use grindesk_types::{Transaction, TxKind};

/// Transaction view selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxFilter {
    All,
    Received,
    Sent,
    Unconfirmed,
    Canceled,
    Coinbase,
}

impl TxFilter {
    /// Whether `tx` belongs to this view.
    pub fn matches(&self, tx: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Received => tx.kind.is_received(),
            Self::Sent => tx.kind.is_sent(),
            Self::Unconfirmed => tx.confirmed_height == 0 && !tx.kind.is_canceled(),
            Self::Canceled => tx.kind.is_canceled(),
            Self::Coinbase => tx.kind == TxKind::Coinbase,
        }
    }
}

/// Transactions matching `filter`, preserving summary order.
pub fn filter_transactions(transactions: &[Transaction], filter: TxFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| filter.matches(tx))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grindesk_types::Amount;

    fn tx(id: i64, kind: TxKind, confirmed_height: u64) -> Transaction {
        Transaction {
            id,
            address: None,
            creation_date: 0,
            amount_credited: Amount::ZERO,
            amount_debited: Amount::ZERO,
            kind,
            confirmed_height,
            fee: Amount::ZERO,
            slate_id: None,
            slate_message: None,
            outputs: Vec::new(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(1, TxKind::Received, 100),
            tx(2, TxKind::Sent, 90),
            tx(3, TxKind::SendingNotFinalized, 0),
            tx(4, TxKind::Canceled, 0),
            tx(5, TxKind::Coinbase, 80),
            tx(6, TxKind::ReceivingNotFinalized, 0),
        ]
    }

    fn ids(filter: TxFilter) -> Vec<i64> {
        filter_transactions(&sample(), filter)
            .iter()
            .map(|t| t.id)
            .collect()
    }

    #[test]
    fn all_keeps_everything_in_order() {
        assert_eq!(ids(TxFilter::All), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn received_includes_unfinalized_receives() {
        assert_eq!(ids(TxFilter::Received), vec![1, 6]);
    }

    #[test]
    fn sent_includes_unfinalized_sends() {
        assert_eq!(ids(TxFilter::Sent), vec![2, 3]);
    }

    #[test]
    fn unconfirmed_excludes_canceled() {
        assert_eq!(ids(TxFilter::Unconfirmed), vec![3, 6]);
    }

    #[test]
    fn canceled_and_coinbase_match_kind_only() {
        assert_eq!(ids(TxFilter::Canceled), vec![4]);
        assert_eq!(ids(TxFilter::Coinbase), vec![5]);
    }
}
