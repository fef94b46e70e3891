//! Wallet transaction and its kind.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::output::OutputInfo;

/// Transaction kind, using the node's literal wire strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TxKind {
    Coinbase,
    Sent,
    Received,
    SendingNotFinalized,
    SendingFinalized,
    ReceivingNotFinalized,
    Canceled,
    /// A kind this client does not know about; kept rather than rejected
    /// so a newer node cannot break summary parsing.
    Unknown,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coinbase => "Coinbase",
            Self::Sent => "Sent",
            Self::Received => "Received",
            Self::SendingNotFinalized => "Sending (Not Finalized)",
            Self::SendingFinalized => "Sending (Finalized)",
            Self::ReceivingNotFinalized => "Receiving (Not Finalized)",
            Self::Canceled => "Canceled",
            Self::Unknown => "Unknown",
        }
    }

    pub fn from_wire(s: &str) -> Self {
        match s {
            "Coinbase" => Self::Coinbase,
            "Sent" => Self::Sent,
            "Received" => Self::Received,
            "Sending (Not Finalized)" => Self::SendingNotFinalized,
            "Sending (Finalized)" => Self::SendingFinalized,
            "Receiving (Not Finalized)" => Self::ReceivingNotFinalized,
            "Canceled" => Self::Canceled,
            _ => Self::Unknown,
        }
    }

    pub fn is_sent(&self) -> bool {
        matches!(
            self,
            Self::Sent | Self::SendingFinalized | Self::SendingNotFinalized
        )
    }

    pub fn is_received(&self) -> bool {
        matches!(self, Self::Received | Self::ReceivingNotFinalized)
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }
}

impl Serialize for TxKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TxKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&s))
    }
}

/// A wallet transaction.
///
/// Amounts are base units exactly as the node reported them. Referencing
/// a transaction across poll cycles is done by `id`, never by holding the
/// struct itself; a new summary replaces all of these wholesale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(default)]
    pub address: Option<String>,
    /// Unix timestamp (seconds).
    #[serde(default)]
    pub creation_date: i64,
    pub amount_credited: Amount,
    pub amount_debited: Amount,
    #[serde(rename = "type")]
    pub kind: TxKind,
    #[serde(default)]
    pub confirmed_height: u64,
    #[serde(default)]
    pub fee: Amount,
    #[serde(default)]
    pub slate_id: Option<String>,
    #[serde(default)]
    pub slate_message: Option<String>,
    #[serde(default)]
    pub outputs: Vec<OutputInfo>,
}

impl Transaction {
    pub fn is_confirmed(&self) -> bool {
        self.confirmed_height > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_strings_round_trip() {
        for kind in [
            TxKind::Coinbase,
            TxKind::Sent,
            TxKind::Received,
            TxKind::SendingNotFinalized,
            TxKind::SendingFinalized,
            TxKind::ReceivingNotFinalized,
            TxKind::Canceled,
        ] {
            assert_eq!(TxKind::from_wire(kind.as_str()), kind);
        }
    }

    #[test]
    fn unrecognized_kind_maps_to_unknown() {
        assert_eq!(TxKind::from_wire("Something New"), TxKind::Unknown);
    }

    #[test]
    fn kind_serializes_as_type_field() {
        let tx = Transaction {
            id: 7,
            address: None,
            creation_date: 1_600_000_000,
            amount_credited: Amount::new(100),
            amount_debited: Amount::ZERO,
            kind: TxKind::SendingNotFinalized,
            confirmed_height: 0,
            fee: Amount::ZERO,
            slate_id: None,
            slate_message: None,
            outputs: Vec::new(),
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "Sending (Not Finalized)");
        assert_eq!(json["id"], 7);
    }

    #[test]
    fn parse_then_serialize_preserves_id_and_amounts() {
        let json = serde_json::json!({
            "id": 12,
            "amount_credited": 5_000_000_000u64,
            "amount_debited": 0,
            "type": "Received",
            "confirmed_height": 120_000,
        });
        let tx: Transaction = serde_json::from_value(json).unwrap();
        let back = serde_json::to_value(&tx).unwrap();
        assert_eq!(back["id"], 12);
        assert_eq!(back["amount_credited"], 5_000_000_000u64);
        assert_eq!(back["amount_debited"], 0);
    }
}
