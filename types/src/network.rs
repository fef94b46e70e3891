//! Network identifier.

use serde::{Deserialize, Serialize};

/// Identifies which network the local node runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// The production network.
    Mainnet,
    /// The public test network, with shifted port numbering.
    Floonet,
}

impl Network {
    /// Offset added to every base port except the owner RPC port.
    pub fn port_offset(&self) -> u16 {
        match self {
            Self::Mainnet => 0,
            Self::Floonet => 10_000,
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Floonet => "floonet",
        }
    }

    pub fn is_mainnet(&self) -> bool {
        matches!(self, Self::Mainnet)
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::Floonet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floonet_offsets_ports_by_ten_thousand() {
        assert_eq!(Network::Floonet.port_offset(), 10_000);
        assert_eq!(Network::Mainnet.port_offset(), 0);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Network::Floonet).unwrap(), "\"floonet\"");
        let parsed: Network = serde_json::from_str("\"mainnet\"").unwrap();
        assert_eq!(parsed, Network::Mainnet);
    }
}
