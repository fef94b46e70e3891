//! Connection settings with TOML file support.

use serde::{Deserialize, Serialize};

use grindesk_types::Network;

use crate::error::ClientError;

/// How to reach the local node.
///
/// Immutable after construction; owned by the endpoint resolver. Can be
/// loaded from a TOML file via [`ConnectionSettings::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Node host address.
    #[serde(default = "default_ip")]
    pub ip: String,

    /// Scheme used for every surface.
    #[serde(default = "default_protocol")]
    pub protocol: Protocol,

    /// Which network the node runs on; floonet shifts every port except
    /// the owner RPC port.
    #[serde(default)]
    pub network: Network,

    /// Base ports per API surface.
    #[serde(default)]
    pub ports: Ports,
}

/// URL scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

/// Base port per API surface, before any network offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ports {
    #[serde(default = "default_node_port")]
    pub node: u16,
    #[serde(default = "default_foreign_rpc_port")]
    pub foreign_rpc: u16,
    #[serde(default = "default_owner_port")]
    pub owner: u16,
    #[serde(default = "default_owner_rpc_port")]
    pub owner_rpc: u16,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_ip() -> String {
    "127.0.0.1".to_string()
}

fn default_protocol() -> Protocol {
    Protocol::Http
}

fn default_node_port() -> u16 {
    3413
}

fn default_foreign_rpc_port() -> u16 {
    3415
}

fn default_owner_port() -> u16 {
    3420
}

fn default_owner_rpc_port() -> u16 {
    3421
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ConnectionSettings {
    /// Load settings from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ClientError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ClientError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse settings from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ClientError> {
        let settings: Self = toml::from_str(s).map_err(|e| ClientError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject base ports that leave no room for the network offset.
    ///
    /// The owner RPC port is exempt; it is never shifted.
    pub fn validate(&self) -> Result<(), ClientError> {
        let offset = u32::from(self.network.port_offset());
        for (name, port) in [
            ("node", self.ports.node),
            ("foreign_rpc", self.ports.foreign_rpc),
            ("owner", self.ports.owner),
        ] {
            if u32::from(port) + offset > u32::from(u16::MAX) {
                return Err(ClientError::Config(format!(
                    "{name} port {port} exceeds {} after the {} offset",
                    u16::MAX,
                    self.network.as_str()
                )));
            }
        }
        Ok(())
    }

    /// Serialize the settings to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("ConnectionSettings is always serializable to TOML")
    }
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            ip: default_ip(),
            protocol: default_protocol(),
            network: Network::default(),
            ports: Ports::default(),
        }
    }
}

impl Default for Ports {
    fn default() -> Self {
        Self {
            node: default_node_port(),
            foreign_rpc: default_foreign_rpc_port(),
            owner: default_owner_port(),
            owner_rpc: default_owner_rpc_port(),
        }
    }
}
