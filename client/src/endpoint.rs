//! Endpoint resolution for the node's API surfaces.

use crate::settings::ConnectionSettings;

/// The node's logical API surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiSurface {
    /// Node status API.
    Node,
    /// Counterparty-facing wallet RPC.
    ForeignRpc,
    /// Wallet-owner REST API.
    Owner,
    /// Wallet-owner JSON-RPC API.
    OwnerRpc,
}

impl ApiSurface {
    /// Fixed path/version suffix for this surface.
    pub fn version_path(&self) -> &'static str {
        match self {
            Self::Node => "v1",
            Self::ForeignRpc => "v1/wallet/foreign",
            Self::Owner => "v1/wallet/owner",
            Self::OwnerRpc => "v2",
        }
    }
}

/// Computes the base URL and port for each API surface.
///
/// Pure function of the connection settings; no side effects, no I/O.
#[derive(Clone, Debug)]
pub struct EndpointResolver {
    settings: ConnectionSettings,
}

impl EndpointResolver {
    pub fn new(settings: ConnectionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// Resolved port for a surface.
    ///
    /// Every surface follows the floonet offset except `OwnerRpc`: the
    /// owner RPC port is bound by the RPC framework, not versioned per
    /// network, and is never shifted. Base ports too large for the offset
    /// saturate at `u16::MAX`; TOML loading rejects such settings up
    /// front via [`ConnectionSettings::validate`].
    pub fn port(&self, surface: ApiSurface) -> u16 {
        let ports = &self.settings.ports;
        let offset = self.settings.network.port_offset();
        match surface {
            ApiSurface::Node => ports.node.saturating_add(offset),
            ApiSurface::ForeignRpc => ports.foreign_rpc.saturating_add(offset),
            ApiSurface::Owner => ports.owner.saturating_add(offset),
            ApiSurface::OwnerRpc => ports.owner_rpc,
        }
    }

    /// Base URL for a surface, version suffix included, no trailing slash.
    pub fn url(&self, surface: ApiSurface) -> String {
        format!(
            "{}://{}:{}/{}",
            self.settings.protocol.as_str(),
            self.settings.ip,
            self.port(surface),
            surface.version_path()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grindesk_types::Network;

    fn floonet() -> EndpointResolver {
        EndpointResolver::new(ConnectionSettings::default())
    }

    fn mainnet() -> EndpointResolver {
        EndpointResolver::new(ConnectionSettings {
            network: Network::Mainnet,
            ..ConnectionSettings::default()
        })
    }

    #[test]
    fn floonet_owner_url() {
        assert_eq!(
            floonet().url(ApiSurface::Owner),
            "http://127.0.0.1:13420/v1/wallet/owner"
        );
    }

    #[test]
    fn floonet_offsets_every_surface_except_owner_rpc() {
        let resolver = floonet();
        assert_eq!(resolver.port(ApiSurface::Node), 13413);
        assert_eq!(resolver.port(ApiSurface::ForeignRpc), 13415);
        assert_eq!(resolver.port(ApiSurface::Owner), 13420);
        assert_eq!(resolver.port(ApiSurface::OwnerRpc), 3421);
    }

    #[test]
    fn mainnet_ports_are_unmodified() {
        let resolver = mainnet();
        assert_eq!(resolver.port(ApiSurface::Node), 3413);
        assert_eq!(resolver.port(ApiSurface::ForeignRpc), 3415);
        assert_eq!(resolver.port(ApiSurface::Owner), 3420);
        assert_eq!(resolver.port(ApiSurface::OwnerRpc), 3421);
    }

    #[test]
    fn oversized_floonet_base_port_saturates_instead_of_wrapping() {
        use crate::settings::Ports;
        let resolver = EndpointResolver::new(ConnectionSettings {
            ports: Ports {
                owner: 60_000,
                ..Ports::default()
            },
            ..ConnectionSettings::default()
        });
        assert_eq!(resolver.port(ApiSurface::Owner), u16::MAX);
    }

    #[test]
    fn version_suffixes_are_fixed_per_surface() {
        let resolver = mainnet();
        assert_eq!(resolver.url(ApiSurface::Node), "http://127.0.0.1:3413/v1");
        assert_eq!(
            resolver.url(ApiSurface::ForeignRpc),
            "http://127.0.0.1:3415/v1/wallet/foreign"
        );
        assert_eq!(resolver.url(ApiSurface::OwnerRpc), "http://127.0.0.1:3421/v2");
    }
}
