use proptest::prelude::*;

use grindesk_client::{ApiSurface, ConnectionSettings, EndpointResolver, Ports};
use grindesk_types::Network;

fn settings(network: Network, ports: Ports) -> ConnectionSettings {
    ConnectionSettings {
        network,
        ports,
        ..ConnectionSettings::default()
    }
}

proptest! {
    /// Floonet shifts every surface's port by exactly 10_000 — except the
    /// owner RPC port, which is invariant to the network flag.
    #[test]
    fn floonet_port_rule(
        node in 1u16..50_000,
        foreign_rpc in 1u16..50_000,
        owner in 1u16..50_000,
        owner_rpc in 1u16..50_000,
    ) {
        let ports = Ports { node, foreign_rpc, owner, owner_rpc };
        let floonet = EndpointResolver::new(settings(Network::Floonet, ports));
        let mainnet = EndpointResolver::new(settings(Network::Mainnet, ports));

        prop_assert_eq!(floonet.port(ApiSurface::Node), node + 10_000);
        prop_assert_eq!(floonet.port(ApiSurface::ForeignRpc), foreign_rpc + 10_000);
        prop_assert_eq!(floonet.port(ApiSurface::Owner), owner + 10_000);
        prop_assert_eq!(floonet.port(ApiSurface::OwnerRpc), owner_rpc);

        prop_assert_eq!(mainnet.port(ApiSurface::Node), node);
        prop_assert_eq!(mainnet.port(ApiSurface::ForeignRpc), foreign_rpc);
        prop_assert_eq!(mainnet.port(ApiSurface::Owner), owner);
        prop_assert_eq!(mainnet.port(ApiSurface::OwnerRpc), owner_rpc);
    }

    /// Resolved URLs always embed the resolved port and the fixed version
    /// suffix for the surface.
    #[test]
    fn url_embeds_port_and_suffix(owner in 1u16..50_000) {
        let ports = Ports { owner, ..Ports::default() };
        let resolver = EndpointResolver::new(settings(Network::Floonet, ports));
        let url = resolver.url(ApiSurface::Owner);
        prop_assert_eq!(
            url,
            format!("http://127.0.0.1:{}/v1/wallet/owner", owner + 10_000)
        );
    }
}
