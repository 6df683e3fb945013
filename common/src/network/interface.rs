//! Local adapter enumeration and scan-network derivation.
//!
//! The scan target is always the /24 around the selected address, whatever
//! the adapter's real netmask is.

use std::net::Ipv4Addr;

use pnet::datalink::{self, NetworkInterface as LinkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network};

use crate::error::ScanError;

pub const SCAN_PREFIX: u8 = 24;

/// One IPv4 address bound to a local adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterface {
    pub name: String,
    pub ipv4: Ipv4Addr,
    pub netmask: Ipv4Addr,
}

impl NetworkInterface {
    pub fn new(name: impl Into<String>, ipv4: Ipv4Addr, netmask: Ipv4Addr) -> Self {
        Self {
            name: name.into(),
            ipv4,
            netmask,
        }
    }

    /// Real prefix length of the adapter, for display only.
    pub fn prefix(&self) -> u8 {
        u32::from(self.netmask).count_ones() as u8
    }

    pub fn scan_network(&self) -> Ipv4Network {
        derive_scan_network(self.ipv4)
    }
}

/// Lists every non-loopback IPv4 address of the host, in adapter order.
pub fn list_interfaces() -> Vec<NetworkInterface> {
    from_links(&datalink::interfaces())
}

fn from_links(links: &[LinkInterface]) -> Vec<NetworkInterface> {
    links
        .iter()
        .flat_map(|link| {
            link.ips.iter().filter_map(move |net| match net {
                IpNetwork::V4(v4) if !v4.ip().is_loopback() => {
                    Some(NetworkInterface::new(link.name.clone(), v4.ip(), v4.mask()))
                }
                _ => None,
            })
        })
        .collect()
}

/// Picks the interface named `name`, or the first candidate when no name is given.
pub fn select_interface(
    interfaces: &[NetworkInterface],
    name: Option<&str>,
) -> Result<NetworkInterface, ScanError> {
    match name {
        Some(name) => interfaces
            .iter()
            .find(|intf| intf.name == name)
            .cloned()
            .ok_or_else(|| ScanError::InterfaceNotFound(name.to_string())),
        None => interfaces.first().cloned().ok_or(ScanError::NoInterface),
    }
}

/// Masks the low 8 bits of `ip` and returns the resulting /24.
pub fn derive_scan_network(ip: Ipv4Addr) -> Ipv4Network {
    let network = Ipv4Addr::from(u32::from(ip) & 0xFFFF_FF00);
    Ipv4Network::new(network, SCAN_PREFIX).expect("/24 is always valid")
}

/// Finds the link-layer adapter that owns `intf`.
pub fn find_link(intf: &NetworkInterface) -> Option<LinkInterface> {
    datalink::interfaces().into_iter().find(|link| link.name == intf.name)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
