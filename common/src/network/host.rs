use std::collections::{BTreeMap, BTreeSet};
use std::net::Ipv4Addr;

use pnet::util::MacAddr;
use serde::Serialize;

use crate::camera::{self, ConfirmedCamera};

/// Sentinel vendor name when the OUI lookup yields nothing.
pub const UNKNOWN_VENDOR: &str = "Unknown";

/// A host that answered the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiscoveredHost {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
}

impl DiscoveredHost {
    pub fn new(ip: Ipv4Addr, mac: MacAddr) -> Self {
        Self { ip, mac }
    }
}

/// Per-host outcome of one scan. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostProbeResult {
    pub ip: Ipv4Addr,
    pub mac: String,
    pub vendor: String,
    pub open_ports: BTreeSet<u16>,
    /// Service names reported by the deep scanner, keyed by port.
    pub services: BTreeMap<u16, String>,
    pub is_camera_candidate: bool,
    /// First candidate URL that answered, if any.
    pub confirmed_url: Option<String>,
}

impl HostProbeResult {
    pub fn new(host: DiscoveredHost, vendor: String, open_ports: BTreeSet<u16>) -> Self {
        let is_camera_candidate = open_ports.iter().any(|port| camera::is_camera_port(*port));
        Self {
            ip: host.ip,
            mac: host.mac.to_string(),
            vendor,
            open_ports,
            services: BTreeMap::new(),
            is_camera_candidate,
            confirmed_url: None,
        }
    }

    /// Open ports that belong to the camera port set, ascending.
    pub fn camera_ports(&self) -> Vec<u16> {
        self.open_ports
            .iter()
            .copied()
            .filter(|port| camera::is_camera_port(*port))
            .collect()
    }

    pub fn confirmed_camera(&self) -> Option<ConfirmedCamera> {
        self.confirmed_url.as_ref().map(|url| ConfirmedCamera {
            ip: self.ip.into(),
            url: url.clone(),
        })
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
