use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use pnet::ipnetwork::Ipv4Network;
use pnet::util::MacAddr;

use lensr_common::camera::StreamCandidate;
use lensr_common::error::{ProbeError, ScanError};
use lensr_common::network::host::DiscoveredHost;
use lensr_common::network::interface::NetworkInterface;
use lensr_common::scanning::{
    HostSweeper, PortFinding, PortProber, ProbeOutcome, PublicIpLookup, StreamTester,
};
use lensr_common::vendors::VendorRepository;

pub fn eth0() -> NetworkInterface {
    NetworkInterface::new(
        "eth0",
        Ipv4Addr::new(192, 168, 1, 50),
        Ipv4Addr::new(255, 255, 255, 0),
    )
}

pub fn temp_registry() -> PathBuf {
    std::env::temp_dir().join(format!("lensr-it-{:016x}.json", rand::random::<u64>()))
}

/// Answers every sweep with the same hosts and records the network it was asked for.
pub struct ScriptedSweeper {
    pub hosts: Vec<DiscoveredHost>,
    pub seen: Mutex<Option<Ipv4Network>>,
}

impl ScriptedSweeper {
    pub fn new(hosts: Vec<DiscoveredHost>) -> Self {
        Self {
            hosts,
            seen: Mutex::new(None),
        }
    }
}

#[async_trait]
impl HostSweeper for ScriptedSweeper {
    async fn sweep(
        &self,
        _: &NetworkInterface,
        network: Ipv4Network,
    ) -> Result<Vec<DiscoveredHost>, ScanError> {
        *self.seen.lock().unwrap() = Some(network);
        Ok(self.hosts.clone())
    }
}

pub struct ScriptedPorts(pub HashMap<Ipv4Addr, Vec<u16>>);

#[async_trait]
impl PortProber for ScriptedPorts {
    async fn probe(&self, ip: Ipv4Addr, ports: &[u16]) -> Vec<PortFinding> {
        self.0
            .get(&ip)
            .map(|open| {
                open.iter()
                    .copied()
                    .filter(|p| ports.contains(p))
                    .map(PortFinding::open)
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub struct StaticVendors(pub HashMap<MacAddr, String>);

impl VendorRepository for StaticVendors {
    fn get_vendor(&self, mac: MacAddr) -> Option<String> {
        self.0.get(&mac).cloned()
    }
}

/// Accepts only the listed URLs and keeps every URL it was handed.
pub struct AllowListTester {
    accept: Vec<String>,
    pub tested: Mutex<Vec<String>>,
}

impl AllowListTester {
    pub fn new(accept: &[&str]) -> Self {
        Self {
            accept: accept.iter().map(|s| s.to_string()).collect(),
            tested: Mutex::new(Vec::new()),
        }
    }

    pub fn tested(&self) -> Vec<String> {
        self.tested.lock().unwrap().clone()
    }
}

#[async_trait]
impl StreamTester for AllowListTester {
    async fn test(&self, candidate: &StreamCandidate) -> ProbeOutcome {
        let url = candidate.url();
        self.tested.lock().unwrap().push(url.clone());
        if self.accept.contains(&url) {
            ProbeOutcome::Reachable
        } else {
            ProbeOutcome::Failed(ProbeError::Refused)
        }
    }
}

pub struct FixedPublicIp(pub Option<Ipv4Addr>);

#[async_trait]
impl PublicIpLookup for FixedPublicIp {
    async fn public_ip(&self) -> anyhow::Result<Ipv4Addr> {
        self.0.ok_or_else(|| anyhow::anyhow!("offline"))
    }
}
