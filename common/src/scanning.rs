//! Collaborator contracts of the scan pipeline.
//!
//! The engine only talks to these traits; concrete network adapters live in
//! `lensr-core` and tests swap in scripted implementations.

use std::net::Ipv4Addr;

use async_trait::async_trait;
use pnet::ipnetwork::Ipv4Network;

use crate::camera::StreamCandidate;
use crate::error::{ProbeError, ScanError};
use crate::network::host::DiscoveredHost;
use crate::network::interface::NetworkInterface;

/// Result of testing one stream candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The candidate produced a readable frame or an HTTP 200.
    Reachable,
    /// The service answered, but not with a usable stream.
    Unreachable,
    /// Nothing conclusive came back.
    Failed(ProbeError),
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Reachable)
    }
}

/// An open port, optionally annotated with the service the scanner guessed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortFinding {
    pub port: u16,
    pub service: Option<String>,
}

impl PortFinding {
    pub fn open(port: u16) -> Self {
        Self { port, service: None }
    }
}

/// Link-layer discovery of live hosts in one /24.
#[async_trait]
pub trait HostSweeper: Send + Sync {
    async fn sweep(
        &self,
        intf: &NetworkInterface,
        network: Ipv4Network,
    ) -> Result<Vec<DiscoveredHost>, ScanError>;
}

/// Determines which of `ports` are open on `ip`. Never fails: errors mean "closed".
#[async_trait]
pub trait PortProber: Send + Sync {
    async fn probe(&self, ip: Ipv4Addr, ports: &[u16]) -> Vec<PortFinding>;
}

/// Opens a short-lived connection to a candidate and tries to read from it.
#[async_trait]
pub trait StreamTester: Send + Sync {
    async fn test(&self, candidate: &StreamCandidate) -> ProbeOutcome;
}

/// Returns the externally visible IPv4 address of this machine.
#[async_trait]
pub trait PublicIpLookup: Send + Sync {
    async fn public_ip(&self) -> anyhow::Result<Ipv4Addr>;
}
