//! A **local area network (LAN)** sweeper.
//!
//! Broadcasts one ARP request per address of the target /24 and listens for
//! replies during a fixed window.
//!
//! This sweeper requires **root privileges** (or `CAP_NET_RAW`) to construct and
//! intercept raw Layer 2 frames.

use std::collections::HashSet;
use std::io;
use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use pnet::ipnetwork::Ipv4Network;
use pnet::util::MacAddr;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::Instant;

use lensr_common::error::ScanError;
use lensr_common::network::host::DiscoveredHost;
use lensr_common::network::interface::{self, NetworkInterface};
use lensr_common::network::range::{self, Ipv4Range};
use lensr_common::scanning::HostSweeper;
use lensr_common::{debug, error, warn};

use crate::network::{arp, channel};

pub struct ArpSweeper {
    window: Duration,
}

impl ArpSweeper {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }
}

#[async_trait]
impl HostSweeper for ArpSweeper {
    async fn sweep(
        &self,
        intf: &NetworkInterface,
        network: Ipv4Network,
    ) -> Result<Vec<DiscoveredHost>, ScanError> {
        let link = interface::find_link(intf)
            .ok_or_else(|| ScanError::InterfaceNotFound(intf.name.clone()))?;
        let src_mac = link
            .mac
            .filter(|mac| *mac != MacAddr::zero())
            .ok_or_else(|| ScanError::NoMacAddress(intf.name.clone()))?;

        let mut handle = channel::start_capture(&link)?;
        let targets = range::host_range(network);

        let sent = send_requests(src_mac, intf.ipv4, &targets, |packet| {
            handle.tx.send_to(packet, None)
        });
        debug!("Sent {sent} ARP requests on {}", intf.name);

        Ok(collect_replies(&mut handle.rx, &targets, intf.ipv4, sent, self.window).await)
    }
}

/// Sends one request per target except `own_ip` and counts the frames the
/// link accepted. Only those can be answered, so only those bound the wait.
fn send_requests<F>(src_mac: MacAddr, own_ip: Ipv4Addr, targets: &Ipv4Range, mut send: F) -> usize
where
    F: FnMut(&[u8]) -> Option<io::Result<()>>,
{
    let mut sent = 0usize;
    for dst_addr in targets.to_iter().filter(|ip| *ip != own_ip) {
        let packet = match arp::create_request(src_mac, own_ip, dst_addr) {
            Ok(packet) => packet,
            Err(e) => {
                error!("Failed to build ARP request for {dst_addr}: {e}");
                continue;
            }
        };
        match send(&packet) {
            Some(Ok(())) => sent += 1,
            Some(Err(e)) => warn!("Failed to send ARP request to {dst_addr}: {e}"),
            None => warn!("Link refused the ARP request to {dst_addr}"),
        }
    }
    sent
}

/// Drains captured frames until `window` elapses or every target answered.
///
/// Hosts are deduplicated by MAC; the first address seen for a MAC wins.
async fn collect_replies(
    rx: &mut UnboundedReceiver<Vec<u8>>,
    targets: &Ipv4Range,
    own_ip: Ipv4Addr,
    expected: usize,
    window: Duration,
) -> Vec<DiscoveredHost> {
    let mut seen_macs: HashSet<MacAddr> = HashSet::new();
    let mut hosts: Vec<DiscoveredHost> = Vec::new();
    let deadline = tokio::time::sleep_until(Instant::now() + window);
    tokio::pin!(deadline);

    while hosts.len() < expected {
        tokio::select! {
            frame = rx.recv() => {
                let Some(frame) = frame else { break };
                let Some(host) = arp::parse_reply(&frame, targets) else { continue };
                if host.ip != own_ip && seen_macs.insert(host.mac) {
                    hosts.push(host);
                }
            }
            _ = &mut deadline => break,
        }
    }

    hosts.sort_by_key(|h| h.ip);
    hosts
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
