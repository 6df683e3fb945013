//! Deep port probing through an external `nmap` binary.
//!
//! The SYN scan needs raw sockets, so the binary usually has to run as root.
//! Any failure of the child process degrades to "no open ports" for the host.

use std::net::Ipv4Addr;

use async_trait::async_trait;
use tokio::process::Command;

use lensr_common::scanning::{PortFinding, PortProber};
use lensr_common::warn;

const NMAP_BIN: &str = "nmap";

pub struct NmapProber {
    binary: String,
}

impl NmapProber {
    pub fn new() -> Self {
        Self {
            binary: NMAP_BIN.to_string(),
        }
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn args(ip: Ipv4Addr, ports: &[u16]) -> Vec<String> {
        let port_list = ports
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(",");
        vec![
            "-sS".into(),
            "-Pn".into(),
            "-p".into(),
            port_list,
            "--open".into(),
            "-oG".into(),
            "-".into(),
            ip.to_string(),
        ]
    }
}

impl Default for NmapProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PortProber for NmapProber {
    async fn probe(&self, ip: Ipv4Addr, ports: &[u16]) -> Vec<PortFinding> {
        if ports.is_empty() {
            return Vec::new();
        }

        let output = match Command::new(&self.binary)
            .args(Self::args(ip, ports))
            .kill_on_drop(true)
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                warn!("Could not run {} against {ip}: {e}", self.binary);
                return Vec::new();
            }
        };

        if !output.status.success() {
            warn!(
                "{} exited with {} for {ip}: {}",
                self.binary,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Vec::new();
        }

        parse_greppable(&String::from_utf8_lossy(&output.stdout))
            .into_iter()
            .filter(|finding| ports.contains(&finding.port))
            .collect()
    }
}

/// Extracts open TCP ports from `-oG` output.
///
/// Entries look like `554/open/tcp//rtsp///`, separated by `, ` after `Ports: `.
pub fn parse_greppable(output: &str) -> Vec<PortFinding> {
    let mut findings: Vec<PortFinding> = Vec::new();

    for line in output.lines().filter(|l| l.starts_with("Host:")) {
        let Some((_, ports)) = line.split_once("Ports: ") else {
            continue;
        };
        let ports = ports.split('\t').next().unwrap_or_default();

        for entry in ports.split(", ") {
            let fields: Vec<&str> = entry.trim().split('/').collect();
            if fields.len() < 5 || fields[1] != "open" || fields[2] != "tcp" {
                continue;
            }
            let Ok(port) = fields[0].parse::<u16>() else {
                continue;
            };
            if findings.iter().any(|f| f.port == port) {
                continue;
            }
            let service = Some(fields[4]).filter(|s| !s.is_empty()).map(str::to_string);
            findings.push(PortFinding { port, service });
        }
    }

    findings.sort_by_key(|f| f.port);
    findings
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
