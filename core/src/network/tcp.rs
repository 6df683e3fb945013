use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::task::JoinSet;
use tokio::time::timeout;

use lensr_common::scanning::{PortFinding, PortProber};

/// Basic mode: a full TCP handshake per port, bounded by `connect_timeout`.
pub struct TcpConnectProber {
    connect_timeout: Duration,
}

impl TcpConnectProber {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

#[async_trait]
impl PortProber for TcpConnectProber {
    async fn probe(&self, ip: Ipv4Addr, ports: &[u16]) -> Vec<PortFinding> {
        let mut set = JoinSet::new();
        for &port in ports {
            let ceiling = self.connect_timeout;
            let addr = SocketAddr::new(IpAddr::V4(ip), port);
            set.spawn(async move { handshake_probe(addr, ceiling).await.then_some(port) });
        }

        let mut open: Vec<u16> = Vec::new();
        while let Some(res) = set.join_next().await {
            if let Ok(Some(port)) = res {
                open.push(port);
            }
        }
        open.sort_unstable();
        open.into_iter().map(PortFinding::open).collect()
    }
}

/// True only when the handshake completes in time. Refusals and timeouts both mean closed.
pub async fn handshake_probe(addr: SocketAddr, ceiling: Duration) -> bool {
    matches!(timeout(ceiling, TcpStream::connect(addr)).await, Ok(Ok(_)))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    async fn free_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    }

    #[tokio::test]
    async fn probe_reports_listening_port_only() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let open = listener.local_addr().unwrap().port();
        let closed = free_port().await;

        let prober = TcpConnectProber::new(Duration::from_millis(500));
        let findings = prober.probe(Ipv4Addr::LOCALHOST, &[closed, open]).await;

        assert_eq!(findings, vec![PortFinding::open(open)]);
    }

    #[tokio::test]
    async fn probe_with_no_ports_is_empty() {
        let prober = TcpConnectProber::new(Duration::from_millis(500));
        assert!(prober.probe(Ipv4Addr::LOCALHOST, &[]).await.is_empty());
    }

    #[tokio::test]
    #[ignore]
    async fn handshake_probe_should_timeout_on_unroutable_ip() {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 1)), 554);
        assert!(!handshake_probe(addr, Duration::from_millis(500)).await);
    }
}
