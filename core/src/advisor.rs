//! Suggestions for reaching a saved camera from outside the LAN.

use std::fmt;
use std::net::Ipv4Addr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use lensr_common::camera::{CandidateParseError, SavedCamera, StreamCandidate};
use lensr_common::scanning::PublicIpLookup;
use lensr_common::warn;

pub const PUBLIC_IP_ENDPOINT: &str = "https://httpbin.org/ip";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccessKind {
    Local,
    PortForward,
    Tunnel,
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AccessKind::Local => "Local access",
            AccessKind::PortForward => "Public IP + port forwarding",
            AccessKind::Tunnel => "TCP tunnel",
        };
        f.write_str(label)
    }
}

/// One way of reaching the camera. `url` is descriptive text for tunnels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessMethod {
    pub kind: AccessKind,
    pub url: String,
    pub description: String,
    pub note: String,
}

/// Lists access methods for `stream`: local, port forwarding when `public_ip`
/// is known, then tunnel. Scheme, path and credentials are kept as saved.
pub fn describe(
    local_ip: &str,
    stream: &StreamCandidate,
    public_ip: Option<Ipv4Addr>,
) -> Vec<AccessMethod> {
    let port = stream.port;
    let mut methods = vec![AccessMethod {
        kind: AccessKind::Local,
        url: relocated(stream, local_ip),
        description: "Only works from inside the local network".to_string(),
        note: "Reference URL for local testing".to_string(),
    }];

    if let Some(public_ip) = public_ip {
        methods.push(AccessMethod {
            kind: AccessKind::PortForward,
            url: relocated(stream, &public_ip.to_string()),
            description: "Requires a port forwarding rule on the router".to_string(),
            note: format!("Forward port {port} to {local_ip}"),
        });
    }

    methods.push(AccessMethod {
        kind: AccessKind::Tunnel,
        url: format!("Expose port {port} with a TCP tunnel service"),
        description: format!("e.g. `ngrok tcp {local_ip}:{port}`"),
        note: "Temporary access from the internet without touching the router".to_string(),
    });

    methods
}

fn relocated(stream: &StreamCandidate, host: &str) -> String {
    StreamCandidate {
        host: host.to_string(),
        ..stream.clone()
    }
    .url()
}

/// Parses the saved URL, looks up the public address and calls [`describe`].
///
/// A failed lookup only drops the port forwarding entry.
pub async fn advise(
    camera: &SavedCamera,
    lookup: &dyn PublicIpLookup,
) -> Result<Vec<AccessMethod>, CandidateParseError> {
    let stream = StreamCandidate::parse(&camera.url)?;

    let public_ip = match lookup.public_ip().await {
        Ok(ip) => Some(ip),
        Err(e) => {
            warn!("Public IP lookup failed: {e:#}");
            None
        }
    };

    Ok(describe(&camera.local_ip, &stream, public_ip))
}

#[derive(Deserialize)]
struct OriginResponse {
    origin: String,
}

/// Asks an echo service which address our requests come from.
pub struct HttpPublicIpLookup {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPublicIpLookup {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_endpoint(PUBLIC_IP_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(LOOKUP_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl PublicIpLookup for HttpPublicIpLookup {
    async fn public_ip(&self) -> anyhow::Result<Ipv4Addr> {
        let body: OriginResponse = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .with_context(|| format!("requesting {}", self.endpoint))?
            .error_for_status()?
            .json()
            .await
            .context("decoding public ip response")?;
        parse_origin(&body.origin)
    }
}

/// `origin` may list several comma separated hops; the first is ours.
fn parse_origin(origin: &str) -> anyhow::Result<Ipv4Addr> {
    let first = origin.split(',').next().unwrap_or_default().trim();
    first
        .parse()
        .map_err(|_| anyhow!("unexpected origin value: {origin}"))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
