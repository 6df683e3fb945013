//! Error taxonomy of the discovery engine.
//!
//! Transient network failures never surface here; they are folded into
//! [`ProbeOutcome`](crate::scanning::ProbeOutcome) values by the probers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a whole scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The raw link-layer socket could not be opened (missing root / CAP_NET_RAW).
    #[error("insufficient privileges to open a raw socket on {interface}: {source}")]
    Privilege {
        interface: String,
        #[source]
        source: io::Error,
    },
    #[error("no non-loopback IPv4 interface available")]
    NoInterface,
    #[error("interface '{0}' not found")]
    InterfaceNotFound(String),
    #[error("interface '{0}' has no usable link-layer address")]
    NoMacAddress(String),
    #[error("failed to open datalink channel on {interface}: {reason}")]
    Channel { interface: String, reason: String },
    #[error("scan was cancelled before the sweep finished")]
    Cancelled,
    #[error("scan task failed: {0}")]
    Join(String),
}

/// Failures surfaced by mutating registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to persist registry to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize registry: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("no saved camera with id {0}")]
    NotFound(u64),
}

/// Why a single probe attempt did not produce an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("timed out")]
    Timeout,
    #[error("connection refused")]
    Refused,
    #[error("host unreachable")]
    Unreachable,
    #[error("unexpected protocol response")]
    Protocol,
    #[error("i/o error")]
    Io,
}

impl From<&io::Error> for ProbeError {
    fn from(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => ProbeError::Timeout,
            io::ErrorKind::ConnectionRefused => ProbeError::Refused,
            io::ErrorKind::HostUnreachable | io::ErrorKind::NetworkUnreachable => {
                ProbeError::Unreachable
            }
            _ => ProbeError::Io,
        }
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
