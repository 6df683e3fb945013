use std::path::PathBuf;
use std::time::Duration;

use crate::camera::CAMERA_PORTS;

pub const DEFAULT_REGISTRY_FILE: &str = "cameras.json";

/// How open ports are determined for each swept host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeDepth {
    /// Plain TCP connect against every candidate port.
    #[default]
    Basic,
    /// SYN scan delegated to an external scanner.
    Deep,
}

pub struct Config {
    /// Listening window of the ARP sweep.
    pub sweep_window: Duration,
    /// Per-port TCP connect ceiling in basic mode.
    pub connect_timeout: Duration,
    /// Per-attempt ceiling for HTTP candidates.
    pub http_timeout: Duration,
    /// Per-attempt ceiling for RTSP candidates.
    pub rtsp_timeout: Duration,
    /// Upper bound of hosts processed at the same time.
    pub concurrency: usize,
    pub depth: ProbeDepth,
    pub ports: Vec<u16>,
    pub registry_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sweep_window: Duration::from_secs(2),
            connect_timeout: Duration::from_millis(500),
            http_timeout: Duration::from_secs(5),
            rtsp_timeout: Duration::from_secs(5),
            concurrency: 32,
            depth: ProbeDepth::Basic,
            ports: CAMERA_PORTS.to_vec(),
            registry_path: PathBuf::from(DEFAULT_REGISTRY_FILE),
        }
    }
}
