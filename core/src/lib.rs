//! # Lensr Core
//!
//! The discovery engine: link-layer sweep, port probing, vendor lookup,
//! stream access probing, the durable camera registry and the remote-access
//! advisor. Presentation lives in `lensr-cli`.

pub mod access;
pub mod advisor;
pub mod network;
pub mod registry;
pub mod scanner;
pub mod vendors;

pub use access::{AccessOutcome, AccessProber, NetworkStreamTester};
pub use advisor::{AccessKind, AccessMethod, HttpPublicIpLookup};
pub use registry::{CameraRegistry, Verification};
pub use scanner::{ScanEngine, ScanEvent, ScanHandle, ScanReport, ScanRequest, spawn_scan};
