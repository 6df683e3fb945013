//! # Lensr Common
//!
//! Domain models and collaborator contracts shared by the engine (`lensr-core`)
//! and the presentation layer (`lensr-cli`).
//!
//! * **[`network`]**: local interfaces, /24 derivation and discovered hosts.
//! * **[`camera`]**: credentials, stream candidates and registry records.
//! * **[`scanning`]**: traits the scan pipeline is built from.
//! * **[`vendors`]**: MAC to manufacturer resolution contract.

pub mod camera;
pub mod config;
pub mod error;
pub mod network;
pub mod scanning;
pub mod vendors;

#[doc(hidden)]
pub use tracing as __tracing;

/// Target used for events that should be rendered as a success line.
pub const SUCCESS_TARGET: &str = "lensr::success";

/// Target used for raw output lines that bypass the level prefix.
pub const PRINT_TARGET: &str = "lensr::print";

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::__tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "lensr::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::__tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::__tracing::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::__tracing::debug!($($arg)*)
    };
}
