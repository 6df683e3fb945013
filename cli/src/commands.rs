pub mod advise;
pub mod cameras;
pub mod interfaces;
pub mod scan;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lensr_common::config::DEFAULT_REGISTRY_FILE;

#[derive(Parser)]
#[command(name = "lensr")]
#[command(about = "Finds IP cameras on the local network and keeps track of them.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Camera registry file
    #[arg(long, global = true, env = "LENSR_REGISTRY", default_value = DEFAULT_REGISTRY_FILE)]
    pub registry: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the interfaces a scan can run on
    #[command(alias = "i")]
    Interfaces,
    /// Sweep the local /24 and probe every host for camera streams
    #[command(alias = "s")]
    Scan {
        /// Interface to scan from (defaults to the first candidate)
        #[arg(short, long)]
        interface: Option<String>,
        /// Use an nmap SYN scan instead of plain TCP connects
        #[arg(long)]
        deep: bool,
        /// Store every confirmed camera in the registry
        #[arg(long)]
        save: bool,
        /// Hosts probed at the same time
        #[arg(short, long, default_value_t = 32)]
        concurrency: usize,
    },
    /// Manage saved cameras
    #[command(alias = "c")]
    Cameras {
        #[command(subcommand)]
        action: CameraAction,
    },
    /// Show how a saved camera can be reached from outside the LAN
    #[command(alias = "a")]
    Advise { id: u64 },
}

#[derive(Subcommand)]
pub enum CameraAction {
    /// Show every saved camera
    #[command(alias = "ls")]
    List,
    /// Save a camera by URL
    Add {
        name: String,
        url: String,
        /// Address on the LAN (defaults to the URL host)
        #[arg(long)]
        local_ip: Option<String>,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Delete a saved camera
    #[command(alias = "rm")]
    Remove { id: u64 },
    /// Re-test saved cameras (all of them when no id is given)
    Verify { id: Option<u64> },
    /// Rename or re-describe a saved camera
    Edit {
        id: u64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
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

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_line_is_well_formed() {
        CommandLine::command().debug_assert();
    }

    #[test]
    fn scan_alias_and_flags_parse() {
        let cli = CommandLine::try_parse_from(["lensr", "s", "--deep", "-i", "eth0", "--save"]).unwrap();
        match cli.command {
            Commands::Scan { interface, deep, save, concurrency } => {
                assert_eq!(interface.as_deref(), Some("eth0"));
                assert!(deep);
                assert!(save);
                assert_eq!(concurrency, 32);
            }
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn registry_flag_is_global() {
        let cli = CommandLine::try_parse_from(["lensr", "c", "ls", "--registry", "/tmp/x.json"]).unwrap();
        assert_eq!(cli.registry, PathBuf::from("/tmp/x.json"));
        assert!(matches!(cli.command, Commands::Cameras { action: CameraAction::List }));
    }

    #[test]
    fn verify_id_is_optional() {
        let cli = CommandLine::try_parse_from(["lensr", "cameras", "verify"]).unwrap();
        assert!(matches!(cli.command, Commands::Cameras { action: CameraAction::Verify { id: None } }));
    }
}
