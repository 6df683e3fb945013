mod commands;
mod terminal;

use commands::{CommandLine, Commands, advise, cameras, interfaces, scan};
use lensr_common::config::{Config, ProbeDepth};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();
    print::banner();

    let mut cfg = Config {
        registry_path: commands.registry,
        ..Config::default()
    };

    match commands.command {
        Commands::Interfaces => interfaces::interfaces(),
        Commands::Scan {
            interface,
            deep,
            save,
            concurrency,
        } => {
            print::header("starting scanner");
            if deep {
                cfg.depth = ProbeDepth::Deep;
            }
            cfg.concurrency = concurrency.max(1);
            scan::scan(interface, save, &cfg).await
        }
        Commands::Cameras { action } => cameras::cameras(action, &cfg).await,
        Commands::Advise { id } => advise::advise(id, &cfg).await,
    }
}
