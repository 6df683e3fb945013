use std::io;
use std::time::Duration;

use pnet::datalink::{self, Channel, Config, DataLinkReceiver, DataLinkSender, NetworkInterface};
use tokio::sync::mpsc;

use lensr_common::error::ScanError;

const READ_TIMEOUT: Duration = Duration::from_millis(50);

/// Sender half plus a queue fed by a blocking capture thread.
pub struct EthernetHandle {
    pub tx: Box<dyn DataLinkSender>,
    pub rx: mpsc::UnboundedReceiver<Vec<u8>>,
}

/// Opens a layer 2 channel on `intf` and forwards every received frame to an async queue.
///
/// The capture thread exits once the receiving side of the queue is dropped.
pub fn start_capture(intf: &NetworkInterface) -> Result<EthernetHandle, ScanError> {
    let (tx, mut rx_socket) = open_eth_channel(intf, &get_config(), datalink::channel)?;
    let (queue_tx, queue_rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        loop {
            match rx_socket.next() {
                Ok(frame) => {
                    if queue_tx.send(frame.to_vec()).is_err() {
                        break;
                    }
                }
                Err(_) if queue_tx.is_closed() => break,
                Err(_) => {}
            }
        }
    });

    Ok(EthernetHandle { tx, rx: queue_rx })
}

pub(crate) fn open_eth_channel<F>(
    intf: &NetworkInterface,
    cfg: &Config,
    channel_opener: F,
) -> Result<(Box<dyn DataLinkSender>, Box<dyn DataLinkReceiver>), ScanError>
where
    F: FnOnce(&NetworkInterface, Config) -> io::Result<Channel>,
{
    let ch = channel_opener(intf, *cfg).map_err(|source| match source.kind() {
        io::ErrorKind::PermissionDenied => ScanError::Privilege {
            interface: intf.name.clone(),
            source,
        },
        _ => ScanError::Channel {
            interface: intf.name.clone(),
            reason: source.to_string(),
        },
    })?;

    match ch {
        Channel::Ethernet(tx, rx) => Ok((tx, rx)),
        _ => Err(ScanError::Channel {
            interface: intf.name.clone(),
            reason: "non-ethernet channel".to_string(),
        }),
    }
}

fn get_config() -> Config {
    Config {
        read_timeout: Some(READ_TIMEOUT),
        ..Default::default()
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
