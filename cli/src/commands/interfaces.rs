use lensr_common::network::interface;
use lensr_common::warn;

use crate::mprint;
use crate::terminal::{format, print};

pub fn interfaces() -> anyhow::Result<()> {
    let candidates = interface::list_interfaces();
    if candidates.is_empty() {
        warn!("No non-loopback IPv4 interface found");
        return Ok(());
    }

    print::header("scan candidates");
    for (idx, intf) in candidates.iter().enumerate() {
        print::tree_head(idx, &intf.name);
        print::as_tree_one_level(format::interface_to_details(intf));
        if idx + 1 != candidates.len() {
            mprint!();
        }
    }
    print::end_of_program();
    Ok(())
}
