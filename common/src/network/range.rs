use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;

/// Inclusive range of IPv4 addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn to_iter(&self) -> impl Iterator<Item = Ipv4Addr> {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        let addr: u32 = addr.into();
        u32::from(self.start_addr) <= addr && addr <= u32::from(self.end_addr)
    }

    pub fn len(&self) -> usize {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        end.saturating_sub(start) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        self.start_addr > self.end_addr
    }
}

/// Usable host addresses of `net` (network and broadcast excluded).
pub fn host_range(net: Ipv4Network) -> Ipv4Range {
    let net_u32: u32 = u32::from(net.network());
    let broadcast_u32: u32 = u32::from(net.broadcast());

    let start_u32 = net_u32.saturating_add(1);
    let end_u32 = broadcast_u32.saturating_sub(1);

    if start_u32 <= end_u32 {
        Ipv4Range::new(Ipv4Addr::from(start_u32), Ipv4Addr::from(end_u32))
    } else {
        Ipv4Range::new(net.network(), net.broadcast())
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

    #[test]
    fn host_range_of_slash_24_skips_network_and_broadcast() {
        let net = Ipv4Network::new(Ipv4Addr::new(192, 168, 1, 0), 24).unwrap();
        let range = host_range(net);
        assert_eq!(range.start_addr, Ipv4Addr::new(192, 168, 1, 1));
        assert_eq!(range.end_addr, Ipv4Addr::new(192, 168, 1, 254));
        assert_eq!(range.len(), 254);
        assert_eq!(range.to_iter().count(), 254);
    }

    #[test]
    fn host_range_of_slash_32_keeps_the_address() {
        let net = Ipv4Network::new(Ipv4Addr::new(10, 0, 0, 7), 32).unwrap();
        let range = host_range(net);
        assert_eq!(range.start_addr, Ipv4Addr::new(10, 0, 0, 7));
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn contains_is_inclusive() {
        let range = Ipv4Range::new(Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 3));
        assert!(range.contains(Ipv4Addr::new(10, 0, 0, 1)));
        assert!(range.contains(Ipv4Addr::new(10, 0, 0, 3)));
        assert!(!range.contains(Ipv4Addr::new(10, 0, 0, 4)));
    }
}
