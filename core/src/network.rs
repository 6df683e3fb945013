pub mod arp;
pub mod channel;
pub mod deep;
pub mod tcp;
