use pnet::util::MacAddr;

use crate::network::host::UNKNOWN_VENDOR;

/// Defines the contract for resolving device manufacturers from MAC addresses.
pub trait VendorRepository: Send + Sync {
    /// Retrieves the vendor name for a given MAC address.
    ///
    /// # Returns
    /// * `Some(String)` - The name of the vendor if found.
    /// * `None` - If the OUI is unknown or the lookup failed.
    fn get_vendor(&self, mac: MacAddr) -> Option<String>;

    /// Like [`get_vendor`](Self::get_vendor) but always yields a name.
    fn vendor_or_unknown(&self, mac: MacAddr) -> String {
        self.get_vendor(mac)
            .unwrap_or_else(|| UNKNOWN_VENDOR.to_string())
    }
}
