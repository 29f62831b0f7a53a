//! Interface inventory port (interface).

use crate::domain::InterfaceRecord;
use crate::error::Result;

/// Port for querying the OS network interfaces.
pub trait InterfaceInventoryPort: Send + Sync {
    /// List all interfaces with their addresses, in OS-reported order.
    ///
    /// Fails with `Error::PlatformQuery` when the OS cannot be queried;
    /// an empty list means the OS reported no interfaces.
    fn list_interfaces(&self) -> Result<Vec<InterfaceRecord>>;
}
