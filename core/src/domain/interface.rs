//! Network interface domain models.

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

// ============================================================================
// AddressFamily
// ============================================================================

/// Address family of an interface address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    /// Get the display name for this family.
    pub fn display_name(&self) -> &'static str {
        match self {
            AddressFamily::Ipv4 => "IPv4",
            AddressFamily::Ipv6 => "IPv6",
        }
    }
}

// ============================================================================
// InterfaceAddress
// ============================================================================

/// A single address bound to an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceAddress {
    pub family: AddressFamily,
    pub address: IpAddr,
}

impl InterfaceAddress {
    pub fn new(address: IpAddr) -> Self {
        let family = match address {
            IpAddr::V4(_) => AddressFamily::Ipv4,
            IpAddr::V6(_) => AddressFamily::Ipv6,
        };
        Self { family, address }
    }

    /// The address as IPv4, if it is one.
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        match self.address {
            IpAddr::V4(addr) => Some(addr),
            IpAddr::V6(_) => None,
        }
    }
}

impl From<IpAddr> for InterfaceAddress {
    fn from(address: IpAddr) -> Self {
        Self::new(address)
    }
}

// ============================================================================
// InterfaceRecord
// ============================================================================

/// A network interface and the addresses bound to it, in OS-reported order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceRecord {
    pub name: String,
    pub addresses: Vec<InterfaceAddress>,
}

impl InterfaceRecord {
    pub fn new(name: impl Into<String>, addresses: impl IntoIterator<Item = IpAddr>) -> Self {
        Self {
            name: name.into(),
            addresses: addresses.into_iter().map(InterfaceAddress::new).collect(),
        }
    }

    /// First IPv4 address in listing order.
    ///
    /// An interface with several IPv4 addresses only ever binds through the first.
    pub fn first_ipv4(&self) -> Option<Ipv4Addr> {
        self.addresses.iter().find_map(InterfaceAddress::ipv4)
    }
}

/// Find the first IPv4 address of the interface called `name`.
pub fn find_ipv4(records: &[InterfaceRecord], name: &str) -> Option<Ipv4Addr> {
    records
        .iter()
        .find(|r| r.name == name)
        .and_then(InterfaceRecord::first_ipv4)
}

/// First IPv4 address across all interfaces that is not link-local (169.254/16).
pub fn primary_ipv4(records: &[InterfaceRecord]) -> Option<Ipv4Addr> {
    records
        .iter()
        .flat_map(|r| r.addresses.iter())
        .filter_map(InterfaceAddress::ipv4)
        .find(|addr| !addr.is_link_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    fn v4(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(a, b, c, d))
    }

    #[test]
    fn test_family_from_address() {
        let addr = InterfaceAddress::new(IpAddr::V6(Ipv6Addr::LOCALHOST));
        assert_eq!(addr.family, AddressFamily::Ipv6);
        assert_eq!(addr.family.display_name(), "IPv6");
        assert!(addr.ipv4().is_none());

        let addr = InterfaceAddress::new(v4(10, 0, 0, 5));
        assert_eq!(addr.family, AddressFamily::Ipv4);
        assert_eq!(addr.ipv4(), Some(Ipv4Addr::new(10, 0, 0, 5)));
    }

    #[test]
    fn test_first_ipv4_skips_ipv6_and_keeps_order() {
        let record = InterfaceRecord::new(
            "eth0",
            [IpAddr::V6(Ipv6Addr::LOCALHOST), v4(10, 0, 0, 5), v4(10, 0, 0, 6)],
        );
        assert_eq!(record.first_ipv4(), Some(Ipv4Addr::new(10, 0, 0, 5)));
    }

    #[test]
    fn test_first_ipv4_none() {
        let record = InterfaceRecord::new("tun0", [IpAddr::V6(Ipv6Addr::LOCALHOST)]);
        assert!(record.first_ipv4().is_none());
    }

    #[test]
    fn test_find_ipv4_by_name() {
        let records = vec![
            InterfaceRecord::new("lo", [v4(127, 0, 0, 1)]),
            InterfaceRecord::new("eth0", [v4(192, 168, 1, 10)]),
        ];
        assert_eq!(find_ipv4(&records, "eth0"), Some(Ipv4Addr::new(192, 168, 1, 10)));
        assert!(find_ipv4(&records, "wlan0").is_none());
    }

    #[test]
    fn test_primary_ipv4_skips_link_local() {
        let records = vec![
            InterfaceRecord::new("tap0", [v4(169, 254, 12, 1)]),
            InterfaceRecord::new("eth0", [v4(192, 168, 1, 10)]),
        ];
        assert_eq!(primary_ipv4(&records), Some(Ipv4Addr::new(192, 168, 1, 10)));
        assert!(primary_ipv4(&records[..1]).is_none());
    }
}
