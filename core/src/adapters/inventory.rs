//! Interface inventory backed by the OS address table.

use std::collections::HashMap;
use std::net::IpAddr;

use tracing::debug;

use crate::domain::{InterfaceAddress, InterfaceRecord};
use crate::error::{Error, Result};
use crate::ports::InterfaceInventoryPort;

/// Reads interfaces and addresses through `getifaddrs` / `GetAdaptersAddresses`.
#[derive(Debug, Default)]
pub struct SystemInventory;

impl SystemInventory {
    pub fn new() -> Self {
        Self
    }
}

impl InterfaceInventoryPort for SystemInventory {
    fn list_interfaces(&self) -> Result<Vec<InterfaceRecord>> {
        let entries = get_if_addrs::get_if_addrs()
            .map_err(|e| Error::PlatformQuery(format!("Failed to list interfaces: {}", e)))?;

        let names = display_names();
        let records = group_by_interface(entries.into_iter().map(|i| {
            let ip = i.ip();
            (display_name(i.name, &names), ip)
        }));
        debug!(count = records.len(), "Listed interfaces");
        Ok(records)
    }
}

/// Operator-facing name for an OS interface id. Ids match case-insensitively.
fn display_name(id: String, names: &HashMap<String, String>) -> String {
    names.get(&id.to_ascii_lowercase()).cloned().unwrap_or(id)
}

/// Adapter id (`{GUID}`) to alias (`Ethernet`, or the `--name` given to the
/// adapter tool). Keys are lowercase.
#[cfg(windows)]
fn display_names() -> HashMap<String, String> {
    use tracing::warn;
    use windows::Win32::Foundation::{ERROR_BUFFER_OVERFLOW, ERROR_SUCCESS};
    use windows::Win32::NetworkManagement::IpHelper::{
        GetAdaptersAddresses, GAA_FLAG_INCLUDE_PREFIX, IP_ADAPTER_ADDRESSES_LH,
    };
    use windows::Win32::Networking::WinSock::AF_UNSPEC;

    let mut names = HashMap::new();
    let mut size: u32 = 16 * 1024;
    let mut buffer: Vec<u64>;
    let mut attempts = 0;

    // The table can grow between two calls
    loop {
        buffer = vec![0u64; (size as usize).div_ceil(8)];
        let table = buffer.as_mut_ptr() as *mut IP_ADAPTER_ADDRESSES_LH;
        let rc = unsafe {
            GetAdaptersAddresses(
                AF_UNSPEC.0 as u32,
                GAA_FLAG_INCLUDE_PREFIX,
                None,
                Some(table),
                &mut size,
            )
        };
        if rc == ERROR_SUCCESS.0 {
            break;
        }
        attempts += 1;
        if rc != ERROR_BUFFER_OVERFLOW.0 || attempts >= 3 {
            warn!(code = rc, "Adapter aliases unavailable, listing adapter ids");
            return names;
        }
    }

    let mut current = buffer.as_ptr() as *const IP_ADAPTER_ADDRESSES_LH;
    while !current.is_null() {
        let adapter = unsafe { &*current };
        if !adapter.AdapterName.is_null() && !adapter.FriendlyName.is_null() {
            let id = unsafe { adapter.AdapterName.to_string() }.unwrap_or_default();
            let alias = unsafe { adapter.FriendlyName.to_string() }.unwrap_or_default();
            if !id.is_empty() && !alias.is_empty() {
                names.insert(id.to_ascii_lowercase(), alias);
            }
        }
        current = adapter.Next;
    }

    names
}

/// `getifaddrs` already reports the names operators use.
#[cfg(not(windows))]
fn display_names() -> HashMap<String, String> {
    HashMap::new()
}

/// Fold one-entry-per-address rows into one record per interface.
///
/// Interfaces keep the order in which they first appear, addresses keep
/// their order within each interface.
fn group_by_interface(entries: impl IntoIterator<Item = (String, IpAddr)>) -> Vec<InterfaceRecord> {
    let mut records: Vec<InterfaceRecord> = Vec::new();

    for (name, ip) in entries {
        match records.iter_mut().find(|r| r.name == name) {
            Some(record) => record.addresses.push(InterfaceAddress::new(ip)),
            None => records.push(InterfaceRecord {
                name,
                addresses: vec![InterfaceAddress::new(ip)],
            }),
        }
    }

    records
}
