//! Process and binding domain models.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A running process as seen at listing time.
///
/// The pid may be recycled, or the process may exit, at any point after the
/// listing was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
    /// Not every executable path is readable without elevated privileges.
    pub executable_path: Option<PathBuf>,
}

impl ProcessRecord {
    pub fn new(pid: u32, name: impl Into<String>, executable_path: Option<PathBuf>) -> Self {
        Self {
            pid,
            name: name.into(),
            executable_path,
        }
    }

    /// Case-insensitive substring match on the process name.
    pub fn matches_name(&self, filter: &str) -> bool {
        self.name.to_lowercase().contains(&filter.to_lowercase())
    }
}

/// Everything the binding tool needs for one launch.
///
/// Built right before launch and consumed by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingRequest {
    /// The running instance the executable path was taken from.
    pub pid: u32,
    pub executable_path: PathBuf,
    pub interface_name: String,
    pub address: Ipv4Addr,
}

/// Outcome of a successful bind.
///
/// Success means the OS accepted the launch, not that the binding took effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindReceipt {
    pub interface_name: String,
    pub address: Ipv4Addr,
    pub executable_path: PathBuf,
    /// PID of the launched binding tool, when the OS reports one.
    pub launched_pid: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_name() {
        let record = ProcessRecord::new(42, "Firefox.exe", None);
        assert!(record.matches_name("firefox"));
        assert!(record.matches_name("FOX"));
        assert!(!record.matches_name("chrome"));
    }
}
