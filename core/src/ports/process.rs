//! Process locator port (interface).

use std::path::PathBuf;

use crate::domain::ProcessRecord;
use crate::error::Result;

/// Port for enumerating running processes.
pub trait ProcessLocatorPort: Send + Sync {
    /// List running processes.
    ///
    /// Best effort: processes that cannot be inspected are skipped.
    fn list_processes(&self) -> Result<Vec<ProcessRecord>>;

    /// Look up the executable path of `pid` at call time.
    ///
    /// Fails with `Error::NoSuchProcess` when the process has exited.
    fn resolve_executable_path(&self, pid: u32) -> Result<PathBuf>;

    /// First PID whose process name equals `name` (case-insensitive).
    fn find_by_name(&self, name: &str) -> Result<Option<u32>> {
        Ok(self
            .list_processes()?
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| p.pid))
    }
}
