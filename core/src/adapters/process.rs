//! Process locator backed by `sysinfo`.

use std::path::PathBuf;

use parking_lot::Mutex;
use sysinfo::{Pid, Process, ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System, UpdateKind};
use tracing::debug;

use crate::domain::ProcessRecord;
use crate::error::{Error, Result};
use crate::ports::ProcessLocatorPort;

/// Enumerates processes through the OS process table.
pub struct SystemProcessLocator {
    system: Mutex<System>,
}

impl SystemProcessLocator {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }
}

impl Default for SystemProcessLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessLocatorPort for SystemProcessLocator {
    fn list_processes(&self) -> Result<Vec<ProcessRecord>> {
        let mut system = self.system.lock();
        system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::new().with_exe(UpdateKind::OnlyIfNotSet),
        );

        let mut processes: Vec<ProcessRecord> = system
            .processes()
            .iter()
            .filter(|(_, process)| is_alive(process) && process.thread_kind().is_none())
            .map(|(pid, process)| {
                ProcessRecord::new(
                    pid.as_u32(),
                    process.name().to_string_lossy(),
                    executable_of(process),
                )
            })
            .collect();

        processes.sort_by_key(|p| p.pid);
        debug!(count = processes.len(), "Listed processes");
        Ok(processes)
    }

    fn resolve_executable_path(&self, pid: u32) -> Result<PathBuf> {
        let sys_pid = Pid::from_u32(pid);
        let mut system = self.system.lock();
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[sys_pid]),
            true,
            ProcessRefreshKind::new().with_exe(UpdateKind::Always),
        );

        let process = system
            .process(sys_pid)
            .filter(|process| is_alive(process))
            .ok_or_else(|| {
                debug!(pid = pid, "Process not found");
                Error::NoSuchProcess(pid)
            })?;

        executable_of(process).ok_or(Error::ExecutableUnavailable(pid))
    }
}

fn is_alive(process: &Process) -> bool {
    !matches!(process.status(), ProcessStatus::Zombie | ProcessStatus::Dead)
}

fn executable_of(process: &Process) -> Option<PathBuf> {
    process
        .exe()
        .filter(|path| !path.as_os_str().is_empty())
        .map(|path| path.to_path_buf())
}
