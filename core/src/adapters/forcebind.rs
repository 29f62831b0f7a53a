//! Detached launcher for a ForceBindIP-compatible binding tool.
//!
//! Command form: `<tool> <ipv4 address> <executable path>`.
//! The tool starts a fresh instance of the executable with its outbound
//! sockets bound to the address. Its output is not consumed.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::domain::BindingRequest;
use crate::error::{BindError, Result};
use crate::ports::BindLauncherPort;

#[cfg(windows)]
const DETACHED_PROCESS: u32 = 0x0000_0008;
#[cfg(windows)]
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

/// Launches the binding tool without waiting for it.
#[derive(Debug, Clone)]
pub struct ForceBindLauncher {
    tool_path: PathBuf,
}

impl ForceBindLauncher {
    pub fn new(tool_path: impl Into<PathBuf>) -> Self {
        Self {
            tool_path: tool_path.into(),
        }
    }

    /// The path to execute: the configured path if it exists, else a `PATH` lookup.
    fn locate(&self) -> Option<PathBuf> {
        if self.tool_path.exists() {
            return Some(self.tool_path.clone());
        }
        which::which(&self.tool_path).ok()
    }

    fn command(program: &Path, request: &BindingRequest) -> Command {
        let mut cmd = Command::new(program);
        cmd.arg(request.address.to_string())
            .arg(&request.executable_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        detach(&mut cmd);
        cmd
    }
}

#[cfg(windows)]
fn detach(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(unix)]
fn detach(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    cmd.process_group(0);
}

impl BindLauncherPort for ForceBindLauncher {
    fn tool_path(&self) -> &Path {
        &self.tool_path
    }

    fn is_available(&self) -> bool {
        self.locate().is_some()
    }

    fn launch(&self, request: BindingRequest) -> Result<Option<u32>> {
        let program = self
            .locate()
            .ok_or_else(|| BindError::ToolMissing(self.tool_path.clone()))?;

        debug!(
            tool = %program.display(),
            address = %request.address,
            exe = %request.executable_path.display(),
            "Launching binding tool"
        );

        let mut child = Self::command(&program, &request)
            .spawn()
            .map_err(|e| BindError::LaunchFailed(e.to_string()))?;
        let pid = child.id();

        info!(
            pid = pid,
            interface = %request.interface_name,
            address = %request.address,
            source_pid = request.pid,
            "Binding tool launched"
        );

        // Not supervised, only reaped once it exits
        std::thread::Builder::new()
            .name(format!("ifbind-reap-{}", pid))
            .spawn(move || match child.wait() {
                Ok(status) => debug!(pid = pid, status = %status, "Binding tool exited"),
                Err(e) => debug!(pid = pid, error = %e, "Could not wait for binding tool"),
            })
            .map_err(|e| BindError::LaunchFailed(format!("reaper thread: {}", e)))?;

        Ok(Some(pid))
    }
}
