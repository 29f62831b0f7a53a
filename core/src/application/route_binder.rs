//! Binding a process to an interface address.

use tracing::{debug, info};

use crate::domain::{find_ipv4, BindReceipt, BindingRequest};
use crate::error::{BindError, Error, Result};
use crate::ports::{
    AdapterToolPort, BindLauncherPort, InterfaceInventoryPort, ProcessLocatorPort,
};

use super::InterfaceService;

/// Application service that relaunches a process bound to an interface's address.
///
/// The selected pid is only used to recover the executable path: the binding
/// tool starts a *new* instance of that executable and the running instance
/// is left alone.
pub struct RouteBinder<P: ProcessLocatorPort, L: BindLauncherPort> {
    locator: P,
    launcher: L,
}

impl<P: ProcessLocatorPort, L: BindLauncherPort> RouteBinder<P, L> {
    pub fn new(locator: P, launcher: L) -> Self {
        Self { locator, launcher }
    }

    pub fn locator(&self) -> &P {
        &self.locator
    }

    /// Launch a fresh copy of `pid`'s executable bound to the first IPv4
    /// address of the interface numbered `ordinal`.
    ///
    /// Success means the OS accepted the launch; the launched process is not
    /// waited on or supervised.
    pub fn bind<I, A>(
        &self,
        interfaces: &InterfaceService<I, A>,
        pid: u32,
        ordinal: usize,
    ) -> Result<BindReceipt>
    where
        I: InterfaceInventoryPort,
        A: AdapterToolPort,
    {
        debug!(pid = pid, ordinal = ordinal, "Binding process");

        let interface_name = interfaces.resolve(ordinal).map_err(|e| match e {
            Error::InvalidOrdinal { ordinal, count } => {
                Error::Bind(BindError::InvalidInterface { ordinal, count })
            }
            other => other,
        })?;

        let executable_path = self
            .locator
            .resolve_executable_path(pid)
            .map_err(|e| match e {
                Error::NoSuchProcess(pid) => Error::Bind(BindError::ProcessVanished(pid)),
                Error::ExecutableUnavailable(pid) => {
                    Error::Bind(BindError::ExecutableUnavailable(pid))
                }
                other => other,
            })?;

        let records = interfaces.list_interfaces()?;
        let address = find_ipv4(&records, &interface_name)
            .ok_or_else(|| BindError::NoIpv4Address(interface_name.clone()))?;

        if !self.launcher.is_available() {
            return Err(BindError::ToolMissing(self.launcher.tool_path().to_path_buf()).into());
        }

        let request = BindingRequest {
            pid,
            executable_path: executable_path.clone(),
            interface_name: interface_name.clone(),
            address,
        };

        let launched_pid = self.launcher.launch(request).map_err(|e| match e {
            Error::Bind(reason) => Error::Bind(reason),
            other => Error::Bind(BindError::LaunchFailed(other.to_string())),
        })?;

        info!(
            interface = %interface_name,
            address = %address,
            exe = %executable_path.display(),
            "Application launched through interface"
        );

        Ok(BindReceipt {
            interface_name,
            address,
            executable_path,
            launched_pid,
        })
    }
}
