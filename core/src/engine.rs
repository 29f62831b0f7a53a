//! ifbind Engine - Central state and the operator-facing operations.
//!
//! The engine is the single logical actor of the library: every operation
//! runs to completion before the next one is accepted. Async adapter tool
//! calls are driven on a private current-thread runtime, so callers see a
//! plain synchronous API.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use tokio::runtime::{Builder, Runtime};
use tracing::warn;

use crate::adapters::{ForceBindLauncher, SystemInventory, SystemProcessLocator, TapCtl};
use crate::application::{InterfaceService, RouteBinder};
use crate::config::{Config, ConfigStore};
use crate::domain::{primary_ipv4, BindReceipt, InterfaceRecord, ProcessRecord};
use crate::error::{Error, Result};
use crate::ports::ProcessLocatorPort;

/// The main ifbind engine.
///
/// Holds the session's interface numbering and "new" markers. They live as
/// long as the engine and are never persisted.
pub struct IfBindEngine {
    interfaces: InterfaceService<SystemInventory, TapCtl>,
    binder: RouteBinder<SystemProcessLocator, ForceBindLauncher>,
    config: Config,
    runtime: Runtime,
}

impl IfBindEngine {
    /// Create an engine using the configuration at `~/.ifbind/config.json`.
    pub fn new() -> Result<Self> {
        let store = ConfigStore::new()?;
        let runtime = Self::build_runtime()?;
        let config = runtime.block_on(store.load())?;
        Ok(Self::assemble(config, runtime))
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        let runtime = Self::build_runtime()?;
        Ok(Self::assemble(config, runtime))
    }

    // Single-threaded runtime: there is exactly one logical actor
    fn build_runtime() -> Result<Runtime> {
        Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Config(format!("Failed to create runtime: {}", e)))
    }

    fn assemble(config: Config, runtime: Runtime) -> Self {
        let tapctl = TapCtl::new(config.adapter_tool_path.clone(), config.hardware_id.clone());
        let interfaces = InterfaceService::new(SystemInventory::new(), tapctl)
            .with_adapter_timeout(config.adapter_tool_timeout());
        let binder = RouteBinder::new(
            SystemProcessLocator::new(),
            ForceBindLauncher::new(config.bind_tool_path.clone()),
        );

        let engine = Self {
            interfaces,
            binder,
            config,
            runtime,
        };

        // Start numbered; a failed first listing can be retried with refresh
        if let Err(e) = engine.interfaces.refresh() {
            warn!(error = %e, "Initial interface listing failed");
        }

        engine
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // MARK: - Interfaces
    // =========================================================================

    /// Query the OS for interfaces and addresses without renumbering.
    pub fn list_interfaces(&self) -> Result<Vec<InterfaceRecord>> {
        self.interfaces.list_interfaces()
    }

    /// Renumber interfaces from a fresh OS listing.
    pub fn refresh_interfaces(&self) -> Result<()> {
        self.interfaces.refresh()
    }

    /// Labels like `"1. Ethernet"` or `"3. tap-work *new*"`, in ordinal order.
    pub fn interface_labels(&self) -> Vec<String> {
        self.interfaces.labels()
    }

    /// Resolve an ordinal from the latest refresh to an interface name.
    pub fn resolve_interface(&self, ordinal: usize) -> Result<String> {
        self.interfaces.resolve(ordinal)
    }

    /// Ordinal of `name` in the latest refresh.
    pub fn interface_ordinal(&self, name: &str) -> Option<usize> {
        self.interfaces.registry().ordinal_of(name)
    }

    /// Check if an interface was created in this session.
    pub fn is_new_interface(&self, name: &str) -> bool {
        self.interfaces.is_new(name)
    }

    /// Create a virtual adapter. Blocks until the adapter tool exits.
    pub fn create_interface(&self, name: &str) -> Result<()> {
        self.runtime
            .block_on(self.interfaces.create_interface(name))
    }

    /// Remove a virtual adapter. Blocks until the adapter tool exits.
    pub fn remove_interface(&self, name: &str) -> Result<()> {
        self.runtime
            .block_on(self.interfaces.remove_interface(name))
    }

    /// First non link-local IPv4 address on any interface.
    pub fn primary_address(&self) -> Result<Option<Ipv4Addr>> {
        let records = self.interfaces.list_interfaces()?;
        Ok(primary_ipv4(&records))
    }

    // =========================================================================
    // MARK: - Processes
    // =========================================================================

    /// List running processes, skipping those that cannot be inspected.
    pub fn list_processes(&self) -> Result<Vec<ProcessRecord>> {
        self.binder.locator().list_processes()
    }

    /// PID of the first process called `name`.
    pub fn find_process(&self, name: &str) -> Result<Option<u32>> {
        self.binder.locator().find_by_name(name)
    }

    /// Current executable path of `pid`.
    pub fn resolve_executable_path(&self, pid: u32) -> Result<PathBuf> {
        self.binder.locator().resolve_executable_path(pid)
    }

    // =========================================================================
    // MARK: - Binding
    // =========================================================================

    /// Relaunch `pid`'s executable bound to the interface numbered `ordinal`.
    pub fn bind(&self, pid: u32, ordinal: usize) -> Result<BindReceipt> {
        self.binder.bind(&self.interfaces, pid, ordinal)
    }
}
