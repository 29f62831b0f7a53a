//! Interface inventory, numbering and virtual adapter control.

use std::future::Future;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::domain::{InterfaceRecord, InterfaceRegistry};
use crate::error::{Error, Result};
use crate::ports::{AdapterToolPort, InterfaceInventoryPort, ToolOutput};

/// Application service for interface listing and adapter management.
///
/// Owns the session's `InterfaceRegistry` and re-synchronizes it after every
/// successful adapter creation or removal. The adapter tool's exit status is
/// the only source of truth for whether an operation worked; names are not
/// checked against the inventory beforehand.
pub struct InterfaceService<I: InterfaceInventoryPort, A: AdapterToolPort> {
    inventory: I,
    adapter_tool: A,
    adapter_timeout: Option<Duration>,
    registry: RwLock<InterfaceRegistry>,
}

impl<I: InterfaceInventoryPort, A: AdapterToolPort> InterfaceService<I, A> {
    /// Create a new interface service. The registry starts empty; call `refresh`.
    pub fn new(inventory: I, adapter_tool: A) -> Self {
        Self {
            inventory,
            adapter_tool,
            adapter_timeout: None,
            registry: RwLock::new(InterfaceRegistry::new()),
        }
    }

    /// Bound every adapter tool call. `None` waits for the tool indefinitely.
    pub fn with_adapter_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.adapter_timeout = timeout;
        self
    }

    pub fn inventory(&self) -> &I {
        &self.inventory
    }

    /// Query the inventory directly.
    pub fn list_interfaces(&self) -> Result<Vec<InterfaceRecord>> {
        self.inventory.list_interfaces()
    }

    /// Renumber interfaces from a fresh inventory listing.
    pub fn refresh(&self) -> Result<()> {
        let records = self.inventory.list_interfaces()?;
        debug!(count = records.len(), "Refreshing interface registry");
        self.registry.write().refresh(&records);
        Ok(())
    }

    /// Resolve an ordinal against the most recent refresh.
    pub fn resolve(&self, ordinal: usize) -> Result<String> {
        self.registry.read().resolve(ordinal).map(str::to_string)
    }

    /// Display labels, e.g. `"1. Ethernet"`, `"2. tap-work *new*"`.
    pub fn labels(&self) -> Vec<String> {
        self.registry.read().labels()
    }

    /// Display label for one ordinal.
    pub fn label(&self, ordinal: usize) -> Result<String> {
        self.registry.read().label(ordinal)
    }

    pub fn is_new(&self, name: &str) -> bool {
        self.registry.read().is_new(name)
    }

    /// Snapshot of the registry.
    pub fn registry(&self) -> InterfaceRegistry {
        self.registry.read().clone()
    }

    /// Create a virtual adapter and mark it as new.
    pub async fn create_interface(&self, name: &str) -> Result<()> {
        let name = validate_name(name)?;
        self.registry.write().prune_new();

        self.run_tool("create", name, self.adapter_tool.create(name))
            .await?;
        info!(name = %name, "Interface created");

        self.registry.write().mark_new(name);
        self.refresh_after("create", name);
        Ok(())
    }

    /// Remove a virtual adapter and clear its new marker.
    pub async fn remove_interface(&self, name: &str) -> Result<()> {
        let name = validate_name(name)?;
        self.registry.write().prune_new();

        self.run_tool("delete", name, self.adapter_tool.delete(name))
            .await?;
        info!(name = %name, "Interface removed");

        self.registry.write().unmark_new(name);
        self.refresh_after("delete", name);
        Ok(())
    }

    // The tool already succeeded; a stale listing is fixed by the next refresh
    fn refresh_after(&self, action: &'static str, name: &str) {
        if let Err(e) = self.refresh() {
            warn!(name = %name, action = action, error = %e, "Interface list not refreshed");
        }
    }

    async fn run_tool(
        &self,
        action: &'static str,
        name: &str,
        call: impl Future<Output = Result<ToolOutput>>,
    ) -> Result<()> {
        let result = match self.adapter_timeout {
            Some(after) => tokio::time::timeout(after, call).await.map_err(|_| {
                warn!(name = %name, action = action, ?after, "Adapter tool timed out");
                Error::Timeout {
                    action,
                    name: name.to_string(),
                    after,
                }
            })?,
            None => call.await,
        };

        let output = result.map_err(|e| Error::AdapterTool {
            action,
            name: name.to_string(),
            status: "could not be started".to_string(),
            diagnostics: e.to_string(),
        })?;

        if !output.success {
            warn!(
                name = %name,
                action = action,
                status = %output.status,
                diagnostics = %output.diagnostics,
                "Adapter tool failed"
            );
            return Err(Error::AdapterTool {
                action,
                name: name.to_string(),
                status: output.status,
                diagnostics: output.diagnostics,
            });
        }

        Ok(())
    }
}

/// Reject empty and whitespace-only names; trim the rest.
fn validate_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidName(name.to_string()));
    }
    Ok(trimmed)
}
