//! In-memory port implementations for service tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};

use crate::domain::{BindingRequest, InterfaceRecord, ProcessRecord};
use crate::error::{Error, Result};
use crate::ports::{
    AdapterToolPort, BindLauncherPort, InterfaceInventoryPort, ProcessLocatorPort, ToolOutput,
};

pub type SharedRecords = Arc<RwLock<Vec<InterfaceRecord>>>;

/// Inventory serving whatever is in a shared record list.
pub struct MockInventory {
    records: SharedRecords,
    fail: Arc<AtomicBool>,
}

impl MockInventory {
    pub fn new(records: Vec<InterfaceRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            fail: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            records: Arc::default(),
            fail: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn records(&self) -> SharedRecords {
        self.records.clone()
    }

    /// Flip to make later listings fail.
    pub fn failure_switch(&self) -> Arc<AtomicBool> {
        self.fail.clone()
    }
}

impl InterfaceInventoryPort for MockInventory {
    fn list_interfaces(&self) -> Result<Vec<InterfaceRecord>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::PlatformQuery("interface table unavailable".to_string()));
        }
        Ok(self.records.read().clone())
    }
}

/// Adapter tool that edits the shared inventory the way a real driver would.
pub struct MockAdapterTool {
    records: SharedRecords,
    calls: Arc<Mutex<Vec<String>>>,
    failure: Option<ToolOutput>,
    delete_failure: Option<ToolOutput>,
    unstartable: bool,
    delay: Option<Duration>,
}

impl MockAdapterTool {
    pub fn new(records: SharedRecords) -> Self {
        Self {
            records,
            calls: Arc::default(),
            failure: None,
            delete_failure: None,
            unstartable: false,
            delay: None,
        }
    }

    /// Every call exits with `output`.
    pub fn failing_with(mut self, output: ToolOutput) -> Self {
        self.failure = Some(output);
        self
    }

    /// Deletes exit with `output`, creates succeed.
    pub fn failing_deletes_with(mut self, output: ToolOutput) -> Self {
        self.delete_failure = Some(output);
        self
    }

    /// Every call fails to start.
    pub fn unstartable(mut self) -> Self {
        self.unstartable = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        self.calls.clone()
    }

    async fn run(&self, call: String, failure: Option<&ToolOutput>) -> Result<ToolOutput> {
        self.calls.lock().push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.unstartable {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "program not found",
            )));
        }
        match failure.or(self.failure.as_ref()) {
            Some(output) => Ok(output.clone()),
            None => Ok(ToolOutput::succeeded()),
        }
    }
}

impl AdapterToolPort for MockAdapterTool {
    async fn create(&self, name: &str) -> Result<ToolOutput> {
        let output = self.run(format!("create {}", name), None).await?;
        if output.success {
            self.records.write().push(InterfaceRecord {
                name: name.to_string(),
                addresses: Vec::new(),
            });
        }
        Ok(output)
    }

    async fn delete(&self, name: &str) -> Result<ToolOutput> {
        let output = self
            .run(format!("delete {}", name), self.delete_failure.as_ref())
            .await?;
        if output.success {
            self.records.write().retain(|r| r.name != name);
        }
        Ok(output)
    }
}

/// Locator with a fixed process table.
#[derive(Default)]
pub struct MockLocator {
    processes: HashMap<u32, (String, Option<PathBuf>)>,
}

impl MockLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_process(mut self, pid: u32, name: &str, path: Option<&str>) -> Self {
        self.processes
            .insert(pid, (name.to_string(), path.map(PathBuf::from)));
        self
    }
}

impl ProcessLocatorPort for MockLocator {
    fn list_processes(&self) -> Result<Vec<ProcessRecord>> {
        let mut processes: Vec<ProcessRecord> = self
            .processes
            .iter()
            .map(|(pid, (name, path))| ProcessRecord::new(*pid, name.clone(), path.clone()))
            .collect();
        processes.sort_by_key(|p| p.pid);
        Ok(processes)
    }

    fn resolve_executable_path(&self, pid: u32) -> Result<PathBuf> {
        match self.processes.get(&pid) {
            Some((_, Some(path))) => Ok(path.clone()),
            Some((_, None)) => Err(Error::ExecutableUnavailable(pid)),
            None => Err(Error::NoSuchProcess(pid)),
        }
    }
}

/// Launcher that records requests instead of starting anything.
pub struct RecordingLauncher {
    tool_path: PathBuf,
    available: bool,
    launched: Arc<Mutex<Vec<BindingRequest>>>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self {
            tool_path: PathBuf::from(r"ForceBindIP\ForceBindIP.exe"),
            available: true,
            launched: Arc::default(),
        }
    }

    pub fn missing() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn launched(&self) -> Arc<Mutex<Vec<BindingRequest>>> {
        self.launched.clone()
    }
}

impl BindLauncherPort for RecordingLauncher {
    fn tool_path(&self) -> &Path {
        &self.tool_path
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn launch(&self, request: BindingRequest) -> Result<Option<u32>> {
        self.launched.lock().push(request);
        Ok(Some(4242))
    }
}
