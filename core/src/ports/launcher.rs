//! Binding tool launcher port (interface).

use std::path::Path;

use crate::domain::BindingRequest;
use crate::error::Result;

/// Port for the external socket-binding tool.
pub trait BindLauncherPort: Send + Sync {
    /// Where the binding tool is expected to be.
    fn tool_path(&self) -> &Path;

    /// Check whether the binding tool is installed.
    fn is_available(&self) -> bool;

    /// Start the binding tool detached and return without waiting.
    ///
    /// Returns the PID of the launched tool when the OS reports one.
    fn launch(&self, request: BindingRequest) -> Result<Option<u32>>;
}
