//! Virtual adapter tool port (interface).

use crate::error::Result;

/// What the adapter tool reported after it exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    /// Human readable exit status, e.g. `exit code 1`.
    pub status: String,
    /// Combined stdout and stderr, trimmed.
    pub diagnostics: String,
}

impl ToolOutput {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            status: "exit code 0".to_string(),
            diagnostics: String::new(),
        }
    }

    pub fn failed(code: i32, diagnostics: impl Into<String>) -> Self {
        Self {
            success: false,
            status: format!("exit code {}", code),
            diagnostics: diagnostics.into(),
        }
    }
}

/// Port for the external virtual-adapter management tool.
///
/// Implementations run the tool to completion and report its exit status.
/// An `Err` means the tool could not be started at all.
pub trait AdapterToolPort: Send + Sync {
    /// Create a virtual adapter called `name`.
    fn create(&self, name: &str) -> impl std::future::Future<Output = Result<ToolOutput>> + Send;

    /// Delete the virtual adapter called `name`.
    fn delete(&self, name: &str) -> impl std::future::Future<Output = Result<ToolOutput>> + Send;
}
