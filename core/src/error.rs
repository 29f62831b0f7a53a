//! Error types for the ifbind-core library.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result type alias for ifbind operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while managing interfaces and binding processes.
#[derive(Error, Debug)]
pub enum Error {
    /// The OS could not be queried for interfaces or processes.
    #[error("Platform query failed: {0}")]
    PlatformQuery(String),

    /// An interface ordinal outside `1..=count`.
    #[error("Invalid interface number {ordinal} (expected 1..={count})")]
    InvalidOrdinal { ordinal: usize, count: usize },

    /// An empty or whitespace-only interface name.
    #[error("Invalid interface name: {0:?}")]
    InvalidName(String),

    /// The adapter tool could not be started or exited unsuccessfully.
    #[error("Failed to {action} interface {name}: {status}{}", format_diagnostics(.diagnostics))]
    AdapterTool {
        action: &'static str,
        name: String,
        status: String,
        diagnostics: String,
    },

    /// The adapter tool did not exit within the configured bound.
    #[error("Adapter tool timed out after {after:?} while trying to {action} interface {name}")]
    Timeout {
        action: &'static str,
        name: String,
        after: Duration,
    },

    /// The process exited (or never existed) by the time it was looked up.
    #[error("Process with PID {0} not found")]
    NoSuchProcess(u32),

    /// The process exists but its executable path cannot be read.
    #[error("Executable path of process {0} is not accessible")]
    ExecutableUnavailable(u32),

    /// Binding a process to an interface failed.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Reasons a bind request can fail.
#[derive(Error, Debug)]
pub enum BindError {
    #[error("Invalid interface number {ordinal} (expected 1..={count})")]
    InvalidInterface { ordinal: usize, count: usize },

    #[error("Process with PID {0} is no longer running")]
    ProcessVanished(u32),

    #[error("Executable path of process {0} is not accessible")]
    ExecutableUnavailable(u32),

    #[error("Failed to find an IPv4 address for interface {0}")]
    NoIpv4Address(String),

    #[error("Binding tool not found at {}. Make sure it is installed", .0.display())]
    ToolMissing(PathBuf),

    #[error("Failed to launch the application through the binding tool: {0}")]
    LaunchFailed(String),
}

fn format_diagnostics(diagnostics: &str) -> String {
    if diagnostics.is_empty() {
        String::new()
    } else {
        format!(": {}", diagnostics)
    }
}
