//! Virtual adapter management through a tapctl-compatible executable.
//!
//! Uses the following commands:
//! - `<tool> create --hwid <hardware id> --name <name>`
//! - `<tool> delete <name>`
//!
//! Arguments are passed as a vector, never through a shell.

use std::path::PathBuf;
use std::process::{Output, Stdio};

use tokio::process::Command;
use tracing::debug;

use crate::error::Result;
use crate::ports::{AdapterToolPort, ToolOutput};

/// Adapter tool runner.
#[derive(Debug, Clone)]
pub struct TapCtl {
    tool_path: PathBuf,
    hardware_id: String,
}

impl TapCtl {
    pub fn new(tool_path: impl Into<PathBuf>, hardware_id: impl Into<String>) -> Self {
        Self {
            tool_path: tool_path.into(),
            hardware_id: hardware_id.into(),
        }
    }

    /// Arguments for creating an adapter.
    fn create_args<'a>(&'a self, name: &'a str) -> [&'a str; 5] {
        ["create", "--hwid", self.hardware_id.as_str(), "--name", name]
    }

    /// Arguments for deleting an adapter.
    fn delete_args(name: &str) -> [&str; 2] {
        ["delete", name]
    }

    async fn run(&self, args: &[&str]) -> Result<ToolOutput> {
        debug!(tool = %self.tool_path.display(), args = ?args, "Running adapter tool");

        // kill_on_drop lets a caller-side timeout tear the tool down
        let output = Command::new(&self.tool_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;

        let result = to_tool_output(output);
        debug!(success = result.success, status = %result.status, "Adapter tool finished");
        Ok(result)
    }
}

impl AdapterToolPort for TapCtl {
    async fn create(&self, name: &str) -> Result<ToolOutput> {
        self.run(&self.create_args(name)).await
    }

    async fn delete(&self, name: &str) -> Result<ToolOutput> {
        self.run(&Self::delete_args(name)).await
    }
}

fn to_tool_output(output: Output) -> ToolOutput {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let diagnostics = format!("{} {}", stdout.trim(), stderr.trim())
        .trim()
        .to_string();

    let status = match output.status.code() {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    };

    ToolOutput {
        success: output.status.success(),
        status,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_args() {
        let tool = TapCtl::new("tapctl.exe", r"root\tap0901");
        assert_eq!(
            tool.create_args("my tap; rm -rf"),
            ["create", "--hwid", r"root\tap0901", "--name", "my tap; rm -rf"]
        );
        assert_eq!(TapCtl::delete_args("tap0"), ["delete", "tap0"]);
    }

    #[tokio::test]
    async fn test_missing_tool_is_an_error() {
        let tool = TapCtl::new("/nonexistent/path/tapctl", r"root\tap0901");
        assert!(tool.create("tap0").await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_and_diagnostics() {
        // `sh -c <script> <name>` stands in for the adapter tool
        let tool = TapCtl::new("/bin/sh", "unused");

        let ok = tool.run(&["-c", "exit 0"]).await.unwrap();
        assert!(ok.success);
        assert_eq!(ok.status, "exit code 0");

        let failed = tool
            .run(&["-c", "echo adapter exists >&2; exit 3"])
            .await
            .unwrap();
        assert!(!failed.success);
        assert_eq!(failed.status, "exit code 3");
        assert_eq!(failed.diagnostics, "adapter exists");
    }
}
