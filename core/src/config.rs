//! Configuration management for external tool locations.
//!
//! Stores configuration in JSON format at `~/.ifbind/config.json`.
//! Only tool settings live here; the interface numbering and "new" markers
//! are session state and are never written to disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};

/// Default adapter management tool, resolved through `PATH`.
pub const DEFAULT_ADAPTER_TOOL: &str = "tapctl.exe";

/// Hardware id passed to the adapter tool when creating an adapter.
pub const DEFAULT_HARDWARE_ID: &str = r"root\tap0901";

/// Default binding tool location, relative to the working directory.
pub const DEFAULT_BIND_TOOL: &str = r"ForceBindIP\ForceBindIP.exe";

/// Configuration data stored in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Virtual adapter management executable.
    #[serde(default = "default_adapter_tool", rename = "adapterToolPath")]
    pub adapter_tool_path: PathBuf,

    /// Hardware id of the virtual adapter driver.
    #[serde(default = "default_hardware_id", rename = "hardwareId")]
    pub hardware_id: String,

    /// Socket binding executable.
    #[serde(default = "default_bind_tool", rename = "bindToolPath")]
    pub bind_tool_path: PathBuf,

    /// Upper bound for a single adapter tool call. `None` waits forever.
    #[serde(
        default,
        rename = "adapterToolTimeoutSecs",
        skip_serializing_if = "Option::is_none"
    )]
    pub adapter_tool_timeout_secs: Option<u64>,
}

fn default_adapter_tool() -> PathBuf {
    PathBuf::from(DEFAULT_ADAPTER_TOOL)
}

fn default_hardware_id() -> String {
    DEFAULT_HARDWARE_ID.to_string()
}

fn default_bind_tool() -> PathBuf {
    PathBuf::from(DEFAULT_BIND_TOOL)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            adapter_tool_path: default_adapter_tool(),
            hardware_id: default_hardware_id(),
            bind_tool_path: default_bind_tool(),
            adapter_tool_timeout_secs: None,
        }
    }
}

impl Config {
    /// Adapter tool timeout as a `Duration`; zero counts as unset.
    pub fn adapter_tool_timeout(&self) -> Option<Duration> {
        self.adapter_tool_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Reads and writes tool settings at `~/.ifbind/config.json`.
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Store at `~/.ifbind/config.json`.
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            Error::Config("No home directory to keep tool settings in".to_string())
        })?;
        Ok(Self::with_path(home.join(".ifbind").join("config.json")))
    }

    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Current tool settings, or the defaults when nothing was saved yet.
    pub async fn load(&self) -> Result<Config> {
        let content = match fs::read_to_string(&self.config_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(settings_error("read", &self.config_path, e)),
        };

        serde_json::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Tool settings in {} are not valid JSON: {}",
                self.config_path.display(),
                e
            ))
        })
    }

    /// Persist tool settings. Readers see either the old file or the new one.
    pub async fn save(&self, config: &Config) -> Result<()> {
        let content = serde_json::to_vec_pretty(config)?;
        let staged = self.config_path.with_extension("json.tmp");

        if let Some(dir) = self.config_path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| settings_error("create directory for", dir, e))?;
        }

        let mut file = fs::File::create(&staged)
            .await
            .map_err(|e| settings_error("stage", &staged, e))?;
        file.write_all(&content)
            .await
            .map_err(|e| settings_error("write", &staged, e))?;
        file.sync_all()
            .await
            .map_err(|e| settings_error("flush", &staged, e))?;
        drop(file);

        fs::rename(&staged, &self.config_path)
            .await
            .map_err(|e| settings_error("replace", &self.config_path, e))
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Set the adapter management tool path.
    pub async fn set_adapter_tool_path(&self, path: PathBuf) -> Result<()> {
        let mut config = self.load().await?;
        config.adapter_tool_path = path;
        self.save(&config).await
    }

    /// Set the hardware id used when creating adapters.
    pub async fn set_hardware_id(&self, hardware_id: &str) -> Result<()> {
        let hardware_id = hardware_id.trim();
        if hardware_id.is_empty() {
            return Err(Error::Config("Hardware id must not be empty".to_string()));
        }
        let mut config = self.load().await?;
        config.hardware_id = hardware_id.to_string();
        self.save(&config).await
    }

    /// Set the binding tool path.
    pub async fn set_bind_tool_path(&self, path: PathBuf) -> Result<()> {
        let mut config = self.load().await?;
        config.bind_tool_path = path;
        self.save(&config).await
    }

    /// Set the adapter tool timeout in seconds. `None` or `0` disables it.
    pub async fn set_adapter_tool_timeout(&self, secs: Option<u64>) -> Result<()> {
        let mut config = self.load().await?;
        config.adapter_tool_timeout_secs = secs.filter(|s| *s > 0);
        self.save(&config).await
    }
}

fn settings_error(action: &str, path: &Path, e: std::io::Error) -> Error {
    Error::Config(format!(
        "Could not {} tool settings at {}: {}",
        action,
        path.display(),
        e
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_store() -> (ConfigStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ifbind").join("config.json");
        (ConfigStore::with_path(path), dir)
    }

    #[tokio::test]
    async fn test_load_nonexistent() {
        let (store, _dir) = test_store();
        let config = store.load().await.unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.hardware_id, r"root\tap0901");
        assert!(config.adapter_tool_timeout().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let (store, _dir) = test_store();

        let config = Config {
            adapter_tool_path: PathBuf::from("/opt/tap/tapctl"),
            hardware_id: "root\\tap0901".to_string(),
            bind_tool_path: PathBuf::from("/opt/bind/forcebind"),
            adapter_tool_timeout_secs: Some(30),
        };

        store.save(&config).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.adapter_tool_timeout(), Some(Duration::from_secs(30)));
    }

    #[tokio::test]
    async fn test_partial_file_uses_defaults() {
        let (store, _dir) = test_store();
        std::fs::create_dir_all(store.config_path().parent().unwrap()).unwrap();
        std::fs::write(store.config_path(), r#"{"bindToolPath": "bin/forcebind"}"#).unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.bind_tool_path, PathBuf::from("bin/forcebind"));
        assert_eq!(loaded.adapter_tool_path, PathBuf::from(DEFAULT_ADAPTER_TOOL));
        assert!(loaded.adapter_tool_timeout_secs.is_none());
    }

    #[tokio::test]
    async fn test_setters() {
        let (store, _dir) = test_store();

        store
            .set_adapter_tool_path(PathBuf::from("tapctl"))
            .await
            .unwrap();
        store.set_hardware_id("  root\\wintun  ").await.unwrap();
        store
            .set_bind_tool_path(PathBuf::from("forcebind"))
            .await
            .unwrap();
        store.set_adapter_tool_timeout(Some(10)).await.unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.adapter_tool_path, PathBuf::from("tapctl"));
        assert_eq!(config.hardware_id, "root\\wintun");
        assert_eq!(config.bind_tool_path, PathBuf::from("forcebind"));
        assert_eq!(config.adapter_tool_timeout_secs, Some(10));

        store.set_adapter_tool_timeout(Some(0)).await.unwrap();
        assert!(store.load().await.unwrap().adapter_tool_timeout_secs.is_none());
    }

    #[tokio::test]
    async fn test_empty_hardware_id_rejected() {
        let (store, _dir) = test_store();
        assert!(store.set_hardware_id("   ").await.is_err());
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let (store, _dir) = test_store();
        std::fs::create_dir_all(store.config_path().parent().unwrap()).unwrap();
        std::fs::write(store.config_path(), "not json").unwrap();

        assert!(matches!(store.load().await, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_save_replaces_without_leftovers() {
        let (store, _dir) = test_store();
        store.save(&Config::default()).await.unwrap();
        store.set_adapter_tool_timeout(Some(5)).await.unwrap();

        let dir = store.config_path().parent().unwrap();
        let entries: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec!["config.json"]);
        assert_eq!(store.load().await.unwrap().adapter_tool_timeout_secs, Some(5));
    }
}
