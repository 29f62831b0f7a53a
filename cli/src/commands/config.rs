//! Config command - persisted tool settings.

use std::path::PathBuf;

use anyhow::Result;
use ifbind_core::ConfigStore;
use tokio::runtime::{Builder, Runtime};

fn runtime() -> Result<Runtime> {
    Ok(Builder::new_current_thread().enable_all().build()?)
}

pub fn show(json: bool) -> Result<()> {
    let store = ConfigStore::new()?;
    let config = runtime()?.block_on(store.load())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("Config file:       {}", store.config_path().display());
    println!("Adapter tool:      {}", config.adapter_tool_path.display());
    println!("Hardware id:       {}", config.hardware_id);
    println!("Binding tool:      {}", config.bind_tool_path.display());
    match config.adapter_tool_timeout() {
        Some(timeout) => println!("Adapter timeout:   {}s", timeout.as_secs()),
        None => println!("Adapter timeout:   none"),
    }
    Ok(())
}

pub fn set_adapter_tool(path: PathBuf) -> Result<()> {
    let store = ConfigStore::new()?;
    runtime()?.block_on(store.set_adapter_tool_path(path.clone()))?;
    println!("Adapter tool set to {}", path.display());
    Ok(())
}

pub fn set_bind_tool(path: PathBuf) -> Result<()> {
    let store = ConfigStore::new()?;
    runtime()?.block_on(store.set_bind_tool_path(path.clone()))?;
    println!("Binding tool set to {}", path.display());
    Ok(())
}

pub fn set_hwid(hardware_id: &str) -> Result<()> {
    let store = ConfigStore::new()?;
    runtime()?.block_on(store.set_hardware_id(hardware_id))?;
    println!("Hardware id set to {}", hardware_id.trim());
    Ok(())
}

pub fn set_timeout(secs: u64) -> Result<()> {
    let store = ConfigStore::new()?;
    runtime()?.block_on(store.set_adapter_tool_timeout(Some(secs)))?;
    if secs == 0 {
        println!("Adapter tool timeout disabled");
    } else {
        println!("Adapter tool timeout set to {}s", secs);
    }
    Ok(())
}
