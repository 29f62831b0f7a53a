//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the interfaces that the application layer uses
//! to interact with the OS and the external tools. Implementations live
//! in `adapters`.

mod adapter_tool;
mod inventory;
mod launcher;
mod process;

pub use adapter_tool::{AdapterToolPort, ToolOutput};
pub use inventory::InterfaceInventoryPort;
pub use launcher::BindLauncherPort;
pub use process::ProcessLocatorPort;
