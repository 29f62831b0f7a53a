//! Adapters layer - External system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`.
//! Each adapter handles communication with the OS or an external tool.

pub mod forcebind;
pub mod inventory;
pub mod process;
pub mod tapctl;

// Re-export main types for convenience
pub use forcebind::ForceBindLauncher;
pub use inventory::SystemInventory;
pub use process::SystemProcessLocator;
pub use tapctl::TapCtl;
