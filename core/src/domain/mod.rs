//! Domain layer - Pure business logic and data models.
//!
//! This module contains domain entities that represent core business concepts.
//! These types have no I/O dependencies and can be tested in isolation.

mod interface;
mod process;
mod registry;

// Re-export all domain types
pub use interface::{
    find_ipv4, primary_ipv4, AddressFamily, InterfaceAddress, InterfaceRecord,
};
pub use process::{BindReceipt, BindingRequest, ProcessRecord};
pub use registry::{InterfaceRegistry, NEW_MARKER};
