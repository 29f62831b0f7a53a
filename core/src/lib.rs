//! ifbind Core Library
//!
//! Interface-to-process binding engine. Provides functionality to:
//! - List network interfaces and their addresses
//! - Number interfaces for operator selection and track the ones created
//!   in the current session
//! - Create and remove virtual adapters through an external adapter tool
//! - List running processes
//! - Relaunch a process with its outbound sockets bound to an interface's
//!   IPv4 address through an external binding tool
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure business logic and data models
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations
//! - `application`: Use case services
//! - `engine`: Synchronous façade owning the session state
//!
//! # External tools
//! - Adapter tool: tapctl-compatible (`create --hwid <id> --name <name>`, `delete <name>`)
//! - Binding tool: ForceBindIP-compatible (`<tool> <ipv4> <executable>`)

// Hexagonal architecture layers
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub mod config;
pub mod engine;
pub mod error;

// Re-export domain types (primary API)
pub use domain::{
    find_ipv4, primary_ipv4, AddressFamily, BindReceipt, BindingRequest, InterfaceAddress,
    InterfaceRecord, InterfaceRegistry, ProcessRecord,
};

// Re-export other commonly used types
pub use application::{InterfaceService, RouteBinder};
pub use config::{Config, ConfigStore};
pub use engine::IfBindEngine;
pub use error::{BindError, Error, Result};
