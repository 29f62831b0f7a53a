//! Application layer - Use case services.
//!
//! Services are thin orchestrators that:
//! - Accept domain types as inputs
//! - Use ports (traits) for external dependencies
//! - Return domain types as outputs

mod interface_service;
mod route_binder;

#[cfg(test)]
pub(crate) mod mocks;

pub use interface_service::InterfaceService;
pub use route_binder::RouteBinder;
