//! One module per subcommand.

pub mod adapter;
pub mod bind;
pub mod config;
pub mod interfaces;
pub mod processes;
