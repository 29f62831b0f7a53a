//! Add and remove commands - virtual adapter management.

use anyhow::Result;
use ifbind_core::IfBindEngine;

pub fn add(engine: &IfBindEngine, name: &str) -> Result<()> {
    engine.create_interface(name)?;
    match engine.interface_ordinal(name.trim()) {
        Some(ordinal) => println!("Created interface {} as number {}", name.trim(), ordinal),
        None => println!("Created interface {}", name.trim()),
    }
    super::interfaces::run(engine, false)
}

pub fn remove(engine: &IfBindEngine, name: &str) -> Result<()> {
    engine.remove_interface(name)?;
    println!("Removed interface {}", name.trim());
    super::interfaces::run(engine, false)
}
