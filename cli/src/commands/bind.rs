//! Bind command - relaunch an application through an interface.

use anyhow::{bail, Result};
use ifbind_core::IfBindEngine;

pub fn run(
    engine: &IfBindEngine,
    pid: Option<u32>,
    process: Option<&str>,
    ordinal: usize,
) -> Result<()> {
    let pid = match (pid, process) {
        (Some(pid), _) => pid,
        (None, Some(name)) => match engine.find_process(name)? {
            Some(pid) => pid,
            None => bail!("No running process named {}", name),
        },
        (None, None) => bail!("Either --pid or --process is required"),
    };

    let receipt = engine.bind(pid, ordinal)?;
    println!(
        "Application launched through interface {} with IP {}",
        receipt.interface_name, receipt.address
    );
    if let Some(launched) = receipt.launched_pid {
        println!("Binding tool PID: {}", launched);
    }
    Ok(())
}
