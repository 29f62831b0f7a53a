//! Interfaces command - numbered interface listing.

use anyhow::Result;
use ifbind_core::{find_ipv4, IfBindEngine, InterfaceRecord};
use serde_json::json;

pub fn run(engine: &IfBindEngine, json: bool) -> Result<()> {
    let records = engine.list_interfaces()?;
    let labels = engine.interface_labels();

    if json {
        let entries: Vec<_> = (1..=labels.len())
            .filter_map(|ordinal| engine.resolve_interface(ordinal).ok().map(|n| (ordinal, n)))
            .map(|(ordinal, name)| {
                let addresses = addresses_of(&records, &name);
                json!({
                    "ordinal": ordinal,
                    "name": name,
                    "isNew": engine.is_new_interface(&name),
                    "addresses": addresses,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if labels.is_empty() {
        println!("No network interfaces found.");
        return Ok(());
    }

    for (index, label) in labels.iter().enumerate() {
        let ipv4 = engine
            .resolve_interface(index + 1)
            .ok()
            .and_then(|name| find_ipv4(&records, &name))
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<40} {}", label, ipv4);
    }

    println!("\nTotal: {} interfaces", labels.len());
    Ok(())
}

fn addresses_of(records: &[InterfaceRecord], name: &str) -> Vec<String> {
    records
        .iter()
        .find(|r| r.name == name)
        .map(|r| {
            r.addresses
                .iter()
                .map(|a| format!("{} {}", a.family.display_name(), a.address))
                .collect()
        })
        .unwrap_or_default()
}
